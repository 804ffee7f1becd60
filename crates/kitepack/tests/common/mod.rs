#![allow(dead_code)]

use std::{borrow::Cow, path::PathBuf, time::Duration};

use kitepack::{
  Bundler, BundlerOptions, InputItem, Mode, Transform, TransformContext, TransformName,
  TransformOutput,
};
use kitepack_fs::MemoryFileSystem;

pub const CWD: &str = "/project";

pub fn project(files: &[(&str, &str)]) -> MemoryFileSystem {
  kitepack_tracing::init();
  MemoryFileSystem::with_files(
    files.iter().map(|(path, content)| (PathBuf::from(CWD).join(path), content.as_bytes())),
  )
  .unwrap()
}

pub fn options(input: &[&str]) -> BundlerOptions {
  BundlerOptions {
    input: Some(input.iter().map(|import| InputItem::from(*import)).collect()),
    cwd: Some(PathBuf::from(CWD)),
    mode: Some(Mode::Development),
    ..BundlerOptions::default()
  }
}

pub fn bundler(fs: &MemoryFileSystem, options: BundlerOptions) -> Bundler {
  Bundler::builder(options).with_fs(fs.clone()).build().unwrap()
}

/// Passes the source through after blocking the worker thread for a while.
#[derive(Debug)]
pub struct SleepTransform(pub Duration);

impl Transform for SleepTransform {
  fn name(&self) -> TransformName<'_> {
    Cow::Borrowed("sleep")
  }

  fn transform(
    &self,
    _ctx: &TransformContext<'_>,
    source: Vec<u8>,
  ) -> anyhow::Result<TransformOutput> {
    std::thread::sleep(self.0);
    Ok(TransformOutput::new(source))
  }
}

/// Always fails.
#[derive(Debug)]
pub struct FailingTransform;

impl Transform for FailingTransform {
  fn name(&self) -> TransformName<'_> {
    Cow::Borrowed("fail")
  }

  fn transform(
    &self,
    ctx: &TransformContext<'_>,
    _source: Vec<u8>,
  ) -> anyhow::Result<TransformOutput> {
    anyhow::bail!("cannot handle {}", ctx.stable_id)
  }
}
