use std::{path::PathBuf, time::Duration};

use crate::{
  ChunkingStrategy, FilenameTemplate, InputItem, Mode, Platform, ResolveOptions, TransformRule,
};

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
  pub mode: Mode,
  pub platform: Platform,

  // --- Resolve
  pub resolve: ResolveOptions,

  // --- Transform
  pub rules: Vec<TransformRule>,

  // --- Chunking
  pub chunking: ChunkingStrategy,

  // --- Output
  pub dir: String,
  pub entry_filenames: FilenameTemplate,
  pub chunk_filenames: FilenameTemplate,
  pub attached_filenames: FilenameTemplate,

  // --- Scheduling
  pub max_parallel_tasks: usize,
  pub module_timeout: Duration,
}

impl NormalizedBundlerOptions {
  pub fn out_dir(&self) -> PathBuf {
    self.cwd.join(&self.dir)
  }
}
