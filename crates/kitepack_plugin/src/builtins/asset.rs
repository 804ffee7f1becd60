use std::{borrow::Cow, ffi::OsStr};

use kitepack_common::{FilenameTemplate, SideArtifact};
use kitepack_utils::{path_ext::PathExt, xxhash::xxhash_hex};

use crate::{Transform, TransformContext, TransformName, TransformOutput};

const DEFAULT_NAME: &str = "[name].[hash:8].[ext]";

/// Emits the source as a standalone file and exports its public URL.
///
/// Options:
/// - `name`: file name template, `[name].[hash:8].[ext]` by default. The hash is taken over the
///   source bytes.
/// - `outputPath`: directory prepended to the rendered name, relative to the output directory.
/// - `publicPath`: when set, the exported URL is `publicPath` joined with the rendered name.
///   Otherwise the URL is the emitted file name.
#[derive(Debug, Default)]
pub struct AssetTransform;

impl Transform for AssetTransform {
  fn name(&self) -> TransformName<'_> {
    "asset".into()
  }

  fn transform(
    &self,
    ctx: &TransformContext<'_>,
    source: Vec<u8>,
  ) -> anyhow::Result<TransformOutput> {
    let template = FilenameTemplate::new(ctx.option_str("name")?.unwrap_or(DEFAULT_NAME));
    template.validate().map_err(anyhow::Error::msg)?;

    let path = ctx.module_path();
    let name = path.file_stem().map_or(Cow::Borrowed("asset"), OsStr::to_string_lossy);
    let extension = path.extension_str();
    let rendered = template.render(&name, extension, &xxhash_hex(&source));

    let filename = match ctx.option_str("outputPath")? {
      Some(output_path) if !output_path.is_empty() => join_url(output_path, &rendered),
      _ => rendered.clone(),
    };
    let url = match ctx.option_str("publicPath")? {
      Some(public_path) => join_url(public_path, &rendered),
      None => filename.clone(),
    };

    let code = format!("module.exports = {};", serde_json::to_string(&url)?);
    let artifact = SideArtifact::asset(name.as_ref(), extension, filename, source);
    Ok(TransformOutput::new(code).with_side_artifact(artifact))
  }
}

fn join_url(base: &str, file: &str) -> String {
  let base = base.trim_end_matches('/');
  let file = file.trim_start_matches('/');
  if base.is_empty() {
    file.to_string()
  } else {
    format!("{base}/{file}")
  }
}
