use std::{borrow::Cow, ffi::OsStr};

use kitepack_common::SideArtifact;

use crate::{Transform, TransformContext, TransformName, TransformOutput};

const DEFAULT_EXTENSION: &str = "css";

/// Moves the source into a chunk attached artifact and leaves an empty module behind. The
/// emitter merges the attached artifacts of a chunk into one file per extension.
///
/// Options:
/// - `extension`: extension of the merged file, `css` by default.
#[derive(Debug, Default)]
pub struct ExtractTransform;

impl Transform for ExtractTransform {
  fn name(&self) -> TransformName<'_> {
    "extract".into()
  }

  fn transform(
    &self,
    ctx: &TransformContext<'_>,
    source: Vec<u8>,
  ) -> anyhow::Result<TransformOutput> {
    let extension = ctx.option_str("extension")?.unwrap_or(DEFAULT_EXTENSION);
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
      anyhow::bail!("Option \"extension\" must not be empty");
    }

    let name =
      ctx.module_path().file_stem().map_or(Cow::Borrowed("extracted"), OsStr::to_string_lossy);
    let artifact = SideArtifact::chunk_attached(name.as_ref(), extension, source);
    Ok(TransformOutput::new(Vec::new()).with_side_artifact(artifact))
  }
}
