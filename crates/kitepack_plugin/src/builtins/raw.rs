use crate::{Transform, TransformContext, TransformName, TransformOutput};

/// Hands the source on untouched.
#[derive(Debug, Default)]
pub struct RawTransform;

impl Transform for RawTransform {
  fn name(&self) -> TransformName<'_> {
    "raw".into()
  }

  fn transform(
    &self,
    _ctx: &TransformContext<'_>,
    source: Vec<u8>,
  ) -> anyhow::Result<TransformOutput> {
    Ok(TransformOutput::new(source))
  }
}
