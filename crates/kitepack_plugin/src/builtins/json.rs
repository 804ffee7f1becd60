use anyhow::Context;

use crate::{Transform, TransformContext, TransformName, TransformOutput};

/// `{"a":1}` becomes `module.exports = {"a":1};`.
#[derive(Debug, Default)]
pub struct JsonTransform;

impl Transform for JsonTransform {
  fn name(&self) -> TransformName<'_> {
    "json".into()
  }

  fn transform(
    &self,
    ctx: &TransformContext<'_>,
    source: Vec<u8>,
  ) -> anyhow::Result<TransformOutput> {
    let value: serde_json::Value = serde_json::from_slice(&source)
      .with_context(|| format!("{} is not valid JSON", ctx.stable_id))?;
    let json = value.to_string();
    let code = kitepack_utils::concat_string!("module.exports = ", json, ";");
    Ok(TransformOutput::new(code))
  }
}
