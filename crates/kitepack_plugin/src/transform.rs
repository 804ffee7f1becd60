use std::{borrow::Cow, fmt::Debug, path::Path, sync::Arc};

use kitepack_common::{Mode, SideArtifact};

pub type TransformName<'a> = Cow<'a, str>;
pub type SharedTransform = Arc<dyn Transform>;

/// What a transform knows about the module it is working on.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
  /// Absolute path of the module.
  pub module_id: &'a str,
  pub stable_id: &'a str,
  pub mode: Mode,
  /// The options attached to this step of the chain, `null` when none were given.
  pub options: &'a serde_json::Value,
}

impl TransformContext<'_> {
  pub fn module_path(&self) -> &Path {
    Path::new(self.module_id)
  }

  /// Fails when the option is present but not a string.
  pub fn option_str(&self, key: &str) -> anyhow::Result<Option<&str>> {
    match self.options.get(key) {
      None | Some(serde_json::Value::Null) => Ok(None),
      Some(serde_json::Value::String(value)) => Ok(Some(value)),
      Some(other) => anyhow::bail!("Option \"{key}\" must be a string, got {other}"),
    }
  }
}

#[derive(Debug, Default)]
pub struct TransformOutput {
  pub code: Vec<u8>,
  pub side_artifacts: Vec<SideArtifact>,
  /// Extra specifiers the module depends on, resolved from the module's directory.
  pub dependencies: Vec<String>,
}

impl TransformOutput {
  pub fn new(code: impl Into<Vec<u8>>) -> Self {
    Self { code: code.into(), ..Self::default() }
  }

  #[must_use]
  pub fn with_side_artifact(mut self, artifact: SideArtifact) -> Self {
    self.side_artifacts.push(artifact);
    self
  }

  #[must_use]
  pub fn with_dependency(mut self, specifier: impl Into<String>) -> Self {
    self.dependencies.push(specifier.into());
    self
  }
}

/// A named source to source step. Runs on a blocking worker thread.
pub trait Transform: Debug + Send + Sync {
  fn name(&self) -> TransformName<'_>;

  fn transform(
    &self,
    ctx: &TransformContext<'_>,
    source: Vec<u8>,
  ) -> anyhow::Result<TransformOutput>;
}
