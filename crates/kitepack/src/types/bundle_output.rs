use kitepack_common::ArtifactDescriptor;

#[derive(Debug, Default)]
pub struct BundleOutput {
  /// Entry chunks, then common chunks, then assets. Sorted by file name within each group.
  pub artifacts: Vec<ArtifactDescriptor>,
  pub warnings: Vec<anyhow::Error>,
}

impl BundleOutput {
  pub fn artifact(&self, filename: &str) -> Option<&ArtifactDescriptor> {
    self.artifacts.iter().find(|artifact| artifact.filename == filename)
  }
}
