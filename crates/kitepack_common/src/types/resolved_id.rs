use std::path::Path;

use arcstr::ArcStr;

use super::module_id::stabilize_module_id;

/// Output of the resolver for one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
  pub id: ArcStr,
}

impl ResolvedId {
  pub fn new(id: impl Into<ArcStr>) -> Self {
    Self { id: id.into() }
  }

  pub fn debug_id(&self, cwd: impl AsRef<Path>) -> String {
    stabilize_module_id(&self.id, cwd.as_ref())
  }
}
