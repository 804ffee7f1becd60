use arcstr::ArcStr;

use crate::{ImportKind, ModuleIdx};

/// One directed dependency of the module graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
  pub from: ModuleIdx,
  pub to: ModuleIdx,
  pub specifier: ArcStr,
  pub kind: ImportKind,
}
