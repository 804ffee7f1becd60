use arcstr::ArcStr;
use kitepack_error::BuildErrorKind;

use crate::{ModuleIdx, RawImportRecord, ResolvedId, SideArtifact};

pub enum ModuleLoaderMsg {
  ModuleDone(Box<ModuleTaskResult>),
  ModuleFailed { idx: ModuleIdx, error: BuildErrorKind },
}

/// A specifier together with the file it resolved to.
#[derive(Debug)]
pub struct ResolvedDependency {
  pub record: RawImportRecord,
  pub resolved_id: ResolvedId,
}

#[derive(Debug)]
pub struct ModuleTaskResult {
  pub idx: ModuleIdx,
  pub source: Vec<u8>,
  pub transformed: Vec<u8>,
  pub content_hash: String,
  pub side_artifacts: Vec<SideArtifact>,
  pub transforms: Vec<ArcStr>,
  pub dependencies: Vec<ResolvedDependency>,
  pub warnings: Vec<anyhow::Error>,
}
