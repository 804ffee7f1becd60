use arcstr::ArcStr;

use crate::{ImportRecord, ModuleId, ModuleIdx, SideArtifact};

/// One record per resolved path. Immutable once the loader has inserted it into the graph.
#[derive(Debug)]
pub struct ModuleRecord {
  pub idx: ModuleIdx,
  pub id: ModuleId,
  pub stable_id: String,
  pub source: Vec<u8>,
  /// In scan order, followed by the dependencies declared by transforms.
  pub import_records: Vec<ImportRecord>,
  pub transformed: Vec<u8>,
  /// xxh3 hex digest of `transformed`.
  pub content_hash: String,
  pub side_artifacts: Vec<SideArtifact>,
  /// Names of the transforms that produced `transformed`, in application order.
  pub transforms: Vec<ArcStr>,
  pub exec_order: u32,
}

impl ModuleRecord {
  /// The loader rejects modules whose output is not UTF-8, so this never replaces anything.
  pub fn transformed_code(&self) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(&self.transformed)
  }

  /// Every module this one depends on, in import record order and without repeats.
  pub fn dependencies(&self) -> impl Iterator<Item = ModuleIdx> + '_ {
    let mut seen = Vec::with_capacity(self.import_records.len());
    self.import_records.iter().filter_map(move |rec| {
      let idx = rec.resolved_module();
      if seen.contains(&idx) {
        None
      } else {
        seen.push(idx);
        Some(idx)
      }
    })
  }
}
