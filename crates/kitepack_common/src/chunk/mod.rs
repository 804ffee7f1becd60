use arcstr::ArcStr;
use kitepack_utils::bitset::BitSet;

use crate::{ChunkIdx, FilenameTemplate, ModuleIdx, NormalizedBundlerOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkKind {
  EntryPoint {
    module: ModuleIdx,
    /// Position of the entry in the configuration, also its bit in every `BitSet`.
    bit: u32,
  },
  #[default]
  Common,
}

#[derive(Debug, Default)]
pub struct Chunk {
  pub kind: ChunkKind,
  pub name: ArcStr,
  /// In discovery order.
  pub modules: Vec<ModuleIdx>,
  /// Entries reaching the modules of this chunk.
  pub bits: BitSet,
  /// Chunks to load before this one, ordered by index.
  pub imports: Vec<ChunkIdx>,
}

impl Chunk {
  pub fn new(name: ArcStr, bits: BitSet, modules: Vec<ModuleIdx>, kind: ChunkKind) -> Self {
    Self { kind, name, modules, bits, imports: vec![] }
  }

  pub fn entry_module_idx(&self) -> Option<ModuleIdx> {
    match &self.kind {
      ChunkKind::EntryPoint { module, .. } => Some(*module),
      ChunkKind::Common => None,
    }
  }

  pub fn is_entry(&self) -> bool {
    matches!(self.kind, ChunkKind::EntryPoint { .. })
  }

  pub fn filename_template<'a>(
    &self,
    options: &'a NormalizedBundlerOptions,
  ) -> &'a FilenameTemplate {
    if self.is_entry() {
      &options.entry_filenames
    } else {
      &options.chunk_filenames
    }
  }
}
