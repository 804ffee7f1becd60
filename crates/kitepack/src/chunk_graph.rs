use kitepack_common::{Chunk, ChunkIdx, ModuleIdx};
use oxc_index::{index_vec, IndexVec};
use rustc_hash::FxHashMap;

use crate::types::{IndexChunks, IndexModules};

#[derive(Debug)]
pub struct ChunkGraph {
  pub chunk_table: IndexChunks,
  /// A module appears in several chunks only when it is duplicated into entry chunks.
  pub module_to_chunks: IndexVec<ModuleIdx, Vec<ChunkIdx>>,
  pub entry_module_to_entry_chunk: FxHashMap<ModuleIdx, ChunkIdx>,
}

impl ChunkGraph {
  pub fn new(modules: &IndexModules) -> Self {
    Self {
      chunk_table: IndexVec::default(),
      module_to_chunks: index_vec![vec![]; modules.len()],
      entry_module_to_entry_chunk: FxHashMap::default(),
    }
  }

  pub fn add_chunk(&mut self, chunk: Chunk) -> ChunkIdx {
    let entry_module = chunk.entry_module_idx();
    let modules = chunk.modules.clone();
    let chunk_idx = self.chunk_table.push(chunk);
    for module_idx in modules {
      self.module_to_chunks[module_idx].push(chunk_idx);
    }
    if let Some(module_idx) = entry_module {
      self.entry_module_to_entry_chunk.insert(module_idx, chunk_idx);
    }
    chunk_idx
  }

  pub fn chunk_by_name(&self, name: &str) -> Option<&Chunk> {
    self.chunk_table.iter().find(|chunk| chunk.name == name)
  }
}
