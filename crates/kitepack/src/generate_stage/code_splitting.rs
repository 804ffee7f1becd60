use std::ffi::OsStr;

use arcstr::ArcStr;
use kitepack_common::{Chunk, ChunkIdx, ChunkKind, ChunkingStrategy, ModuleIdx};
use kitepack_utils::{
  bitset::BitSet,
  indexmap::FxIndexMap,
  path_ext::{sanitize_file_name, PathExt},
  unique_name::UniqueNameGenerator,
};
use oxc_index::{index_vec, IndexVec};
use rustc_hash::FxHashSet;
use sugar_path::SugarPath;

use super::GenerateStage;
use crate::chunk_graph::ChunkGraph;

impl GenerateStage<'_> {
  #[tracing::instrument(level = "debug", skip_all)]
  pub(super) fn generate_chunks(&self) -> ChunkGraph {
    let modules = &self.graph.modules;
    let entry_points = &self.graph.entry_points;
    let mut chunk_graph = ChunkGraph::new(modules);

    let reached_by_entry =
      entry_points.iter().map(|entry| self.collect_reachable(entry.idx)).collect::<Vec<_>>();

    let entry_count = u32::try_from(entry_points.len()).unwrap_or(u32::MAX);
    let mut module_bits: IndexVec<ModuleIdx, BitSet> =
      index_vec![BitSet::new(entry_count); modules.len()];
    for (bit, reached) in (0u32..).zip(&reached_by_entry) {
      for module_idx in reached {
        module_bits[*module_idx].set_bit(bit);
      }
    }

    let entry_modules = entry_points.iter().map(|entry| entry.idx).collect::<FxHashSet<_>>();
    let is_extracted = |module_idx: ModuleIdx| match self.options.chunking {
      ChunkingStrategy::Single => false,
      ChunkingStrategy::Shared { threshold } => {
        !entry_modules.contains(&module_idx) && module_bits[module_idx].bit_count() >= threshold
      }
    };

    let mut name_generator = UniqueNameGenerator::default();

    for ((bit, entry), reached) in (0u32..).zip(entry_points).zip(&reached_by_entry) {
      let mut bits = BitSet::new(entry_count);
      bits.set_bit(bit);
      let name = entry.name.clone().unwrap_or_else(|| self.entry_chunk_name(entry.idx));
      let chunk = Chunk::new(
        name_generator.make_unique(&name),
        bits,
        reached.iter().copied().filter(|module_idx| !is_extracted(*module_idx)).collect(),
        ChunkKind::EntryPoint { module: entry.idx, bit },
      );
      chunk_graph.add_chunk(chunk);
    }

    // One common chunk per distinct set of reaching entries, in first discovery order.
    let mut common_chunks: FxIndexMap<BitSet, Vec<ModuleIdx>> = FxIndexMap::default();
    let mut seen = FxHashSet::default();
    for module_idx in reached_by_entry.iter().flatten().copied() {
      if seen.insert(module_idx) && is_extracted(module_idx) {
        common_chunks.entry(module_bits[module_idx].clone()).or_default().push(module_idx);
      }
    }
    for (bits, chunk_modules) in common_chunks {
      let name = self.representative_name(chunk_modules[0]);
      let chunk =
        Chunk::new(name_generator.make_unique(&name), bits, chunk_modules, ChunkKind::Common);
      chunk_graph.add_chunk(chunk);
    }

    compute_chunk_imports(&mut chunk_graph, &reached_by_entry);

    tracing::debug!(chunks = chunk_graph.chunk_table.len(), "Chunks generated");
    chunk_graph
  }

  /// Pre-order DFS following import records in order.
  fn collect_reachable(&self, entry: ModuleIdx) -> Vec<ModuleIdx> {
    let modules = &self.graph.modules;
    let mut visited = FxHashSet::default();
    let mut reached = vec![];
    let mut stack = vec![entry];
    while let Some(module_idx) = stack.pop() {
      if !visited.insert(module_idx) {
        continue;
      }
      reached.push(module_idx);
      let dependencies = modules[module_idx].dependencies().collect::<Vec<_>>();
      stack.extend(dependencies.into_iter().rev());
    }
    reached
  }

  /// Unnamed entries are named after the file stem of their module, `index` included.
  fn entry_chunk_name(&self, module_idx: ModuleIdx) -> ArcStr {
    let path = self.graph.modules[module_idx].id.as_path();
    let stem = path.file_stem().map_or_else(|| path.to_string_lossy(), OsStr::to_string_lossy);
    ArcStr::from(sanitize_file_name(&stem))
  }

  /// Common chunks take the representative name of their first module, so `button/index.js`
  /// gives `button`.
  fn representative_name(&self, module_idx: ModuleIdx) -> ArcStr {
    let module = &self.graph.modules[module_idx];
    ArcStr::from(sanitize_file_name(&module.id.as_path().representative_file_name()))
  }
}

/// An entry chunk imports the common chunks holding the modules extracted out of its reach.
/// Copies kept in other entry chunks don't count, so entry chunks never import each other.
fn compute_chunk_imports(chunk_graph: &mut ChunkGraph, reached_by_entry: &[Vec<ModuleIdx>]) {
  for (chunk_idx, reached) in chunk_graph.chunk_table.indices().zip(reached_by_entry) {
    let own_modules =
      chunk_graph.chunk_table[chunk_idx].modules.iter().copied().collect::<FxHashSet<_>>();
    let mut imports = reached
      .iter()
      .filter(|module_idx| !own_modules.contains(*module_idx))
      .flat_map(|module_idx| chunk_graph.module_to_chunks[*module_idx].iter().copied())
      .filter(|imported| chunk_graph.chunk_table[*imported].kind == ChunkKind::Common)
      .collect::<Vec<ChunkIdx>>();
    imports.sort_unstable();
    imports.dedup();
    chunk_graph.chunk_table[chunk_idx].imports = imports;
  }
}
