mod code_splitting;
mod render_chunk;

use std::collections::hash_map::Entry;

use arcstr::ArcStr;
use kitepack_common::{
  ArtifactDescriptor, ArtifactKind, ChunkIdx, NormalizedBundlerOptions, SideArtifactKind,
};
use kitepack_error::EmitError;
use kitepack_utils::{indexmap::FxIndexMap, xxhash::xxhash_hex};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use crate::{chunk_graph::ChunkGraph, module_graph::ModuleGraph};

pub struct GenerateStage<'a> {
  graph: &'a ModuleGraph,
  options: &'a NormalizedBundlerOptions,
}

impl<'a> GenerateStage<'a> {
  pub fn new(graph: &'a ModuleGraph, options: &'a NormalizedBundlerOptions) -> Self {
    Self { graph, options }
  }

  pub fn plan(&self) -> ChunkGraph {
    self.generate_chunks()
  }

  /// Entry chunks first, then common chunks, then assets. Sorted by file name within each kind.
  #[tracing::instrument(level = "debug", skip_all)]
  pub fn generate(&self) -> Result<Vec<ArtifactDescriptor>, EmitError> {
    let chunk_graph = self.generate_chunks();

    let mut artifacts = self.render_chunks(&chunk_graph);
    artifacts.extend(self.render_attached_artifacts(&chunk_graph));
    artifacts.extend(self.collect_assets());

    let mut artifacts = dedupe_by_filename(artifacts)?;
    artifacts.sort_by(|a, b| (a.kind, &a.filename).cmp(&(b.kind, &b.filename)));

    tracing::debug!(artifacts = artifacts.len(), "Artifacts generated");
    Ok(artifacts)
  }

  fn render_chunks(&self, chunk_graph: &ChunkGraph) -> Vec<ArtifactDescriptor> {
    let mut artifacts = chunk_graph
      .chunk_table
      .iter()
      .map(|chunk| {
        let content = self.render_chunk(chunk).into_bytes();
        let content_hash = xxhash_hex(&content);
        let filename =
          chunk.filename_template(self.options).render(&chunk.name, "js", &content_hash);
        ArtifactDescriptor {
          filename,
          kind: if chunk.is_entry() { ArtifactKind::EntryChunk } else { ArtifactKind::CommonChunk },
          content,
          content_hash,
          source_chunk_name: Some(ArcStr::clone(&chunk.name)),
          imports: vec![],
          modules: chunk
            .modules
            .iter()
            .map(|module_idx| self.graph.modules[*module_idx].stable_id.clone())
            .collect(),
        }
      })
      .collect::<IndexVec<ChunkIdx, _>>();

    let filenames =
      artifacts.iter().map(|artifact| artifact.filename.clone()).collect::<IndexVec<ChunkIdx, _>>();
    for (chunk_idx, chunk) in chunk_graph.chunk_table.iter_enumerated() {
      artifacts[chunk_idx].imports =
        chunk.imports.iter().map(|imported| filenames[*imported].clone()).collect();
    }

    artifacts.into_iter().collect()
  }

  /// Merges the chunk attached side artifacts of each chunk, one file per extension. Modules
  /// contribute in execution order so imported stylesheets come first.
  fn render_attached_artifacts(&self, chunk_graph: &ChunkGraph) -> Vec<ArtifactDescriptor> {
    let mut artifacts = vec![];
    for chunk in &chunk_graph.chunk_table {
      let mut modules_in_exec_order =
        chunk.modules.iter().map(|module_idx| &self.graph.modules[*module_idx]).collect::<Vec<_>>();
      modules_in_exec_order.sort_by_key(|module| module.exec_order);

      let mut by_extension: FxIndexMap<ArcStr, (Vec<u8>, Vec<String>)> = FxIndexMap::default();
      for module in modules_in_exec_order {
        for side_artifact in &module.side_artifacts {
          if side_artifact.kind != SideArtifactKind::ChunkAttached {
            continue;
          }
          let (content, modules) =
            by_extension.entry(ArcStr::clone(&side_artifact.extension)).or_default();
          if !content.is_empty() && !content.ends_with(b"\n") {
            content.push(b'\n');
          }
          content.extend_from_slice(&side_artifact.content);
          if !modules.contains(&module.stable_id) {
            modules.push(module.stable_id.clone());
          }
        }
      }

      for (extension, (content, modules)) in by_extension {
        let content_hash = xxhash_hex(&content);
        let filename =
          self.options.attached_filenames.render(&chunk.name, &extension, &content_hash);
        artifacts.push(ArtifactDescriptor {
          filename,
          kind: ArtifactKind::Asset,
          content,
          content_hash,
          source_chunk_name: Some(ArcStr::clone(&chunk.name)),
          imports: vec![],
          modules,
        });
      }
    }
    artifacts
  }

  /// Standalone assets keep the file name their transform picked.
  fn collect_assets(&self) -> Vec<ArtifactDescriptor> {
    self
      .graph
      .modules
      .iter()
      .flat_map(|module| {
        module.side_artifacts.iter().filter_map(|side_artifact| {
          let SideArtifactKind::Asset { filename } = &side_artifact.kind else {
            return None;
          };
          Some(ArtifactDescriptor {
            filename: filename.clone(),
            kind: ArtifactKind::Asset,
            content: side_artifact.content.clone(),
            content_hash: xxhash_hex(&side_artifact.content),
            source_chunk_name: None,
            imports: vec![],
            modules: vec![module.stable_id.clone()],
          })
        })
      })
      .collect()
  }
}

/// The same file emitted twice with identical content is kept once. Different content under one
/// name is an error.
fn dedupe_by_filename(
  artifacts: Vec<ArtifactDescriptor>,
) -> Result<Vec<ArtifactDescriptor>, EmitError> {
  let mut deduped: Vec<ArtifactDescriptor> = Vec::with_capacity(artifacts.len());
  let mut index_by_filename: FxHashMap<String, usize> = FxHashMap::default();
  for artifact in artifacts {
    match index_by_filename.entry(artifact.filename.clone()) {
      Entry::Occupied(occ) => {
        let existing = &mut deduped[*occ.get()];
        if existing.content != artifact.content {
          return Err(EmitError::new(
            artifact.filename,
            std::io::Error::other("another artifact with different content has the same name"),
          ));
        }
        for module in artifact.modules {
          if !existing.modules.contains(&module) {
            existing.modules.push(module);
          }
        }
      }
      Entry::Vacant(vac) => {
        vac.insert(deduped.len());
        deduped.push(artifact);
      }
    }
  }
  Ok(deduped)
}

#[cfg(test)]
mod tests {
  use kitepack_common::{ArtifactDescriptor, ArtifactKind};

  use super::dedupe_by_filename;

  fn asset(filename: &str, content: &str, module: &str) -> ArtifactDescriptor {
    ArtifactDescriptor {
      filename: filename.to_string(),
      kind: ArtifactKind::Asset,
      content: content.as_bytes().to_vec(),
      content_hash: String::new(),
      source_chunk_name: None,
      imports: vec![],
      modules: vec![module.to_string()],
    }
  }

  #[test]
  fn identical_assets_are_emitted_once() {
    let artifacts = dedupe_by_filename(vec![
      asset("logo.png", "png", "src/a.js"),
      asset("logo.png", "png", "src/b.js"),
      asset("icon.png", "icon", "src/a.js"),
    ])
    .unwrap();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].modules, ["src/a.js", "src/b.js"]);
  }

  #[test]
  fn conflicting_content_is_an_error() {
    let err = dedupe_by_filename(vec![
      asset("logo.png", "a", "src/a.js"),
      asset("logo.png", "b", "src/b.js"),
    ])
    .unwrap_err();
    assert_eq!(err.filename, "logo.png");
    assert_eq!(err.code(), "EMIT_FAILED");
  }
}
