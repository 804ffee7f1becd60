mod bundler_options;
mod chunk;
mod module;
mod module_loader;
mod types;

pub use bundler_options::{
  chunking::{ChunkingKind, ChunkingStrategy, DEFAULT_SHARED_THRESHOLD},
  filename_template::FilenameTemplate,
  input_item::InputItem,
  mode::Mode,
  normalized_bundler_options::NormalizedBundlerOptions,
  platform::Platform,
  resolve_options::ResolveOptions,
  transform_rule::{TransformRule, TransformSpec},
  BundlerOptions,
};

pub use crate::{
  chunk::{Chunk, ChunkKind},
  module::ModuleRecord,
  module_loader::{ModuleLoaderMsg, ModuleTaskResult, ResolvedDependency},
  types::{
    artifact_descriptor::{ArtifactDescriptor, ArtifactKind},
    edge::Edge,
    entry_point::EntryPoint,
    import_kind::ImportKind,
    import_record::{ImportRecord, RawImportRecord},
    module_id::ModuleId,
    raw_idx::{ChunkIdx, ModuleIdx},
    resolved_id::ResolvedId,
    side_artifact::{SideArtifact, SideArtifactKind},
  },
};
