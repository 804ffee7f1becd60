pub mod bundle_output;

use std::sync::Arc;

use kitepack_common::{Chunk, ChunkIdx, ModuleIdx, ModuleRecord, NormalizedBundlerOptions};
use kitepack_fs::FileSystem;
use kitepack_plugin::TransformRegistry;
use kitepack_resolver::Resolver;
use oxc_index::IndexVec;

pub type IndexModules = IndexVec<ModuleIdx, ModuleRecord>;
pub type IndexChunks = IndexVec<ChunkIdx, Chunk>;

pub type SharedFileSystem = Arc<dyn FileSystem>;
pub type SharedOptions = Arc<NormalizedBundlerOptions>;
pub type SharedResolver = Arc<Resolver<SharedFileSystem>>;
pub type SharedTransformRegistry = Arc<TransformRegistry>;
