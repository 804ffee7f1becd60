mod bundler;
mod chunk_graph;
mod generate_stage;
mod module_graph;
mod scan_stage;
mod types;
mod utils;

pub use crate::{
  bundler::{Bundler, BundlerBuilder},
  chunk_graph::ChunkGraph,
  module_graph::ModuleGraph,
  types::bundle_output::BundleOutput,
};
pub use kitepack_common::*;
pub use kitepack_error::{
  error_code, BuildError, BuildErrorKind, BuildResult, BundleError, BundleResult, EmitError,
  ResolveError, RuleConflict, TransformError,
};
pub use kitepack_fs::{FileSystem, OsFileSystem};
pub use kitepack_plugin::{
  SharedTransform, Transform, TransformContext, TransformName, TransformOutput,
};
pub use kitepack_resolver::{PackageDescriptor, PackageDescriptorLookup};
pub use tokio_util::sync::CancellationToken;
