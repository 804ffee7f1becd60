mod module_loader;
mod module_task;
mod scanner;
mod task_context;

use std::sync::Arc;

use arcstr::ArcStr;
use kitepack_error::{BuildError, BuildErrorKind, BuildResult};
use tokio_util::sync::CancellationToken;

use self::module_loader::ModuleLoader;
use crate::{
  module_graph::ModuleGraph,
  types::{SharedFileSystem, SharedOptions, SharedResolver, SharedTransformRegistry},
};

pub struct ScanStage {
  fs: SharedFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  registry: SharedTransformRegistry,
  cancel: CancellationToken,
}

impl ScanStage {
  pub fn new(
    fs: SharedFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    registry: SharedTransformRegistry,
    cancel: CancellationToken,
  ) -> Self {
    Self { fs, options, resolver, registry, cancel }
  }

  #[tracing::instrument(level = "debug", skip_all)]
  pub async fn scan(&self) -> BuildResult<ModuleGraph> {
    if self.cancel.is_cancelled() {
      return Err(BuildError::aborted());
    }

    let mut user_defined_entries = Vec::with_capacity(self.options.input.len());
    for input_item in &self.options.input {
      let resolved_id = self
        .resolver
        .resolve_entry(&input_item.import)
        .map_err(|err| BuildError::new(BuildErrorKind::UnresolvedEntry(err)))?;
      user_defined_entries.push((input_item.name.as_deref().map(ArcStr::from), resolved_id));
    }

    let module_loader = ModuleLoader::new(
      Arc::clone(&self.fs),
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.registry),
      self.cancel.clone(),
    );
    let mut graph = module_loader.fetch_all_modules(user_defined_entries).await?;
    graph.sort_modules();
    Ok(graph)
  }
}
