use std::sync::Arc;

use kitepack_common::ModuleLoaderMsg;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::types::{SharedFileSystem, SharedOptions, SharedResolver, SharedTransformRegistry};

/// Used to store common data shared between all tasks.
pub struct TaskContext {
  pub fs: SharedFileSystem,
  pub options: SharedOptions,
  pub resolver: SharedResolver,
  pub registry: SharedTransformRegistry,
  pub tx: tokio::sync::mpsc::Sender<ModuleLoaderMsg>,
  /// Bounds the number of modules processed at the same time.
  pub semaphore: Arc<Semaphore>,
  pub cancel: CancellationToken,
}
