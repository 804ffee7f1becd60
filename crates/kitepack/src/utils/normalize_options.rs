use std::{num::NonZeroUsize, time::Duration};

use kitepack_common::{
  BundlerOptions, ChunkingKind, ChunkingStrategy, FilenameTemplate, NormalizedBundlerOptions,
  DEFAULT_SHARED_THRESHOLD,
};
use kitepack_error::{BuildError, BuildResult};
use kitepack_resolver::ResolverOptions;
use sugar_path::SugarPath;

const DEFAULT_MODULE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct NormalizeOptionsReturn {
  pub options: NormalizedBundlerOptions,
  pub resolve_options: ResolverOptions,
}

pub fn normalize_options(raw_options: BundlerOptions) -> BuildResult<NormalizeOptionsReturn> {
  let input = raw_options.input.unwrap_or_default();
  if input.is_empty() {
    return Err(BuildError::invalid_option("`input` must contain at least one entry"));
  }

  let mode = raw_options.mode.unwrap_or_default();
  let platform = raw_options.platform.unwrap_or_default();

  let cwd = match raw_options.cwd {
    Some(cwd) => cwd.absolutize(),
    None => std::env::current_dir().map_err(|err| {
      BuildError::invalid_option(format!("`cwd` is not set and the current dir is unknown: {err}"))
    })?,
  };

  let resolve = raw_options.resolve.unwrap_or_default();
  let resolve_options = ResolverOptions::new(&resolve, platform);

  let chunking = match raw_options.chunking.unwrap_or_default() {
    ChunkingKind::Single => ChunkingStrategy::Single,
    ChunkingKind::Shared => {
      let threshold = raw_options.shared_threshold.unwrap_or(DEFAULT_SHARED_THRESHOLD);
      if threshold == 0 {
        return Err(BuildError::invalid_option("`sharedThreshold` must be at least 1"));
      }
      ChunkingStrategy::Shared { threshold }
    }
  };

  let template = |name: &str, value: Option<String>, default: &str| {
    let template = FilenameTemplate::new(value.unwrap_or_else(|| default.to_string()));
    template
      .validate()
      .map_err(|msg| BuildError::invalid_option(format!("`{name}` is invalid: {msg}")))?;
    Ok::<_, BuildError>(template)
  };
  let entry_filenames =
    template("entryFilenames", raw_options.entry_filenames, mode.default_entry_filenames())?;
  let chunk_filenames =
    template("chunkFilenames", raw_options.chunk_filenames, mode.default_chunk_filenames())?;
  let attached_filenames = template(
    "attachedFilenames",
    raw_options.attached_filenames,
    mode.default_attached_filenames(),
  )?;

  let max_parallel_tasks = match raw_options.max_parallel_tasks {
    Some(0) => return Err(BuildError::invalid_option("`maxParallelTasks` must be at least 1")),
    Some(value) => value,
    None => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
  };

  let module_timeout = match raw_options.module_timeout_ms {
    Some(0) => return Err(BuildError::invalid_option("`moduleTimeoutMs` must be at least 1")),
    Some(ms) => Duration::from_millis(ms),
    None => DEFAULT_MODULE_TIMEOUT,
  };

  let normalized = NormalizedBundlerOptions {
    input,
    cwd,
    mode,
    platform,
    resolve,
    rules: raw_options.rules.unwrap_or_default(),
    chunking,
    dir: raw_options.dir.unwrap_or_else(|| "dist".to_string()),
    entry_filenames,
    chunk_filenames,
    attached_filenames,
    max_parallel_tasks,
    module_timeout,
  };

  Ok(NormalizeOptionsReturn { options: normalized, resolve_options })
}
