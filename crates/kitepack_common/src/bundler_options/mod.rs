pub mod chunking;
pub mod filename_template;
pub mod input_item;
pub mod mode;
pub mod normalized_bundler_options;
pub mod platform;
pub mod resolve_options;
pub mod transform_rule;

use std::path::PathBuf;

use serde::Deserialize;

use crate::{ChunkingKind, InputItem, Mode, Platform, ResolveOptions, TransformRule};

/// User facing options. Every field is optional, `normalize_options` fills in the defaults once
/// per bundler and the result stays immutable for the whole build.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,
  pub mode: Option<Mode>,
  pub platform: Option<Platform>,

  // --- Resolve
  pub resolve: Option<ResolveOptions>,

  // --- Transform
  pub rules: Option<Vec<TransformRule>>,

  // --- Chunking
  pub chunking: Option<ChunkingKind>,
  pub shared_threshold: Option<u32>,

  // --- Output
  pub dir: Option<String>,
  pub entry_filenames: Option<String>,
  pub chunk_filenames: Option<String>,
  pub attached_filenames: Option<String>,

  // --- Scheduling
  pub max_parallel_tasks: Option<usize>,
  pub module_timeout_ms: Option<u64>,
}

impl BundlerOptions {
  pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }
}
