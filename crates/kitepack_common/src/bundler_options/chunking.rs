use serde::Deserialize;

pub const DEFAULT_SHARED_THRESHOLD: u32 = 2;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingKind {
  #[default]
  Single,
  Shared,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChunkingStrategy {
  /// One self-contained chunk per entry. Modules reachable from several entries are duplicated.
  #[default]
  Single,
  /// Modules reached by at least `threshold` entries move into common chunks.
  Shared { threshold: u32 },
}
