use arcstr::ArcStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactKind {
  EntryChunk,
  CommonChunk,
  Asset,
}

/// One emitted file.
#[derive(Debug, Clone)]
pub struct ArtifactDescriptor {
  /// Relative to the output directory, `/` separated.
  pub filename: String,
  pub kind: ArtifactKind,
  pub content: Vec<u8>,
  pub content_hash: String,
  pub source_chunk_name: Option<ArcStr>,
  /// File names of the chunks that must be loaded before this one.
  pub imports: Vec<String>,
  /// Stable ids of the modules rendered into this file.
  pub modules: Vec<String>,
}

impl ArtifactDescriptor {
  pub fn content_as_str(&self) -> Option<&str> {
    std::str::from_utf8(&self.content).ok()
  }

  pub fn is_chunk(&self) -> bool {
    matches!(self.kind, ArtifactKind::EntryChunk | ArtifactKind::CommonChunk)
  }
}
