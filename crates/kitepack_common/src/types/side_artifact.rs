use arcstr::ArcStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideArtifactKind {
  /// A standalone file whose name the transform already decided.
  Asset { filename: String },
  /// Merged with the same-extension artifacts of every chunk holding the module.
  ChunkAttached,
}

/// Extra output produced by a transform next to the module code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideArtifact {
  pub name: ArcStr,
  /// Without the leading dot.
  pub extension: ArcStr,
  pub content: Vec<u8>,
  pub kind: SideArtifactKind,
}

impl SideArtifact {
  pub fn asset(
    name: impl Into<ArcStr>,
    extension: impl Into<ArcStr>,
    filename: String,
    content: Vec<u8>,
  ) -> Self {
    Self {
      name: name.into(),
      extension: extension.into(),
      content,
      kind: SideArtifactKind::Asset { filename },
    }
  }

  pub fn chunk_attached(
    name: impl Into<ArcStr>,
    extension: impl Into<ArcStr>,
    content: Vec<u8>,
  ) -> Self {
    Self {
      name: name.into(),
      extension: extension.into(),
      content,
      kind: SideArtifactKind::ChunkAttached,
    }
  }
}
