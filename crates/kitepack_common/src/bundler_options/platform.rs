use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  /// Represents the Node.js environment.
  Node,
  /// Represents the Browser environment.
  #[default]
  Browser,
  /// Represents a platform-agnostic environment.
  Neutral,
}
