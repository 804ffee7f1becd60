use serde::Deserialize;

/// Build mode. Threaded through options explicitly, never read from the environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  Development,
  #[default]
  Production,
}

impl Mode {
  pub fn is_development(self) -> bool {
    matches!(self, Self::Development)
  }

  pub fn default_entry_filenames(self) -> &'static str {
    match self {
      Self::Development => "[name].js",
      Self::Production => "[name].[hash:8].js",
    }
  }

  pub fn default_chunk_filenames(self) -> &'static str {
    match self {
      Self::Development => "[name].chunk.js",
      Self::Production => "[name].[hash:8].chunk.js",
    }
  }

  pub fn default_attached_filenames(self) -> &'static str {
    match self {
      Self::Development => "[name].[ext]",
      Self::Production => "[name].[hash:8].[ext]",
    }
  }
}
