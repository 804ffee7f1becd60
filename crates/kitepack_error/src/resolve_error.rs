use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use crate::error_code;

/// A specifier that matched no file. `searched_paths` lists every candidate, in probing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
  pub specifier: String,
  pub from_dir: PathBuf,
  pub searched_paths: Vec<PathBuf>,
}

impl ResolveError {
  pub fn new(specifier: impl Into<String>, from_dir: impl AsRef<Path>) -> Self {
    Self {
      specifier: specifier.into(),
      from_dir: from_dir.as_ref().to_path_buf(),
      searched_paths: vec![],
    }
  }

  pub fn code(&self) -> &'static str {
    error_code::UNRESOLVED_IMPORT
  }
}

impl Display for ResolveError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Could not resolve \"{}\" from \"{}\"", self.specifier, self.from_dir.display())?;
    if !self.searched_paths.is_empty() {
      f.write_str(", searched:")?;
      for path in &self.searched_paths {
        write!(f, "\n  {}", path.display())?;
      }
    }
    Ok(())
  }
}

impl std::error::Error for ResolveError {}
