use std::fmt::Display;

use crate::error_code;

/// Failure while producing or writing an output artifact.
#[derive(Debug)]
pub struct EmitError {
  pub filename: String,
  pub source: std::io::Error,
}

impl EmitError {
  pub fn new(filename: impl Into<String>, source: std::io::Error) -> Self {
    Self { filename: filename.into(), source }
  }

  pub fn code(&self) -> &'static str {
    error_code::EMIT_FAILED
  }
}

impl Display for EmitError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Failed to emit \"{}\": {}", self.filename, self.source)
  }
}

impl std::error::Error for EmitError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(&self.source)
  }
}
