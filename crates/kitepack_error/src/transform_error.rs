use std::fmt::Display;

use crate::error_code;

/// A transform rejected its input.
#[derive(Debug)]
pub struct TransformError {
  pub transform: String,
  pub rule: String,
  pub source: anyhow::Error,
}

impl TransformError {
  pub fn code(&self) -> &'static str {
    error_code::TRANSFORM_FAILED
  }
}

impl Display for TransformError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Transform \"{}\" (rule \"{}\") failed: {}", self.transform, self.rule, self.source)
  }
}

impl std::error::Error for TransformError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(self.source.as_ref())
  }
}

/// Two rules of the same include/exclude dispatch group both claim a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConflict {
  pub path: String,
  pub first: String,
  pub second: String,
}

impl RuleConflict {
  pub fn code(&self) -> &'static str {
    error_code::RULE_CONFLICT
  }
}

impl Display for RuleConflict {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "Rules \"{}\" and \"{}\" share a test pattern and both match \"{}\"; their include/exclude conditions must not overlap",
      self.first, self.second, self.path
    )
  }
}

impl std::error::Error for RuleConflict {}
