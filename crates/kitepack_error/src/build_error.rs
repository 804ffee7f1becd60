use std::{fmt::Display, time::Duration};

use crate::{error_code, ResolveError, RuleConflict, TransformError};

#[derive(Debug)]
pub enum BuildErrorKind {
  UnresolvedEntry(ResolveError),
  Resolve(ResolveError),
  Load { source: std::io::Error },
  Scan { source: anyhow::Error },
  Transform(TransformError),
  RuleConflict(RuleConflict),
  Timeout { elapsed: Duration },
  Aborted,
  InvalidOption(String),
}

impl BuildErrorKind {
  pub fn code(&self) -> &'static str {
    match self {
      Self::UnresolvedEntry(_) => error_code::UNRESOLVED_ENTRY,
      Self::Resolve(err) => err.code(),
      Self::Load { .. } => error_code::LOAD_FAILED,
      Self::Scan { .. } => error_code::SCAN_FAILED,
      Self::Transform(err) => err.code(),
      Self::RuleConflict(err) => err.code(),
      Self::Timeout { .. } => error_code::MODULE_TIMEOUT,
      Self::Aborted => error_code::ABORTED,
      Self::InvalidOption(_) => error_code::INVALID_OPTION,
    }
  }
}

impl Display for BuildErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::UnresolvedEntry(err) => write!(f, "Could not resolve entry module: {err}"),
      Self::Resolve(err) => err.fmt(f),
      Self::Load { source } => write!(f, "Could not load module: {source}"),
      Self::Scan { source } => write!(f, "Could not scan module dependencies: {source}"),
      Self::Transform(err) => err.fmt(f),
      Self::RuleConflict(err) => err.fmt(f),
      Self::Timeout { elapsed } => {
        write!(f, "Module processing did not finish within {} ms", elapsed.as_millis())
      }
      Self::Aborted => f.write_str("Build aborted"),
      Self::InvalidOption(msg) => write!(f, "Invalid option: {msg}"),
    }
  }
}

/// The fatal error of one build. Only the first failure in discovery order is kept.
#[derive(Debug)]
pub struct BuildError {
  pub kind: BuildErrorKind,
  /// Stable id of the module being processed when the failure happened.
  pub module_id: Option<String>,
  /// The entry module id followed by every specifier written on the way to `module_id`.
  pub import_chain: Vec<String>,
}

impl BuildError {
  pub fn new(kind: BuildErrorKind) -> Self {
    Self { kind, module_id: None, import_chain: vec![] }
  }

  pub fn invalid_option(msg: impl Into<String>) -> Self {
    Self::new(BuildErrorKind::InvalidOption(msg.into()))
  }

  pub fn aborted() -> Self {
    Self::new(BuildErrorKind::Aborted)
  }

  #[must_use]
  pub fn with_module(mut self, module_id: impl Into<String>) -> Self {
    self.module_id = Some(module_id.into());
    self
  }

  #[must_use]
  pub fn with_import_chain(mut self, import_chain: Vec<String>) -> Self {
    self.import_chain = import_chain;
    self
  }

  pub fn code(&self) -> &'static str {
    self.kind.code()
  }
}

impl Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.kind.fmt(f)?;
    if let Some(module_id) = &self.module_id {
      write!(f, "\n  in {module_id}")?;
    }
    if self.import_chain.len() > 1 {
      write!(f, "\n  imported via {}", self.import_chain.join(" -> "))?;
    }
    Ok(())
  }
}

impl std::error::Error for BuildError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      BuildErrorKind::UnresolvedEntry(err) | BuildErrorKind::Resolve(err) => Some(err),
      BuildErrorKind::Load { source } => Some(source),
      BuildErrorKind::Scan { source } => Some(source.as_ref()),
      BuildErrorKind::Transform(err) => Some(err),
      BuildErrorKind::RuleConflict(err) => Some(err),
      BuildErrorKind::Timeout { .. }
      | BuildErrorKind::Aborted
      | BuildErrorKind::InvalidOption(_) => None,
    }
  }
}

impl From<BuildErrorKind> for BuildError {
  fn from(kind: BuildErrorKind) -> Self {
    Self::new(kind)
  }
}

#[cfg(test)]
mod tests {
  use super::{BuildError, BuildErrorKind};
  use crate::ResolveError;

  #[test]
  fn display_includes_module_and_chain() {
    let mut resolve = ResolveError::new("./missing", "/project/src");
    resolve.searched_paths.push("/project/src/missing".into());
    let err = BuildError::new(BuildErrorKind::Resolve(resolve))
      .with_module("src/b.js")
      .with_import_chain(vec!["src/a.js".into(), "./b".into()]);

    let message = err.to_string();
    assert!(message.starts_with("Could not resolve \"./missing\" from \"/project/src\""));
    assert!(message.contains("\n  /project/src/missing"));
    assert!(message.contains("in src/b.js"));
    assert!(message.ends_with("imported via src/a.js -> ./b"));
    assert_eq!(err.code(), "UNRESOLVED_IMPORT");
  }

  #[test]
  fn codes_are_stable() {
    assert_eq!(BuildError::aborted().code(), "ABORTED");
    assert_eq!(BuildError::invalid_option("bad").code(), "INVALID_OPTION");
  }
}
