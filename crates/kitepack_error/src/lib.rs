mod build_error;
pub mod error_code;
mod emit_error;
mod resolve_error;
mod transform_error;

pub use crate::{
  build_error::{BuildError, BuildErrorKind},
  emit_error::EmitError,
  resolve_error::ResolveError,
  transform_error::{RuleConflict, TransformError},
};

pub type BuildResult<T> = Result<T, BuildError>;
pub type BundleResult<T> = Result<T, BundleError>;

/// Anything that can stop a `kitepack` invocation.
#[derive(Debug)]
pub enum BundleError {
  Build(BuildError),
  Emit(EmitError),
}

impl BundleError {
  pub fn code(&self) -> &'static str {
    match self {
      Self::Build(err) => err.code(),
      Self::Emit(err) => err.code(),
    }
  }
}

impl std::fmt::Display for BundleError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Build(err) => err.fmt(f),
      Self::Emit(err) => err.fmt(f),
    }
  }
}

impl std::error::Error for BundleError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Build(err) => Some(err),
      Self::Emit(err) => Some(err),
    }
  }
}

impl From<BuildError> for BundleError {
  fn from(err: BuildError) -> Self {
    Self::Build(err)
  }
}

impl From<EmitError> for BundleError {
  fn from(err: EmitError) -> Self {
    Self::Emit(err)
  }
}
