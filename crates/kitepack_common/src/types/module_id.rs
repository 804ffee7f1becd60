use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

/// The resolved absolute path of a module, the key of the module table.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  pub fn inner(&self) -> &ArcStr {
    &self.0
  }

  /// Relative to `cwd` with `/` separators, used in output and diagnostics.
  pub fn stabilize(&self, cwd: &Path) -> String {
    stabilize_module_id(&self.0, cwd)
  }
}

pub fn stabilize_module_id(module_id: &str, cwd: &Path) -> String {
  if module_id.as_path().is_absolute() {
    module_id.relative(cwd).to_slash_lossy().into_owned()
  } else {
    module_id.to_string()
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::ModuleId;

  #[test]
  fn stabilize_relative_to_cwd() {
    let id = ModuleId::new("/project/src/a.js");
    assert_eq!(id.stabilize(Path::new("/project")), "src/a.js");
    assert_eq!(id.stabilize(Path::new("/project/lib")), "../src/a.js");
  }
}
