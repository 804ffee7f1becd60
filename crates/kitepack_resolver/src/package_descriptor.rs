use std::path::Path;

use kitepack_fs::FileSystem;
use rustc_hash::FxHashMap;

/// The string valued top level fields of a `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDescriptor {
  fields: FxHashMap<String, String>,
}

impl PackageDescriptor {
  pub fn from_fields<K: Into<String>, V: Into<String>>(
    fields: impl IntoIterator<Item = (K, V)>,
  ) -> Self {
    Self { fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
  }

  /// The value of the first field in `main_fields` the descriptor declares.
  pub fn main<'a>(&'a self, main_fields: &[String]) -> Option<&'a str> {
    main_fields.iter().find_map(|field| self.fields.get(field)).map(String::as_str)
  }
}

/// Finds the package descriptor of a directory.
pub trait PackageDescriptorLookup: Send + Sync {
  fn lookup(&self, fs: &dyn FileSystem, dir: &Path) -> Option<PackageDescriptor>;
}

/// Reads `<dir>/package.json`. A missing, unreadable or malformed file counts as absent.
#[derive(Debug, Default)]
pub struct PackageJsonLookup;

impl PackageDescriptorLookup for PackageJsonLookup {
  fn lookup(&self, fs: &dyn FileSystem, dir: &Path) -> Option<PackageDescriptor> {
    let path = dir.join("package.json");
    if !fs.is_file(&path) {
      return None;
    }

    let json = match fs.read_to_string(&path) {
      Ok(json) => json,
      Err(err) => {
        tracing::warn!(path = %path.display(), %err, "Failed to read package descriptor");
        return None;
      }
    };

    match serde_json::from_str::<serde_json::Value>(&json) {
      Ok(serde_json::Value::Object(map)) => Some(PackageDescriptor {
        fields: map
          .into_iter()
          .filter_map(|(key, value)| match value {
            serde_json::Value::String(value) => Some((key, value)),
            _ => None,
          })
          .collect(),
      }),
      Ok(_) => {
        tracing::warn!(path = %path.display(), "Package descriptor is not a JSON object");
        None
      }
      Err(err) => {
        tracing::warn!(path = %path.display(), %err, "Malformed package descriptor");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use kitepack_fs::MemoryFileSystem;

  use super::{PackageDescriptorLookup, PackageJsonLookup};

  #[test]
  fn reads_string_fields() {
    let fs = MemoryFileSystem::with_files([(
      "/pkg/package.json",
      r#"{ "name": "pkg", "module": "./esm/index.js", "main": "./lib/index.js", "browser": { "fs": false } }"#,
    )])
    .unwrap();

    let descriptor = PackageJsonLookup.lookup(&fs, Path::new("/pkg")).unwrap();
    let fields = |names: &[&str]| names.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(descriptor.main(&fields(&["browser", "module", "main"])), Some("./esm/index.js"));
    assert_eq!(descriptor.main(&fields(&["main"])), Some("./lib/index.js"));
    assert_eq!(descriptor.main(&fields(&["types"])), None);
  }

  #[test]
  fn malformed_descriptor_is_absent() {
    let fs = MemoryFileSystem::with_files([("/pkg/package.json", "{ main: ")]).unwrap();
    assert!(PackageJsonLookup.lookup(&fs, Path::new("/pkg")).is_none());
    assert!(PackageJsonLookup.lookup(&fs, Path::new("/missing")).is_none());
  }
}
