use std::{
  ffi::OsString,
  path::{Path, PathBuf},
};

use arcstr::ArcStr;
use itertools::Itertools;
use kitepack_common::ResolvedId;
use kitepack_error::ResolveError;
use kitepack_fs::FileSystem;
use sugar_path::SugarPath;

use crate::{PackageDescriptorLookup, PackageJsonLookup, ResolverOptions};

/// Maps a specifier written in `from_dir` to an absolute file path.
///
/// Only existence checks and descriptor reads touch the file system and nothing is cached
/// between calls.
pub struct Resolver<F: FileSystem> {
  cwd: PathBuf,
  options: ResolverOptions,
  fs: F,
  package_lookup: Box<dyn PackageDescriptorLookup>,
}

impl<F: FileSystem> std::fmt::Debug for Resolver<F> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Resolver").field("cwd", &self.cwd).field("options", &self.options).finish()
  }
}

impl<F: FileSystem> Resolver<F> {
  pub fn new(cwd: PathBuf, options: ResolverOptions, fs: F) -> Self {
    Self { cwd, options, fs, package_lookup: Box::new(PackageJsonLookup) }
  }

  #[must_use]
  pub fn with_package_lookup(mut self, package_lookup: Box<dyn PackageDescriptorLookup>) -> Self {
    self.package_lookup = package_lookup;
    self
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }

  pub fn options(&self) -> &ResolverOptions {
    &self.options
  }

  pub fn resolve(&self, specifier: &str, from_dir: &Path) -> Result<ResolvedId, ResolveError> {
    let mut searched_paths = vec![];
    let resolved = match self.options.alias.apply(specifier) {
      Some(replaced) => {
        tracing::trace!(specifier, %replaced, "Alias applied");
        self.resolve_without_alias(&replaced, from_dir, &mut searched_paths)
      }
      None => self.resolve_without_alias(specifier, from_dir, &mut searched_paths),
    };

    match resolved {
      Some(path) => Ok(ResolvedId::new(path_to_arcstr(&path))),
      None => Err(ResolveError {
        specifier: specifier.to_string(),
        from_dir: from_dir.to_path_buf(),
        searched_paths: searched_paths.into_iter().unique().collect(),
      }),
    }
  }

  /// Entries are resolved from `cwd`. A bare entry such as `main` that is not a package falls
  /// back to `<cwd>/main`.
  pub fn resolve_entry(&self, specifier: &str) -> Result<ResolvedId, ResolveError> {
    let mut err = match self.resolve(specifier, &self.cwd) {
      Ok(resolved) => return Ok(resolved),
      Err(err) => err,
    };

    if !is_path_like(specifier) && self.options.alias.apply(specifier).is_none() {
      let mut searched_paths = vec![];
      let path = self.cwd.join(specifier).normalize();
      if let Some(path) = self.resolve_path(&path, &mut searched_paths) {
        return Ok(ResolvedId::new(path_to_arcstr(&path)));
      }
      err.searched_paths.extend(searched_paths);
    }

    Err(err)
  }

  fn resolve_without_alias(
    &self,
    specifier: &str,
    from_dir: &Path,
    searched_paths: &mut Vec<PathBuf>,
  ) -> Option<PathBuf> {
    if is_path_like(specifier) {
      let path = from_dir.join(specifier).normalize();
      self.resolve_path(&path, searched_paths)
    } else {
      self.resolve_from_modules(specifier, from_dir, searched_paths)
    }
  }

  fn resolve_path(&self, path: &Path, searched_paths: &mut Vec<PathBuf>) -> Option<PathBuf> {
    self
      .load_as_file(path, searched_paths)
      .or_else(|| self.load_as_directory(path, searched_paths))
  }

  fn resolve_from_modules(
    &self,
    specifier: &str,
    from_dir: &Path,
    searched_paths: &mut Vec<PathBuf>,
  ) -> Option<PathBuf> {
    let (absolute, names): (Vec<_>, Vec<_>) =
      self.options.modules.iter().map(Path::new).partition(|dir| dir.is_absolute());

    for name in names {
      for dir in from_dir.ancestors() {
        if dir.file_name().is_some_and(|file_name| Path::new(file_name) == name) {
          continue;
        }
        let modules_dir = dir.join(name);
        if !self.fs.is_dir(&modules_dir) {
          continue;
        }
        let path = modules_dir.join(specifier).normalize();
        if let Some(path) = self.resolve_path(&path, searched_paths) {
          return Some(path);
        }
      }
    }

    absolute.into_iter().find_map(|modules_dir| {
      self.resolve_path(&modules_dir.join(specifier).normalize(), searched_paths)
    })
  }

  /// The exact path, then the path with each extension appended.
  fn load_as_file(&self, path: &Path, searched_paths: &mut Vec<PathBuf>) -> Option<PathBuf> {
    searched_paths.push(path.to_path_buf());
    if self.fs.is_file(path) {
      return Some(path.to_path_buf());
    }

    self.options.extensions.iter().find_map(|ext| {
      let mut candidate = OsString::from(path.as_os_str());
      candidate.push(ext);
      let candidate = PathBuf::from(candidate);
      searched_paths.push(candidate.clone());
      self.fs.is_file(&candidate).then_some(candidate)
    })
  }

  /// The package descriptor's main entry, then `index` with each extension.
  fn load_as_directory(&self, dir: &Path, searched_paths: &mut Vec<PathBuf>) -> Option<PathBuf> {
    if !self.fs.is_dir(dir) {
      return None;
    }

    if let Some(descriptor) = self.package_lookup.lookup(&self.fs, dir) {
      if let Some(main) = descriptor.main(&self.options.main_fields) {
        let main_path = dir.join(main).normalize();
        if let Some(path) = self.load_as_file(&main_path, searched_paths) {
          return Some(path);
        }
        if self.fs.is_dir(&main_path) {
          if let Some(path) = self.load_index(&main_path, searched_paths) {
            return Some(path);
          }
        }
      }
    }

    self.load_index(dir, searched_paths)
  }

  fn load_index(&self, dir: &Path, searched_paths: &mut Vec<PathBuf>) -> Option<PathBuf> {
    self.options.extensions.iter().find_map(|ext| {
      let candidate = dir.join(format!("index{ext}"));
      searched_paths.push(candidate.clone());
      self.fs.is_file(&candidate).then_some(candidate)
    })
  }
}

fn is_path_like(specifier: &str) -> bool {
  matches!(specifier, "." | "..")
    || specifier.starts_with("./")
    || specifier.starts_with("../")
    || Path::new(specifier).is_absolute()
}

fn path_to_arcstr(path: &Path) -> ArcStr {
  path.to_string_lossy().as_ref().into()
}

#[cfg(test)]
mod tests {
  use std::path::{Path, PathBuf};

  use kitepack_common::{Platform, ResolveOptions};
  use kitepack_fs::MemoryFileSystem;

  use crate::{AliasTable, Resolver, ResolverOptions};

  fn project() -> MemoryFileSystem {
    MemoryFileSystem::with_files([
      ("/project/src/index.js", ""),
      ("/project/src/utils.ts", ""),
      ("/project/src/ui/button.jsx", ""),
      ("/project/src/components/button.js", ""),
      ("/project/src/lib/index.js", ""),
      ("/project/node_modules/left-pad/package.json", r#"{ "main": "./lib/pad.js" }"#),
      ("/project/node_modules/left-pad/lib/pad.js", ""),
      (
        "/project/node_modules/dual/package.json",
        r#"{ "main": "./cjs.js", "module": "./esm.js", "browser": "./browser.js" }"#,
      ),
      ("/project/node_modules/dual/cjs.js", ""),
      ("/project/node_modules/dual/esm.js", ""),
      ("/project/node_modules/dual/browser.js", ""),
      ("/project/node_modules/broken/package.json", "{ not json"),
      ("/project/node_modules/broken/index.js", ""),
      ("/vendor/shared/theme.js", ""),
    ])
    .unwrap()
  }

  fn resolver(options: ResolverOptions) -> Resolver<MemoryFileSystem> {
    Resolver::new(PathBuf::from("/project"), options, project())
  }

  fn resolve(resolver: &Resolver<MemoryFileSystem>, specifier: &str) -> String {
    resolver.resolve(specifier, Path::new("/project/src")).unwrap().id.to_string()
  }

  #[test]
  fn relative_specifiers_probe_extensions_and_index() {
    let resolver = resolver(ResolverOptions::default());
    assert_eq!(resolve(&resolver, "./index.js"), "/project/src/index.js");
    assert_eq!(resolve(&resolver, "./utils"), "/project/src/utils.ts");
    assert_eq!(resolve(&resolver, "./lib"), "/project/src/lib/index.js");
    assert_eq!(resolve(&resolver, "."), "/project/src/index.js");
    assert_eq!(resolve(&resolver, "/project/src/ui/button"), "/project/src/ui/button.jsx");
  }

  #[test]
  fn alias_longest_prefix() {
    let options = ResolverOptions {
      alias: AliasTable::new([("@", "/project/src"), ("@/components", "/project/src/ui")]),
      ..ResolverOptions::default()
    };
    let resolver = resolver(options);
    assert_eq!(resolve(&resolver, "@/components/button"), "/project/src/ui/button.jsx");
    assert_eq!(resolve(&resolver, "@/utils"), "/project/src/utils.ts");
  }

  #[test]
  fn alias_replacement_is_resolved_relative_to_importer() {
    let options = ResolverOptions {
      alias: AliasTable::new([("#theme", "./ui/button")]),
      ..ResolverOptions::default()
    };
    assert_eq!(resolve(&resolver(options), "#theme"), "/project/src/ui/button.jsx");
  }

  #[test]
  fn bare_specifiers_use_package_main_fields() {
    let browser = resolver(ResolverOptions::new(&ResolveOptions::default(), Platform::Browser));
    assert_eq!(resolve(&browser, "left-pad"), "/project/node_modules/left-pad/lib/pad.js");
    assert_eq!(resolve(&browser, "dual"), "/project/node_modules/dual/browser.js");

    let node = resolver(ResolverOptions::new(&ResolveOptions::default(), Platform::Node));
    assert_eq!(resolve(&node, "dual"), "/project/node_modules/dual/cjs.js");

    assert_eq!(resolve(&node, "broken"), "/project/node_modules/broken/index.js");
    assert_eq!(resolve(&node, "dual/esm"), "/project/node_modules/dual/esm.js");
  }

  #[test]
  fn absolute_module_directories_are_searched_last() {
    let options = ResolverOptions::new(
      &ResolveOptions {
        modules: Some(vec!["node_modules".to_string(), "/vendor".to_string()]),
        ..ResolveOptions::default()
      },
      Platform::Browser,
    );
    assert_eq!(resolve(&resolver(options), "shared/theme"), "/vendor/shared/theme.js");
  }

  #[test]
  fn unresolved_specifier_lists_searched_paths() {
    let resolver = resolver(ResolverOptions {
      extensions: vec![".js".to_string(), ".ts".to_string()],
      ..ResolverOptions::default()
    });
    let err = resolver.resolve("./missing", Path::new("/project/src")).unwrap_err();
    assert_eq!(err.specifier, "./missing");
    assert_eq!(err.from_dir, Path::new("/project/src"));
    assert_eq!(
      err.searched_paths,
      ["/project/src/missing", "/project/src/missing.js", "/project/src/missing.ts"]
        .map(PathBuf::from)
    );
  }

  #[test]
  fn bare_entry_falls_back_to_cwd() {
    let resolver = resolver(ResolverOptions::default());
    assert_eq!(resolver.resolve_entry("src/index").unwrap().id, "/project/src/index.js");
    assert!(resolver.resolve_entry("src/nope").is_err());
  }
}
