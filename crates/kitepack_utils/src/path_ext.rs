use std::{borrow::Cow, ffi::OsStr, path::Path};

use sugar_path::SugarPath;

pub trait PathExt {
  fn expect_to_slash(&self) -> String;

  fn representative_file_name(&self) -> Cow<str>;

  /// Extension without the leading dot, empty when there is none.
  fn extension_str(&self) -> &str;
}

impl PathExt for Path {
  fn expect_to_slash(&self) -> String {
    self
      .to_slash()
      .unwrap_or_else(|| panic!("Failed to convert {:?} to slash str", self.display()))
      .into_owned()
  }

  /// It doesn't ensure the file name is a valid identifier in JS.
  fn representative_file_name(&self) -> Cow<str> {
    let file_name =
      self.file_stem().map_or_else(|| self.to_string_lossy(), |stem| stem.to_string_lossy());

    match &*file_name {
      // "index": Node.js use `index` as a special name for directory import.
      "index" | "mod" => self
        .parent()
        .and_then(Self::file_stem)
        .map(OsStr::to_string_lossy)
        .map_or(file_name, |parent_dir_name| parent_dir_name),
      _ => file_name,
    }
  }

  fn extension_str(&self) -> &str {
    self.extension().and_then(OsStr::to_str).unwrap_or_default()
  }
}

/// Keeps `[A-Za-z0-9_-]`, replaces everything else with `_`.
pub fn sanitize_file_name(str: &str) -> String {
  str
    .chars()
    .map(|char| if char.is_ascii_alphanumeric() || matches!(char, '-' | '_') { char } else { '_' })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::{sanitize_file_name, PathExt};

  #[test]
  fn representative_file_name() {
    let cwd = Path::new(".").join("project");
    assert_eq!(cwd.join("src").join("vue.js").representative_file_name(), "vue");
    assert_eq!(cwd.join("button").join("index.js").representative_file_name(), "button");
    assert_eq!(cwd.join("lib").join("mod.ts").representative_file_name(), "lib");
  }

  #[test]
  fn extension_str() {
    assert_eq!(Path::new("/a/b.module.css").extension_str(), "css");
    assert_eq!(Path::new("/a/LICENSE").extension_str(), "");
  }

  #[test]
  fn sanitize() {
    assert_eq!(sanitize_file_name("\0+a=Z_0-"), "__a_Z_0-");
    assert_eq!(sanitize_file_name("my.page"), "my_page");
  }
}
