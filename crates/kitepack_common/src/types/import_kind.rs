use std::fmt::Display;

/// How a dependency was written. Every kind is a plain graph edge for chunking.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ImportKind {
  /// `import foo from 'foo'`, `export * from 'foo'`
  Import,
  /// `import('foo')`
  DynamicImport,
  /// `require('foo')`
  Require,
  /// `@import 'foo.css'`
  AtImport,
  /// `url('foo.png')`
  UrlImport,
  /// A dependency declared by a transform.
  Declared,
}

impl ImportKind {
  pub fn is_static(self) -> bool {
    !matches!(self, Self::DynamicImport)
  }
}

impl TryFrom<&str> for ImportKind {
  type Error = String;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    match value {
      "import-statement" => Ok(Self::Import),
      "dynamic-import" => Ok(Self::DynamicImport),
      "require-call" => Ok(Self::Require),
      "at-import" => Ok(Self::AtImport),
      "url-token" => Ok(Self::UrlImport),
      "declared" => Ok(Self::Declared),
      _ => Err(format!("Invalid import kind: {value:?}")),
    }
  }
}

impl Display for ImportKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::Import => "import-statement",
      Self::DynamicImport => "dynamic-import",
      Self::Require => "require-call",
      Self::AtImport => "at-import",
      Self::UrlImport => "url-token",
      Self::Declared => "declared",
    })
  }
}
