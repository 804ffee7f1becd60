mod css;
mod ecmascript;

use std::path::Path;

use anyhow::Context;
use kitepack_common::RawImportRecord;
use kitepack_utils::path_ext::PathExt;
use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub struct ScanResult {
  /// In source order, one record per distinct specifier.
  pub records: Vec<RawImportRecord>,
  pub warnings: Vec<anyhow::Error>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScannerKind {
  Ecmascript,
  Css,
}

impl ScannerKind {
  fn from_path(path: &Path) -> Option<Self> {
    match path.extension_str() {
      "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "cts" | "tsx" => Some(Self::Ecmascript),
      "css" => Some(Self::Css),
      _ => None,
    }
  }
}

/// Collects the specifiers written in `source`. Files without a scanner have no dependencies
/// besides the ones their transforms declare.
pub fn scan_dependencies(path: &Path, source: &[u8]) -> anyhow::Result<ScanResult> {
  let Some(kind) = ScannerKind::from_path(path) else {
    return Ok(ScanResult::default());
  };

  let source = simdutf8::basic::from_utf8(source)
    .ok()
    .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

  let mut result = match kind {
    ScannerKind::Ecmascript => ecmascript::scan(path, source)?,
    ScannerKind::Css => css::scan(source),
  };

  let mut seen = FxHashSet::default();
  result.records.retain(|record| seen.insert(record.specifier.clone()));
  Ok(result)
}
