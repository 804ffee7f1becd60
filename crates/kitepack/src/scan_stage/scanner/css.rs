use css_module_lexer::{collect_dependencies, Dependency, Mode};
use kitepack_common::{ImportKind, RawImportRecord};

use super::ScanResult;

pub fn scan(source: &str) -> ScanResult {
  let (lexed_deps, warnings) = collect_dependencies(source, Mode::Css);

  let records = lexed_deps
    .into_iter()
    .filter_map(|lexed_dep| match lexed_dep {
      Dependency::Import { request, .. } => {
        Some(RawImportRecord::new(request, ImportKind::AtImport))
      }
      Dependency::Url { request, .. } if is_bundled_url(request) => {
        Some(RawImportRecord::new(request, ImportKind::UrlImport))
      }
      _ => None,
    })
    .collect();

  let warnings = warnings.into_iter().map(|warning| anyhow::anyhow!("{warning}")).collect();

  ScanResult { records, warnings }
}

/// Data URIs, remote URLs and fragment references stay in the stylesheet as written.
fn is_bundled_url(request: &str) -> bool {
  !request.is_empty()
    && !request.starts_with('#')
    && !request.starts_with("//")
    && !request.starts_with("data:")
    && !request.starts_with("http://")
    && !request.starts_with("https://")
}
