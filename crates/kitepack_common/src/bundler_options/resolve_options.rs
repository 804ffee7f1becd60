use kitepack_utils::indexmap::FxIndexMap;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolveOptions {
  /// Specifier prefix to replacement. Declaration order is kept, it breaks ties.
  pub alias: Option<FxIndexMap<String, String>>,
  pub extensions: Option<Vec<String>>,
  pub main_fields: Option<Vec<String>>,
  /// Directory names looked up from the importer upwards, or absolute directories.
  pub modules: Option<Vec<String>>,
}
