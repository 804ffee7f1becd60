use kitepack_common::{Platform, ResolveOptions};

use crate::AliasTable;

pub const DEFAULT_EXTENSIONS: [&str; 6] = [".js", ".mjs", ".jsx", ".ts", ".tsx", ".json"];
pub const DEFAULT_MODULES: &str = "node_modules";

#[derive(Debug, Clone)]
pub struct ResolverOptions {
  pub alias: AliasTable,
  /// With the leading dot.
  pub extensions: Vec<String>,
  pub main_fields: Vec<String>,
  /// Directory names searched upwards from the importer, or absolute directories.
  pub modules: Vec<String>,
}

impl ResolverOptions {
  pub fn new(options: &ResolveOptions, platform: Platform) -> Self {
    let alias =
      options.alias.as_ref().map(|alias| AliasTable::new(alias.clone())).unwrap_or_default();

    let extensions = options.extensions.as_ref().map_or_else(
      || DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
      |extensions| {
        extensions
          .iter()
          .map(|ext| if ext.starts_with('.') { ext.clone() } else { format!(".{ext}") })
          .collect()
      },
    );

    let main_fields = options.main_fields.clone().unwrap_or_else(|| {
      let fields: &[&str] = match platform {
        Platform::Browser => &["browser", "module", "main"],
        Platform::Node => &["main", "module"],
        Platform::Neutral => &["main"],
      };
      fields.iter().map(ToString::to_string).collect()
    });

    let modules = options.modules.clone().unwrap_or_else(|| vec![DEFAULT_MODULES.to_string()]);

    Self { alias, extensions, main_fields, modules }
  }
}

impl Default for ResolverOptions {
  fn default() -> Self {
    Self::new(&ResolveOptions::default(), Platform::default())
  }
}
