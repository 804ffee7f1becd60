use kitepack_common::{Chunk, ModuleRecord};
use kitepack_utils::concat_string;
use serde_json::Value;

use super::GenerateStage;

const REGISTRY_PRELUDE: &str = "var __kitepack__ = globalThis.__kitepack__ || \
(globalThis.__kitepack__ = { modules: {}, cache: {} });\n";

const LOADER: &str = r#"__kitepack__.require = __kitepack__.require || function load(id) {
  var cached = __kitepack__.cache[id];
  if (cached) return cached.exports;
  var entry = __kitepack__.modules[id];
  if (!entry) throw new Error("Module \"" + id + "\" is not registered");
  var module = (__kitepack__.cache[id] = { exports: {} });
  entry[0].call(module.exports, module, module.exports, function (specifier) {
    if (!(specifier in entry[1])) {
      throw new Error("Cannot find module \"" + specifier + "\" from \"" + id + "\"");
    }
    return load(entry[1][specifier]);
  });
  return module.exports;
};
"#;

impl GenerateStage<'_> {
  /// Wraps every module of the chunk in a factory registered under its stable id. Entry chunks
  /// also carry the loader and run their entry module.
  pub(super) fn render_chunk(&self, chunk: &Chunk) -> String {
    let modules = &self.graph.modules;
    let mut content = String::from("(function () {\n");
    content.push_str(REGISTRY_PRELUDE);

    for module_idx in &chunk.modules {
      content.push_str(&self.render_module(&modules[*module_idx]));
    }

    if let Some(entry_module) = chunk.entry_module_idx() {
      content.push_str(LOADER);
      let entry_id = quote(&modules[entry_module].stable_id);
      content.push_str(&concat_string!("__kitepack__.require(", entry_id, ");\n"));
    }

    content.push_str("})();\n");
    content
  }

  fn render_module(&self, module: &ModuleRecord) -> String {
    let code = module.transformed_code();
    let mut seen = Vec::with_capacity(module.import_records.len());
    let dependency_map = module
      .import_records
      .iter()
      .filter(|rec| {
        let is_new = !seen.contains(&rec.specifier);
        seen.push(rec.specifier.clone());
        is_new
      })
      .map(|rec| {
        let target = &self.graph.modules[rec.resolved_module()].stable_id;
        format!("{}: {}", quote(&rec.specifier), quote(target))
      })
      .collect::<Vec<_>>()
      .join(", ");

    let newline = if code.ends_with('\n') || code.is_empty() { "" } else { "\n" };
    let module_id = quote(&module.stable_id);
    concat_string!(
      "__kitepack__.modules[",
      module_id,
      "] = [function (module, exports, require) {\n",
      code,
      newline,
      "}, {",
      dependency_map,
      "}];\n"
    )
  }
}

/// A JSON string literal, which is also a valid JS string literal.
fn quote(value: &str) -> String {
  Value::from(value).to_string()
}
