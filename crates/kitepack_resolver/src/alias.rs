#[derive(Debug, Clone)]
struct AliasEntry {
  /// Without the trailing `$`.
  key: String,
  exact: bool,
  replacement: String,
}

impl AliasEntry {
  fn matches(&self, specifier: &str) -> bool {
    if self.exact {
      return specifier == self.key;
    }
    specifier
      .strip_prefix(self.key.as_str())
      .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
  }
}

/// Ordered specifier prefix rewrites. Read-only once built.
///
/// A prefix matches when the specifier equals it or continues with `/` right after it, so `@`
/// rewrites `@/utils` but leaves `@scope/pkg` alone. A key ending in `$` only matches the exact
/// specifier. The longest matching key wins and equal lengths fall back to insertion order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
  entries: Vec<AliasEntry>,
}

impl AliasTable {
  pub fn new<K: Into<String>, V: Into<String>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
    let entries = entries
      .into_iter()
      .map(|(key, replacement)| {
        let key: String = key.into();
        let replacement = replacement.into();
        match key.strip_suffix('$') {
          Some(exact_key) => AliasEntry { key: exact_key.to_string(), exact: true, replacement },
          None => AliasEntry { key, exact: false, replacement },
        }
      })
      .collect();
    Self { entries }
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The rewritten specifier, or `None` when no key matches.
  pub fn apply(&self, specifier: &str) -> Option<String> {
    let mut best: Option<&AliasEntry> = None;
    for entry in &self.entries {
      if !entry.matches(specifier) {
        continue;
      }
      match best {
        Some(current) if current.key.len() >= entry.key.len() => {}
        _ => best = Some(entry),
      }
    }

    best.map(|entry| format!("{}{}", entry.replacement, &specifier[entry.key.len()..]))
  }
}

#[cfg(test)]
mod tests {
  use super::AliasTable;

  #[test]
  fn longest_prefix_wins() {
    let table = AliasTable::new([("@", "/project/src"), ("@/components", "/project/src/ui")]);
    assert_eq!(table.apply("@/components/button").as_deref(), Some("/project/src/ui/button"));
    assert_eq!(table.apply("@/utils").as_deref(), Some("/project/src/utils"));
    assert_eq!(table.apply("@").as_deref(), Some("/project/src"));
  }

  #[test]
  fn prefix_stops_at_segment_boundary() {
    let table = AliasTable::new([("@", "/project/src"), ("react", "/vendor/react")]);
    assert_eq!(table.apply("@scope/pkg"), None);
    assert_eq!(table.apply("react-dom"), None);
    assert_eq!(table.apply("react/jsx-runtime").as_deref(), Some("/vendor/react/jsx-runtime"));
  }

  #[test]
  fn exact_keys() {
    let table = AliasTable::new([("vue$", "vue/dist/vue.esm.js")]);
    assert_eq!(table.apply("vue").as_deref(), Some("vue/dist/vue.esm.js"));
    assert_eq!(table.apply("vue/compiler"), None);
  }

  #[test]
  fn equal_length_ties_keep_insertion_order() {
    let table = AliasTable::new([("lib", "/first"), ("lib$", "/second")]);
    assert_eq!(table.apply("lib").as_deref(), Some("/first"));
  }
}
