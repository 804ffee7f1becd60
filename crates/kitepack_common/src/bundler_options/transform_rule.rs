use serde::Deserialize;

/// `{ test, include, exclude, use }`. The first rule that matches a module decides its whole
/// transform chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransformRule {
  pub name: Option<String>,
  /// Regex tested against the slash separated absolute module path.
  pub test: String,
  #[serde(default)]
  pub include: Vec<String>,
  #[serde(default)]
  pub exclude: Vec<String>,
  #[serde(rename = "use")]
  pub uses: Vec<TransformSpec>,
}

impl TransformRule {
  pub fn new(test: impl Into<String>, uses: Vec<TransformSpec>) -> Self {
    Self { name: None, test: test.into(), include: vec![], exclude: vec![], uses }
  }

  #[must_use]
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  #[must_use]
  pub fn with_include(mut self, include: Vec<String>) -> Self {
    self.include = include;
    self
  }

  #[must_use]
  pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
    self.exclude = exclude;
    self
  }

  pub fn is_gated(&self) -> bool {
    !self.include.is_empty() || !self.exclude.is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TransformSpecRepr")]
pub struct TransformSpec {
  pub name: String,
  pub options: serde_json::Value,
}

impl TransformSpec {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), options: serde_json::Value::Null }
  }

  #[must_use]
  pub fn with_options(mut self, options: serde_json::Value) -> Self {
    self.options = options;
    self
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TransformSpecRepr {
  Name(String),
  Spec {
    #[serde(alias = "loader")]
    name: String,
    #[serde(default)]
    options: serde_json::Value,
  },
}

impl From<TransformSpecRepr> for TransformSpec {
  fn from(value: TransformSpecRepr) -> Self {
    match value {
      TransformSpecRepr::Name(name) => Self::new(name),
      TransformSpecRepr::Spec { name, options } => Self { name, options },
    }
  }
}
