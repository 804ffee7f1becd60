use serde::Deserialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "InputItemRepr")]
pub struct InputItem {
  pub name: Option<String>,
  pub import: String,
}

/// Accepts both `"./a.js"` and `{ "name": "a", "import": "./a.js" }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputItemRepr {
  Import(String),
  Item { name: Option<String>, import: String },
}

impl From<InputItemRepr> for InputItem {
  fn from(value: InputItemRepr) -> Self {
    match value {
      InputItemRepr::Import(import) => Self { name: None, import },
      InputItemRepr::Item { name, import } => Self { name, import },
    }
  }
}

impl From<&str> for InputItem {
  fn from(value: &str) -> Self {
    Self { name: None, import: value.to_string() }
  }
}

impl From<String> for InputItem {
  fn from(import: String) -> Self {
    Self { name: None, import }
  }
}
