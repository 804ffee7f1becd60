use kitepack_utils::xxhash::HEX_DIGEST_LEN;

const DEFAULT_HASH_LEN: usize = 8;

/// Output file name pattern.
///
/// Supported placeholders: `[name]`, `[hash]`, `[hash:N]` (`[contenthash]` and
/// `[contenthash:N]` are aliases), `[ext]` and `[extname]`. Hashes are truncated to `N` hex
/// characters, 8 by default. Unknown placeholders are kept literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
  template: String,
}

enum Token<'a> {
  Literal(&'a str),
  Name,
  Hash(usize),
  Ext,
  ExtName,
}

impl FilenameTemplate {
  pub fn new(template: impl Into<String>) -> Self {
    Self { template: template.into() }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// Rejects hash lengths outside `1..=32`.
  pub fn validate(&self) -> Result<(), String> {
    self.tokens().map(|_| ())
  }

  pub fn has_hash_pattern(&self) -> bool {
    self.tokens().is_ok_and(|tokens| tokens.iter().any(|token| matches!(token, Token::Hash(_))))
  }

  /// `hash` must be a full hex digest. `extension` is given without the leading dot.
  pub fn render(&self, name: &str, extension: &str, hash: &str) -> String {
    let tokens = self.tokens().unwrap_or_else(|_| vec![Token::Literal(&self.template)]);
    let mut rendered = String::with_capacity(self.template.len() + name.len());
    for token in tokens {
      match token {
        Token::Literal(text) => rendered.push_str(text),
        Token::Name => rendered.push_str(name),
        Token::Hash(len) => rendered.push_str(&hash[..len.min(hash.len())]),
        Token::Ext => rendered.push_str(extension),
        Token::ExtName => {
          if !extension.is_empty() {
            rendered.push('.');
            rendered.push_str(extension);
          }
        }
      }
    }
    rendered
  }

  fn tokens(&self) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = vec![];
    let mut rest = self.template.as_str();
    while let Some(start) = rest.find('[') {
      let Some(len) = rest[start..].find(']') else {
        break;
      };
      let placeholder = &rest[start + 1..start + len];
      let token = match placeholder.split_once(':') {
        None => match placeholder {
          "name" => Some(Token::Name),
          "hash" | "contenthash" => Some(Token::Hash(DEFAULT_HASH_LEN)),
          "ext" => Some(Token::Ext),
          "extname" => Some(Token::ExtName),
          _ => None,
        },
        Some(("hash" | "contenthash", len)) => {
          let len = len
            .parse::<usize>()
            .ok()
            .filter(|len| (1..=HEX_DIGEST_LEN).contains(len))
            .ok_or_else(|| {
              format!(
                "\"[{placeholder}]\" in \"{}\" must use a hash length between 1 and {HEX_DIGEST_LEN}",
                self.template
              )
            })?;
          Some(Token::Hash(len))
        }
        Some(_) => None,
      };
      match token {
        Some(token) => {
          if start > 0 {
            tokens.push(Token::Literal(&rest[..start]));
          }
          tokens.push(token);
        }
        None => tokens.push(Token::Literal(&rest[..=start + len])),
      }
      rest = &rest[start + len + 1..];
    }
    if !rest.is_empty() {
      tokens.push(Token::Literal(rest));
    }
    Ok(tokens)
  }
}

#[cfg(test)]
mod tests {
  use super::FilenameTemplate;

  const HASH: &str = "0123456789abcdef0123456789abcdef";

  #[test]
  fn renders_name_and_truncated_hash() {
    let template = FilenameTemplate::new("static/[name].[hash:8].js");
    assert!(template.has_hash_pattern());
    assert_eq!(template.render("main", "js", HASH), "static/main.01234567.js");
    assert_eq!(FilenameTemplate::new("[name]-[hash:3]").render("a", "", HASH), "a-012");
    assert_eq!(FilenameTemplate::new("[name]-[contenthash]").render("a", "", HASH), "a-01234567");
  }

  #[test]
  fn renders_extensions() {
    assert_eq!(FilenameTemplate::new("[name].[ext]").render("logo", "png", HASH), "logo.png");
    assert_eq!(FilenameTemplate::new("[name][extname]").render("LICENSE", "", HASH), "LICENSE");
  }

  #[test]
  fn keeps_unknown_placeholders() {
    let template = FilenameTemplate::new("[dir]/[name].js");
    assert!(!template.has_hash_pattern());
    assert_eq!(template.render("main", "js", HASH), "[dir]/main.js");
  }

  #[test]
  fn rejects_out_of_range_hash_length() {
    assert!(FilenameTemplate::new("[name].[hash:0].js").validate().is_err());
    assert!(FilenameTemplate::new("[name].[hash:33].js").validate().is_err());
    assert!(FilenameTemplate::new("[name].[hash:32].js").validate().is_ok());
  }
}
