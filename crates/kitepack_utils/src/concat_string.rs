/// Concatenates string-like values with a single allocation.
///
/// ```ignore
/// let name = concat_string!("chunk", "-", index_str);
/// ```
#[macro_export]
macro_rules! concat_string {
  ($($s:expr),+ $(,)?) => {{
    let parts: &[&str] = &[$(::core::convert::AsRef::<str>::as_ref(&$s)),+];
    let mut buf = String::with_capacity(parts.iter().map(|p| p.len()).sum());
    for part in parts {
      buf.push_str(part);
    }
    buf
  }};
}

#[test]
fn test_concat_string() {
  let owned = String::from("b");
  assert_eq!(concat_string!("a", owned, "c"), "abc");
  assert_eq!(concat_string!("only"), "only");
}
