use std::collections::hash_map::Entry;

use arcstr::ArcStr;
use rustc_hash::FxHashMap;

use crate::concat_string;

/// Hands out names that are unique within one generator.
///
/// The first request for `name` returns it unchanged, later requests return `name2`, `name3`, ...
#[derive(Debug, Default)]
pub struct UniqueNameGenerator {
  used_name_counts: FxHashMap<ArcStr, u32>,
}

impl UniqueNameGenerator {
  pub fn make_unique(&mut self, name: &ArcStr) -> ArcStr {
    let mut candidate = name.clone();
    loop {
      match self.used_name_counts.entry(candidate.clone()) {
        Entry::Occupied(mut occ) => {
          let next_count = *occ.get();
          occ.insert(next_count + 1);
          let mut suffix = itoa::Buffer::new();
          let suffix = suffix.format(next_count);
          candidate = ArcStr::from(concat_string!(name, suffix).as_str());
        }
        Entry::Vacant(vac) => {
          let name = vac.key().clone();
          vac.insert(2);
          break name;
        }
      }
    }
  }
}

#[test]
fn test_unique_names() {
  let mut generator = UniqueNameGenerator::default();
  let main = arcstr::literal!("main");
  assert_eq!(generator.make_unique(&main), "main");
  assert_eq!(generator.make_unique(&main), "main2");
  assert_eq!(generator.make_unique(&main), "main3");
  assert_eq!(generator.make_unique(&arcstr::literal!("main2")), "main22");
}
