use std::hash::BuildHasherDefault;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

/// Insertion-ordered set. Used wherever iteration order ends up in build output.
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
/// Insertion-ordered map. Used wherever iteration order ends up in build output.
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
