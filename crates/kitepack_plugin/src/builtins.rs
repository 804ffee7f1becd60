mod asset;
mod extract;
mod json;
mod raw;

use rustc_hash::FxHashMap;

pub use self::{
  asset::AssetTransform, extract::ExtractTransform, json::JsonTransform, raw::RawTransform,
};
use crate::SharedTransform;

/// `raw`, `json`, `asset` and `extract`, keyed by name.
pub fn builtin_transforms() -> FxHashMap<String, SharedTransform> {
  let transforms: [SharedTransform; 4] = [
    std::sync::Arc::new(RawTransform),
    std::sync::Arc::new(JsonTransform),
    std::sync::Arc::new(AssetTransform),
    std::sync::Arc::new(ExtractTransform),
  ];
  transforms.into_iter().map(|transform| (transform.name().into_owned(), transform)).collect()
}
