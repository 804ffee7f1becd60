mod builtins;
mod registry;
mod transform;

pub use crate::{
  builtins::{builtin_transforms, AssetTransform, ExtractTransform, JsonTransform, RawTransform},
  registry::{TransformChain, TransformRegistry, TransformStep},
  transform::{SharedTransform, Transform, TransformContext, TransformName, TransformOutput},
};
