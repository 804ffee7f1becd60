mod alias;
mod package_descriptor;
mod resolver;
mod resolver_options;

pub use crate::{
  alias::AliasTable,
  package_descriptor::{PackageDescriptor, PackageDescriptorLookup, PackageJsonLookup},
  resolver::Resolver,
  resolver_options::ResolverOptions,
};
