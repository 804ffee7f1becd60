use std::{path::Path, sync::Arc};

use kitepack_common::{ArtifactDescriptor, BundlerOptions};
use kitepack_error::{BuildResult, BundleResult, EmitError};
use kitepack_fs::{FileSystem, OsFileSystem};
use kitepack_plugin::{builtin_transforms, SharedTransform, TransformRegistry};
use kitepack_resolver::{PackageDescriptorLookup, Resolver};
use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;

use crate::{
  chunk_graph::ChunkGraph,
  generate_stage::GenerateStage,
  module_graph::ModuleGraph,
  scan_stage::ScanStage,
  types::{
    bundle_output::BundleOutput, SharedFileSystem, SharedOptions, SharedResolver,
    SharedTransformRegistry,
  },
  utils::normalize_options::{normalize_options, NormalizeOptionsReturn},
};

/// Owns the normalized options, the resolver and the transform registry of one project.
///
/// Every call to [`Bundler::generate`] or [`Bundler::write`] runs a fresh build; nothing is
/// cached between builds.
pub struct Bundler {
  fs: SharedFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  registry: SharedTransformRegistry,
  cancel: CancellationToken,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> BuildResult<Self> {
    BundlerBuilder::new(options).build()
  }

  pub fn builder(options: BundlerOptions) -> BundlerBuilder {
    BundlerBuilder::new(options)
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  /// Cancelling the returned token stops the current build, which then fails with `Aborted`.
  pub fn abort_handle(&self) -> CancellationToken {
    self.cancel.clone()
  }

  /// Builds the module graph without planning or emitting anything.
  pub async fn scan(&self) -> BuildResult<ModuleGraph> {
    ScanStage::new(
      Arc::clone(&self.fs),
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.registry),
      self.cancel.clone(),
    )
    .scan()
    .await
  }

  pub fn plan(&self, graph: &ModuleGraph) -> ChunkGraph {
    GenerateStage::new(graph, &self.options).plan()
  }

  /// Runs the whole pipeline and returns the artifacts without touching the output directory.
  pub async fn generate(&self) -> BundleResult<BundleOutput> {
    let mut graph = self.scan().await?;
    let artifacts = GenerateStage::new(&graph, &self.options).generate()?;
    Ok(BundleOutput { artifacts, warnings: std::mem::take(&mut graph.warnings) })
  }

  /// Like [`Bundler::generate`], then writes every artifact under `cwd/dir`.
  pub async fn write(&self) -> BundleResult<BundleOutput> {
    let output = self.generate().await?;
    let out_dir = self.options.out_dir();
    for artifact in &output.artifacts {
      write_artifact(&*self.fs, &out_dir, artifact)?;
    }
    tracing::debug!(dir = %out_dir.display(), artifacts = output.artifacts.len(), "Output written");
    Ok(output)
  }
}

fn write_artifact(
  fs: &dyn FileSystem,
  out_dir: &Path,
  artifact: &ArtifactDescriptor,
) -> Result<(), EmitError> {
  let path = out_dir.join(&artifact.filename);
  if let Some(parent) = path.parent() {
    fs.create_dir_all(parent).map_err(|err| EmitError::new(artifact.filename.as_str(), err))?;
  }
  fs.write(&path, &artifact.content).map_err(|err| EmitError::new(artifact.filename.as_str(), err))
}

/// Collects the collaborators of a [`Bundler`]. Built-in transforms are always registered and a
/// custom transform with the same name replaces the built-in one.
pub struct BundlerBuilder {
  options: BundlerOptions,
  fs: Option<SharedFileSystem>,
  transforms: FxHashMap<String, SharedTransform>,
  package_lookup: Option<Box<dyn PackageDescriptorLookup>>,
}

impl BundlerBuilder {
  pub fn new(options: BundlerOptions) -> Self {
    Self { options, fs: None, transforms: builtin_transforms(), package_lookup: None }
  }

  #[must_use]
  pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
    self.fs = Some(Arc::new(fs));
    self
  }

  #[must_use]
  pub fn with_transform(mut self, transform: SharedTransform) -> Self {
    self.transforms.insert(transform.name().into_owned(), transform);
    self
  }

  #[must_use]
  pub fn with_package_lookup(mut self, package_lookup: Box<dyn PackageDescriptorLookup>) -> Self {
    self.package_lookup = Some(package_lookup);
    self
  }

  pub fn build(self) -> BuildResult<Bundler> {
    let NormalizeOptionsReturn { options, resolve_options } = normalize_options(self.options)?;
    let registry = TransformRegistry::new(&options.rules, &self.transforms)?;

    let fs: SharedFileSystem = match self.fs {
      Some(fs) => fs,
      None => Arc::new(OsFileSystem),
    };
    let mut resolver = Resolver::new(options.cwd.clone(), resolve_options, Arc::clone(&fs));
    if let Some(package_lookup) = self.package_lookup {
      resolver = resolver.with_package_lookup(package_lookup);
    }

    tracing::debug!(cwd = %options.cwd.display(), rules = options.rules.len(), "Bundler created");
    Ok(Bundler {
      fs,
      options: Arc::new(options),
      resolver: Arc::new(resolver),
      registry: Arc::new(registry),
      cancel: CancellationToken::new(),
    })
  }
}
