use std::{path::Path, sync::Arc};

use arcstr::ArcStr;
use kitepack_common::{
  ImportKind, ModuleId, ModuleIdx, ModuleLoaderMsg, ModuleTaskResult, RawImportRecord,
  ResolvedDependency, ResolvedId,
};
use kitepack_error::BuildErrorKind;
use kitepack_plugin::{TransformContext, TransformOutput};
use kitepack_utils::{path_ext::PathExt, xxhash::xxhash_hex};
use rustc_hash::FxHashSet;

use super::{scanner::scan_dependencies, task_context::TaskContext};

pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  resolved_id: ResolvedId,
}

impl ModuleTask {
  pub fn new(ctx: Arc<TaskContext>, idx: ModuleIdx, resolved_id: ResolvedId) -> Self {
    Self { ctx, idx, resolved_id }
  }

  pub async fn run(self) {
    let ctx = Arc::clone(&self.ctx);
    let idx = self.idx;
    let msg = tokio::select! {
      biased;
      () = ctx.cancel.cancelled() => return,
      result = self.run_inner() => match result {
        Ok(result) => ModuleLoaderMsg::ModuleDone(Box::new(result)),
        Err(error) => ModuleLoaderMsg::ModuleFailed { idx, error },
      },
    };
    // The loader stops listening once the build is aborted or has failed.
    let _ = ctx.tx.send(msg).await;
  }

  async fn run_inner(self) -> Result<ModuleTaskResult, BuildErrorKind> {
    let permit = Arc::clone(&self.ctx.semaphore)
      .acquire_owned()
      .await
      .map_err(|_| BuildErrorKind::Aborted)?;

    let module_timeout = self.ctx.options.module_timeout;
    let idx = self.idx;
    let handle = tokio::task::spawn_blocking(move || {
      let _permit = permit;
      self.process()
    });

    match tokio::time::timeout(module_timeout, handle).await {
      Ok(Ok(result)) => result,
      Ok(Err(join_error)) => Err(BuildErrorKind::Load {
        source: std::io::Error::other(format!("Module task panicked: {join_error}")),
      }),
      Err(_) => {
        tracing::debug!(?idx, ?module_timeout, "Module timed out");
        Err(BuildErrorKind::Timeout { elapsed: module_timeout })
      }
    }
  }

  /// Load, scan, resolve and transform. Runs on a blocking thread.
  fn process(&self) -> Result<ModuleTaskResult, BuildErrorKind> {
    let path = Path::new(self.resolved_id.id.as_str());
    let cwd = &self.ctx.options.cwd;
    let module_id = ModuleId::new(ArcStr::clone(&self.resolved_id.id));
    let stable_id = module_id.stabilize(cwd);
    let _span = tracing::trace_span!("module", id = %stable_id).entered();

    let source = self.ctx.fs.read(path).map_err(|source| BuildErrorKind::Load { source })?;

    let scanned =
      scan_dependencies(path, &source).map_err(|source| BuildErrorKind::Scan { source })?;
    let importer_dir = path.parent().unwrap_or(cwd);
    let mut dependencies = scanned
      .records
      .into_iter()
      .map(|record| self.resolve_dependency(record, importer_dir))
      .collect::<Result<Vec<_>, _>>()?;

    let chain = self
      .ctx
      .registry
      .match_path(&path.expect_to_slash())
      .map_err(BuildErrorKind::RuleConflict)?;

    let (output, transforms) = match chain {
      Some(chain) => {
        tracing::trace!(rule = %chain.rule_name, "Applying transform chain");
        let null = serde_json::Value::Null;
        let transform_ctx = TransformContext {
          module_id: &module_id,
          stable_id: &stable_id,
          mode: self.ctx.options.mode,
          options: &null,
        };
        let output =
          chain.apply(&transform_ctx, source.clone()).map_err(BuildErrorKind::Transform)?;
        (output, chain.names())
      }
      None => (TransformOutput::new(source.clone()), vec![]),
    };

    let TransformOutput { code, side_artifacts, dependencies: declared } = output;
    if simdutf8::basic::from_utf8(&code).is_err() {
      let message = if transforms.is_empty() {
        format!("{stable_id} is not valid UTF-8, add a rule that turns it into JavaScript")
      } else {
        format!("Transforms of {stable_id} produced invalid UTF-8")
      };
      return Err(BuildErrorKind::Load {
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, message),
      });
    }

    let mut seen =
      dependencies.iter().map(|dep| ArcStr::clone(&dep.record.specifier)).collect::<FxHashSet<_>>();
    for specifier in declared {
      let record = RawImportRecord::new(specifier.as_str(), ImportKind::Declared);
      if seen.insert(ArcStr::clone(&record.specifier)) {
        dependencies.push(self.resolve_dependency(record, importer_dir)?);
      }
    }

    Ok(ModuleTaskResult {
      idx: self.idx,
      source,
      content_hash: xxhash_hex(&code),
      transformed: code,
      side_artifacts,
      transforms,
      dependencies,
      warnings: scanned.warnings,
    })
  }

  fn resolve_dependency(
    &self,
    record: RawImportRecord,
    importer_dir: &Path,
  ) -> Result<ResolvedDependency, BuildErrorKind> {
    let resolved_id =
      self.ctx.resolver.resolve(&record.specifier, importer_dir).map_err(BuildErrorKind::Resolve)?;
    Ok(ResolvedDependency { record, resolved_id })
  }
}
