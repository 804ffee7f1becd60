use std::{collections::hash_map::Entry, sync::Arc};

use arcstr::ArcStr;
use kitepack_common::{
  EntryPoint, ImportRecord, ModuleId, ModuleIdx, ModuleLoaderMsg, ModuleRecord, ModuleTaskResult,
  ResolvedId,
};
use kitepack_error::{BuildError, BuildErrorKind, BuildResult};
use oxc_index::{index_vec, IndexVec};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tokio::sync::{mpsc::Receiver, Semaphore};
use tokio_util::sync::CancellationToken;

use super::{module_task::ModuleTask, task_context::TaskContext};
use crate::{
  module_graph::ModuleGraph,
  types::{IndexModules, SharedFileSystem, SharedOptions, SharedResolver, SharedTransformRegistry},
};

/// The entry ordinal followed by the import record ordinals along the lowest known path to a
/// module. Compared lexicographically.
type DiscoveryKey = SmallVec<[u32; 8]>;

enum SlotState {
  /// Known but not spawned, its key is not below the lowest failure.
  Deferred,
  Pending,
  Loaded { result: Box<ModuleTaskResult>, import_records: Vec<ImportRecord> },
  Failed(BuildErrorKind),
}

struct ModuleSlot {
  resolved_id: ResolvedId,
  key: DiscoveryKey,
  /// Importer and specifier of the path `key` was computed from. `None` for entries.
  via: Option<(ModuleIdx, ArcStr)>,
  state: SlotState,
}

pub struct ModuleLoader {
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  slots: IndexVec<ModuleIdx, ModuleSlot>,
  visited: FxHashMap<ArcStr, ModuleIdx>,
  /// The failed module with the lowest key.
  failure: Option<ModuleIdx>,
}

impl ModuleLoader {
  pub fn new(
    fs: SharedFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    registry: SharedTransformRegistry,
    cancel: CancellationToken,
  ) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);
    let semaphore = Arc::new(Semaphore::new(options.max_parallel_tasks));

    let shared_context =
      Arc::new(TaskContext { fs, options, resolver, registry, tx, semaphore, cancel });

    Self {
      rx,
      remaining: 0,
      shared_context,
      slots: IndexVec::new(),
      visited: FxHashMap::default(),
      failure: None,
    }
  }

  pub async fn fetch_all_modules(
    mut self,
    user_defined_entries: Vec<(Option<ArcStr>, ResolvedId)>,
  ) -> BuildResult<ModuleGraph> {
    let mut entry_points: Vec<EntryPoint> = Vec::with_capacity(user_defined_entries.len());
    for (ordinal, (name, resolved_id)) in (0u32..).zip(user_defined_entries) {
      if self.visited.contains_key(&resolved_id.id) {
        tracing::debug!(id = %resolved_id.id, "Skipping duplicated entry");
        continue;
      }
      let idx = self.try_spawn_new_task(resolved_id, SmallVec::from_slice(&[ordinal]), None);
      entry_points.push(EntryPoint { idx, name });
    }

    let cancel = self.shared_context.cancel.clone();
    while self.remaining > 0 {
      let msg = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(BuildError::aborted()),
        msg = self.rx.recv() => msg,
      };
      let Some(msg) = msg else {
        break;
      };

      match msg {
        ModuleLoaderMsg::ModuleDone(task_result) => {
          let idx = task_result.idx;
          let parent_key = self.slots[idx].key.clone();
          let import_records = task_result
            .dependencies
            .iter()
            .zip(0u32..)
            .map(|(dep, ordinal)| {
              let mut key = parent_key.clone();
              key.push(ordinal);
              let via = (idx, ArcStr::clone(&dep.record.specifier));
              let dep_idx = self.try_spawn_new_task(dep.resolved_id.clone(), key, Some(via));
              dep.record.clone().into_resolved(dep_idx)
            })
            .collect();
          self.slots[idx].state = SlotState::Loaded { result: task_result, import_records };
          self.remaining -= 1;
        }
        ModuleLoaderMsg::ModuleFailed { idx, error } => {
          tracing::debug!(id = %self.slots[idx].resolved_id.id, %error, "Module failed");
          self.slots[idx].state = SlotState::Failed(error);
          self.update_failure(idx);
          self.remaining -= 1;
        }
      }

      if self.is_failure_final() {
        tracing::debug!(remaining = self.remaining, "Not waiting for modules after the failure");
        break;
      }
    }

    if cancel.is_cancelled() {
      return Err(BuildError::aborted());
    }

    if let Some(failed_idx) = self.failure {
      return Err(self.into_build_error(failed_idx));
    }

    Ok(self.into_module_graph(entry_points))
  }

  fn try_spawn_new_task(
    &mut self,
    resolved_id: ResolvedId,
    key: DiscoveryKey,
    via: Option<(ModuleIdx, ArcStr)>,
  ) -> ModuleIdx {
    match self.visited.entry(ArcStr::clone(&resolved_id.id)) {
      Entry::Occupied(visited) => {
        let idx = *visited.get();
        self.relax(idx, key, via);
        idx
      }
      Entry::Vacant(not_visited) => {
        let idx =
          self.slots.push(ModuleSlot { resolved_id, key, via, state: SlotState::Deferred });
        not_visited.insert(idx);
        self.spawn_if_allowed(idx);
        idx
      }
    }
  }

  /// Modules that would sort after the current failure are never started.
  fn spawn_if_allowed(&mut self, idx: ModuleIdx) {
    let slot = &self.slots[idx];
    if !matches!(slot.state, SlotState::Deferred) {
      return;
    }
    if self.failure.is_some_and(|failed| self.slots[failed].key <= slot.key) {
      return;
    }

    self.slots[idx].state = SlotState::Pending;
    self.remaining += 1;
    let task = ModuleTask::new(
      Arc::clone(&self.shared_context),
      idx,
      self.slots[idx].resolved_id.clone(),
    );
    tokio::spawn(task.run());
  }

  /// Lowers the key of `idx` and of everything discovered through it.
  fn relax(&mut self, idx: ModuleIdx, key: DiscoveryKey, via: Option<(ModuleIdx, ArcStr)>) {
    let mut stack = vec![(idx, key, via)];
    while let Some((idx, key, via)) = stack.pop() {
      if key >= self.slots[idx].key {
        continue;
      }
      self.slots[idx].key = key;
      self.slots[idx].via = via;

      match &self.slots[idx].state {
        SlotState::Deferred => self.spawn_if_allowed(idx),
        SlotState::Pending => {}
        SlotState::Loaded { import_records, .. } => {
          let parent_key = &self.slots[idx].key;
          stack.extend(import_records.iter().zip(0u32..).map(|(rec, ordinal)| {
            let mut key = parent_key.clone();
            key.push(ordinal);
            (rec.resolved_module(), key, Some((idx, ArcStr::clone(&rec.specifier))))
          }));
        }
        SlotState::Failed(_) => self.update_failure(idx),
      }
    }
  }

  fn update_failure(&mut self, idx: ModuleIdx) {
    let is_lower = self.failure.is_none_or(|failed| self.slots[idx].key < self.slots[failed].key);
    if is_lower {
      self.failure = Some(idx);
    }
  }

  /// Pending modules sorting after the failure can neither replace it nor lower its key.
  fn is_failure_final(&self) -> bool {
    let Some(failed) = self.failure else {
      return false;
    };
    let failed_key = &self.slots[failed].key;
    !self
      .slots
      .iter()
      .any(|slot| matches!(slot.state, SlotState::Pending) && slot.key < *failed_key)
  }

  fn into_build_error(mut self, failed_idx: ModuleIdx) -> BuildError {
    let cwd = &self.shared_context.options.cwd;

    let mut import_chain = vec![];
    let mut current = failed_idx;
    while let Some((importer, specifier)) = &self.slots[current].via {
      import_chain.push(specifier.to_string());
      current = *importer;
    }
    import_chain.push(self.slots[current].resolved_id.debug_id(cwd));
    import_chain.reverse();

    let module_id = self.slots[failed_idx].resolved_id.debug_id(cwd);
    let state = std::mem::replace(&mut self.slots[failed_idx].state, SlotState::Deferred);
    let SlotState::Failed(kind) = state else {
      unreachable!("The recorded failure must point at a failed module");
    };

    BuildError::new(kind).with_module(module_id).with_import_chain(import_chain)
  }

  /// Renumbers the modules in pre-order DFS from the entries, following import records in order.
  fn into_module_graph(self, entry_points: Vec<EntryPoint>) -> ModuleGraph {
    let cwd = &self.shared_context.options.cwd;

    let mut new_idx_of: IndexVec<ModuleIdx, Option<ModuleIdx>> = index_vec![None; self.slots.len()];
    let mut discovery_order: Vec<ModuleIdx> = Vec::with_capacity(self.slots.len());
    for entry in &entry_points {
      let mut stack = vec![entry.idx];
      while let Some(idx) = stack.pop() {
        if new_idx_of[idx].is_some() {
          continue;
        }
        new_idx_of[idx] = Some(ModuleIdx::from_usize(discovery_order.len()));
        discovery_order.push(idx);
        if let SlotState::Loaded { import_records, .. } = &self.slots[idx].state {
          stack.extend(import_records.iter().rev().map(ImportRecord::resolved_module));
        }
      }
    }
    let remap =
      |idx: ModuleIdx| new_idx_of[idx].expect("Every module is reachable from an entry");

    let mut slots = self.slots.into_iter().map(Some).collect::<IndexVec<ModuleIdx, _>>();
    let mut warnings = vec![];
    let mut modules = IndexModules::with_capacity(discovery_order.len());
    let mut module_id_to_idx = FxHashMap::default();

    for old_idx in discovery_order {
      let ModuleSlot { resolved_id, state, .. } =
        slots[old_idx].take().expect("Each module is visited once");
      let SlotState::Loaded { result, import_records } = state else {
        unreachable!("Module tasks didn't complete as expected");
      };
      let ModuleTaskResult {
        source,
        transformed,
        content_hash,
        side_artifacts,
        transforms,
        warnings: module_warnings,
        ..
      } = *result;

      let id = ModuleId::new(resolved_id.id);
      let stable_id = id.stabilize(cwd);
      warnings.extend(
        module_warnings.into_iter().map(|warning| warning.context(format!("in {stable_id}"))),
      );

      let idx = modules.next_idx();
      module_id_to_idx.insert(id.clone(), idx);
      modules.push(ModuleRecord {
        idx,
        id,
        stable_id,
        source,
        import_records: import_records
          .into_iter()
          .map(|rec| ImportRecord { state: remap(rec.state), ..rec })
          .collect(),
        transformed,
        content_hash,
        side_artifacts,
        transforms,
        exec_order: u32::MAX,
      });
    }

    let entry_points = entry_points
      .into_iter()
      .map(|entry| EntryPoint { idx: remap(entry.idx), ..entry })
      .collect();

    tracing::debug!(modules = modules.len(), "Module graph built");
    ModuleGraph::new(modules, entry_points, module_id_to_idx, warnings)
  }
}
