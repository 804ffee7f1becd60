use std::iter;

use kitepack_common::{Edge, EntryPoint, ModuleId, ModuleIdx, ModuleRecord};
use kitepack_utils::indexmap::FxIndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::IndexModules;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

/// Every module reachable from the entries, indexed in discovery order.
#[derive(Debug)]
pub struct ModuleGraph {
  pub modules: IndexModules,
  /// In configuration order, without duplicates.
  pub entry_points: Vec<EntryPoint>,
  pub module_id_to_idx: FxHashMap<ModuleId, ModuleIdx>,
  /// Modules in execution order, dependencies before their importers.
  pub sorted_modules: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
}

impl ModuleGraph {
  pub(crate) fn new(
    modules: IndexModules,
    entry_points: Vec<EntryPoint>,
    module_id_to_idx: FxHashMap<ModuleId, ModuleIdx>,
    warnings: Vec<anyhow::Error>,
  ) -> Self {
    Self { modules, entry_points, module_id_to_idx, sorted_modules: vec![], warnings }
  }

  /// Looks a module up by its resolved absolute path.
  pub fn module_by_id(&self, id: &str) -> Option<&ModuleRecord> {
    self.module_id_to_idx.get(&ModuleId::new(id)).map(|idx| &self.modules[*idx])
  }

  pub fn module_by_stable_id(&self, stable_id: &str) -> Option<&ModuleRecord> {
    self.modules.iter().find(|module| module.stable_id == stable_id)
  }

  pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
    self.modules.iter().flat_map(|module| {
      module.import_records.iter().map(|rec| Edge {
        from: module.idx,
        to: rec.resolved_module(),
        specifier: rec.specifier.clone(),
        kind: rec.kind,
      })
    })
  }

  /// Assigns `exec_order` and reports every cycle found on the way. Dynamic imports don't
  /// take part in the execution order.
  pub(crate) fn sort_modules(&mut self) {
    let mut execution_stack = self
      .entry_points
      .iter()
      .rev()
      .map(|entry| Status::ToBeExecuted(entry.idx))
      .collect::<Vec<_>>();

    let mut executed_ids = FxHashSet::default();
    let mut stack_indexes_of_executing_id = FxHashMap::default();

    let mut next_exec_order = 0;
    let mut circular_dependencies = FxIndexSet::default();
    let mut sorted_modules = Vec::with_capacity(self.modules.len());

    while let Some(status) = execution_stack.pop() {
      match status {
        Status::ToBeExecuted(id) => {
          if executed_ids.contains(&id) {
            if let Some(index) = stack_indexes_of_executing_id.get(&id).copied() {
              let cycles = execution_stack[index..]
                .iter()
                .filter_map(|action| match action {
                  // Only modules with `Status::WaitForExit` are on the execution chain
                  Status::ToBeExecuted(_) => None,
                  Status::WaitForExit(id) => Some(*id),
                })
                .chain(iter::once(id))
                .collect::<Box<[_]>>();
              circular_dependencies.insert(cycles);
            }
          } else {
            executed_ids.insert(id);
            execution_stack.push(Status::WaitForExit(id));
            stack_indexes_of_executing_id.insert(id, execution_stack.len() - 1);

            let module = &self.modules[id];
            let mut seen = FxHashSet::default();
            let static_deps = module
              .import_records
              .iter()
              .filter(|rec| rec.kind.is_static() && seen.insert(rec.resolved_module()))
              .map(|rec| Status::ToBeExecuted(rec.resolved_module()))
              .collect::<Vec<_>>();
            execution_stack.extend(static_deps.into_iter().rev());
          }
        }
        Status::WaitForExit(id) => {
          sorted_modules.push(id);
          self.modules[id].exec_order = next_exec_order;
          next_exec_order += 1;
          stack_indexes_of_executing_id.remove(&id);
        }
      }
    }

    for cycle in circular_dependencies {
      let paths =
        cycle.iter().map(|id| self.modules[*id].stable_id.as_str()).collect::<Vec<_>>();
      tracing::debug!(cycle = ?paths, "Circular dependency");
      self.warnings.push(anyhow::anyhow!("Circular dependency: {}.", paths.join(" -> ")));
    }

    self.sorted_modules = sorted_modules;
  }
}
