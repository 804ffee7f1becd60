use arcstr::ArcStr;

use crate::{ImportKind, ModuleIdx};

pub type RawImportRecord = ImportRecord<()>;

/// `State` is `()` right after scanning and the target `ModuleIdx` once the loader has
/// inserted the dependency into the module table.
#[derive(Debug, Clone)]
pub struct ImportRecord<State = ModuleIdx> {
  pub state: State,
  /// `./lib.js` in `import { foo } from './lib.js';`
  pub specifier: ArcStr,
  pub kind: ImportKind,
}

impl RawImportRecord {
  pub fn new(specifier: impl Into<ArcStr>, kind: ImportKind) -> Self {
    Self { state: (), specifier: specifier.into(), kind }
  }

  pub fn into_resolved(self, resolved_module: ModuleIdx) -> ImportRecord {
    ImportRecord { state: resolved_module, specifier: self.specifier, kind: self.kind }
  }
}

impl ImportRecord {
  pub fn resolved_module(&self) -> ModuleIdx {
    self.state
  }
}
