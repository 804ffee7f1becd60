use std::path::Path;

use anyhow::bail;
use itertools::Itertools;
use kitepack_common::{ImportKind, RawImportRecord};
use oxc::{
  allocator::Allocator,
  ast::ast::{self, Argument, Expression},
  ast_visit::{walk, Visit},
  parser::{Parser, ParserReturn},
  span::SourceType,
};

use super::ScanResult;

pub fn scan(path: &Path, source: &str) -> anyhow::Result<ScanResult> {
  let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs());
  let allocator = Allocator::default();
  let ParserReturn { program, errors, panicked, .. } =
    Parser::new(&allocator, source, source_type).parse();

  if panicked || !errors.is_empty() {
    bail!("Failed to parse {}: {}", path.display(), errors.iter().join("; "));
  }

  let mut scanner = DependencyScanner::default();
  scanner.visit_program(&program);
  Ok(ScanResult { records: scanner.records, warnings: vec![] })
}

#[derive(Default)]
struct DependencyScanner {
  records: Vec<RawImportRecord>,
}

impl DependencyScanner {
  fn add_import_record(&mut self, specifier: &str, kind: ImportKind) {
    self.records.push(RawImportRecord::new(specifier, kind));
  }
}

impl<'ast> Visit<'ast> for DependencyScanner {
  fn visit_import_declaration(&mut self, decl: &ast::ImportDeclaration<'ast>) {
    if !decl.import_kind.is_type() {
      self.add_import_record(decl.source.value.as_str(), ImportKind::Import);
    }
  }

  fn visit_export_named_declaration(&mut self, decl: &ast::ExportNamedDeclaration<'ast>) {
    if let Some(source) = &decl.source {
      if !decl.export_kind.is_type() {
        self.add_import_record(source.value.as_str(), ImportKind::Import);
      }
    }
    walk::walk_export_named_declaration(self, decl);
  }

  fn visit_export_all_declaration(&mut self, decl: &ast::ExportAllDeclaration<'ast>) {
    if !decl.export_kind.is_type() {
      self.add_import_record(decl.source.value.as_str(), ImportKind::Import);
    }
  }

  fn visit_import_expression(&mut self, expr: &ast::ImportExpression<'ast>) {
    if let Expression::StringLiteral(request) = &expr.source {
      self.add_import_record(request.value.as_str(), ImportKind::DynamicImport);
    }
    walk::walk_import_expression(self, expr);
  }

  fn visit_call_expression(&mut self, expr: &ast::CallExpression<'ast>) {
    if expr.callee.is_specific_id("require") && expr.arguments.len() == 1 {
      if let Argument::StringLiteral(request) = &expr.arguments[0] {
        self.add_import_record(request.value.as_str(), ImportKind::Require);
      }
    }
    walk::walk_call_expression(self, expr);
  }
}
