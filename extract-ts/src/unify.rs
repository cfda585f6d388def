//! Module identities and cross-file unification of module documents.
//!
//! A file module is identified by its path relative to the base directory,
//! without extension. A namespace is identified by the chain of enclosing
//! namespace names joined with `/`, so `namespace example.test` in one file and
//! `namespace example { export namespace test }` in another both map to
//! `example/test` and share one [`ModuleDoc`].
use crate::doc::Doc;
use crate::doc::DocId;
use crate::doc::DocSet;
use crate::doc::ModuleDoc;
use crate::program::DeclKind;
use crate::program::SemanticProgram;
use crate::program::SymbolId;
use ahash::AHashMap;
use ahash::AHashSet;

const SOURCE_EXTENSIONS: &[&str] = &[
  ".d.ts", ".d.mts", ".d.cts", ".tsx", ".ts", ".mts", ".cts", ".jsx", ".js", ".mjs", ".cjs",
];

/// Module id for a file: base-relative path without its extension.
pub fn file_module_id(base_dir: &str, file_name: &str) -> String {
  let base = base_dir.trim_end_matches('/');
  let mut relative = file_name;
  if !base.is_empty() {
    if let Some(rest) = relative.strip_prefix(base) {
      if let Some(rest) = rest.strip_prefix('/') {
        relative = rest;
      }
    }
  }
  let relative = relative.strip_prefix("./").unwrap_or(relative);
  SOURCE_EXTENSIONS
    .iter()
    .find_map(|ext| relative.strip_suffix(ext))
    .unwrap_or(relative)
    .to_string()
}

fn file_of_module_symbol<P: SemanticProgram + ?Sized>(program: &P, symbol: SymbolId) -> Option<&str> {
  program
    .symbol(symbol)
    .declarations
    .iter()
    .map(|&decl| program.declaration(decl))
    .find(|decl| decl.kind == DeclKind::SourceFile)
    .map(|decl| program.file_name(decl.file))
}

/// Identity of a module or namespace symbol. A parent chain that loops ends
/// at the first repeated symbol.
pub fn module_id<P: SemanticProgram + ?Sized>(program: &P, base_dir: &str, symbol: SymbolId) -> String {
  let mut segments = Vec::new();
  let mut seen = AHashSet::new();
  let mut current = Some(symbol);
  while let Some(id) = current {
    if !seen.insert(id) {
      break;
    }
    if let Some(file_name) = file_of_module_symbol(program, id) {
      segments.push(file_module_id(base_dir, file_name));
      break;
    }
    let data = program.symbol(id);
    segments.push(data.name.clone());
    current = data.parent;
  }
  segments.reverse();
  segments.join("/")
}

/// Display name of a module or namespace symbol.
pub fn module_name<P: SemanticProgram + ?Sized>(program: &P, base_dir: &str, symbol: SymbolId) -> String {
  match file_of_module_symbol(program, symbol) {
    Some(file_name) => file_module_id(base_dir, file_name),
    None => program.symbol(symbol).name.clone(),
  }
}

/// Id of the module a declared symbol belongs to: its nearest enclosing module
/// or namespace, or else the file of its first declaration.
pub fn owning_module_id<P: SemanticProgram + ?Sized>(
  program: &P,
  base_dir: &str,
  symbol: SymbolId,
) -> Option<String> {
  let mut seen = AHashSet::new();
  let mut current = program.symbol(symbol).parent;
  while let Some(parent) = current {
    if !seen.insert(parent) {
      break;
    }
    let data = program.symbol(parent);
    if data.is_module() {
      return Some(module_id(program, base_dir, parent));
    }
    current = data.parent;
  }
  let decl = program.symbol(symbol).declarations.first()?;
  let file = program.declaration(*decl).file;
  Some(match program.module_symbol(file) {
    Some(module) => module_id(program, base_dir, module),
    None => file_module_id(base_dir, program.file_name(file)),
  })
}

/// Module documents keyed by id, in the order they were first seen.
#[derive(Default)]
pub struct ModuleTable {
  by_id: AHashMap<String, DocId>,
}

impl ModuleTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the document for `id`, creating it on first sight.
  pub fn get_or_insert(&mut self, docs: &mut DocSet, id: String, name: String, file_name: &str) -> DocId {
    if let Some(existing) = self.by_id.get(&id) {
      return *existing;
    }
    let doc = docs.push(ModuleDoc {
      id: id.clone(),
      name,
      file_name: file_name.to_string(),
      exports: Vec::new(),
    });
    self.by_id.insert(id, doc);
    doc
  }

  pub fn append_export(&self, docs: &mut DocSet, module: DocId, export: DocId) {
    if let Some(Doc::Module(module)) = docs.get_mut(module) {
      module.exports.push(export);
    }
  }
}
