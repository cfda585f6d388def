//! In-memory semantic program.
//!
//! [`MemoryProgram`] stores the answers a compiler service would compute for a
//! set of files (symbols, declarations, export lists, alias targets and
//! inferred types) and serves them through [`SemanticProgram`]. It can be
//! assembled with the builder methods below or loaded from a JSON snapshot.
use crate::program::DeclId;
use crate::program::DeclKind;
use crate::program::Declaration;
use crate::program::FileId;
use crate::program::ModifierFlags;
use crate::program::SemanticProgram;
use crate::program::SymbolData;
use crate::program::SymbolFlags;
use crate::program::SymbolId;
use crate::program::VarKeyword;
use serde::Deserialize;
use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ProgramError {
  Json(serde_json::Error),
  DanglingId { what: &'static str, id: u32 },
  /// A symbol is its own ancestor.
  ParentCycle { symbol: u32 },
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProgramError::Json(err) => write!(f, "invalid program snapshot: {err}"),
      ProgramError::DanglingId { what, id } => {
        write!(f, "program snapshot references missing {what} {id}")
      }
      ProgramError::ParentCycle { symbol } => {
        write!(f, "program snapshot has a parent cycle through symbol {symbol}")
      }
    }
  }
}

impl Error for ProgramError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      ProgramError::Json(err) => Some(err),
      ProgramError::DanglingId { .. } | ProgramError::ParentCycle { .. } => None,
    }
  }
}

impl From<serde_json::Error> for ProgramError {
  fn from(value: serde_json::Error) -> Self {
    ProgramError::Json(value)
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryFile {
  pub name: String,
  #[serde(default)]
  pub module_symbol: Option<SymbolId>,
  #[serde(default)]
  pub statements: Vec<SymbolId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
  pub symbol: SymbolData,
  #[serde(default)]
  pub exports: Vec<SymbolId>,
  #[serde(default)]
  pub alias_of: Option<SymbolId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclEntry {
  pub decl: Declaration,
  #[serde(default)]
  pub inferred_type: Option<String>,
  #[serde(default)]
  pub inferred_return_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryProgram {
  #[serde(default)]
  files: Vec<MemoryFile>,
  #[serde(default)]
  symbols: Vec<SymbolEntry>,
  #[serde(default)]
  declarations: Vec<DeclEntry>,
}

/// Symbol flags a declaration contributes to the symbol it binds.
pub fn symbol_flags_for(decl: &Declaration) -> SymbolFlags {
  match decl.kind {
    DeclKind::SourceFile => SymbolFlags::VALUE_MODULE,
    DeclKind::Namespace => SymbolFlags::NAMESPACE_MODULE | SymbolFlags::VALUE_MODULE,
    DeclKind::Class => SymbolFlags::CLASS,
    DeclKind::Interface => SymbolFlags::INTERFACE,
    DeclKind::Function => SymbolFlags::FUNCTION,
    DeclKind::Enum if decl.modifiers.contains(ModifierFlags::CONST) => SymbolFlags::CONST_ENUM,
    DeclKind::Enum => SymbolFlags::REGULAR_ENUM,
    DeclKind::EnumMember => SymbolFlags::ENUM_MEMBER,
    DeclKind::Variable => match decl.var_keyword {
      Some(VarKeyword::Let) | Some(VarKeyword::Const) => SymbolFlags::BLOCK_SCOPED_VARIABLE,
      Some(VarKeyword::Var) | None => SymbolFlags::FUNCTION_SCOPED_VARIABLE,
    },
    DeclKind::TypeAlias => SymbolFlags::TYPE_ALIAS,
    DeclKind::Property | DeclKind::Parameter => SymbolFlags::PROPERTY,
    DeclKind::Method => SymbolFlags::METHOD,
    DeclKind::Constructor => SymbolFlags::CONSTRUCTOR,
    DeclKind::GetAccessor => SymbolFlags::GET_ACCESSOR,
    DeclKind::SetAccessor => SymbolFlags::SET_ACCESSOR,
    DeclKind::CallSignature | DeclKind::ConstructSignature | DeclKind::IndexSignature => {
      SymbolFlags::SIGNATURE
    }
    DeclKind::ExportSpecifier => SymbolFlags::ALIAS,
  }
}

impl MemoryProgram {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_json(source: &str) -> Result<Self, ProgramError> {
    let program: MemoryProgram = serde_json::from_str(source)?;
    program.validate()?;
    Ok(program)
  }

  pub fn to_json(&self) -> Result<String, ProgramError> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Checks every cross-reference so queries can index without failing, and
  /// that parent chains end.
  pub fn validate(&self) -> Result<(), ProgramError> {
    let symbol = |id: SymbolId| {
      if (id.0 as usize) < self.symbols.len() {
        Ok(())
      } else {
        Err(ProgramError::DanglingId {
          what: "symbol",
          id: id.0,
        })
      }
    };
    let decl = |id: DeclId| {
      if (id.0 as usize) < self.declarations.len() {
        Ok(())
      } else {
        Err(ProgramError::DanglingId {
          what: "declaration",
          id: id.0,
        })
      }
    };
    let file = |id: FileId| {
      if (id.0 as usize) < self.files.len() {
        Ok(())
      } else {
        Err(ProgramError::DanglingId {
          what: "file",
          id: id.0,
        })
      }
    };

    for entry in &self.files {
      if let Some(module) = entry.module_symbol {
        symbol(module)?;
      }
      entry.statements.iter().copied().try_for_each(symbol)?;
    }
    for entry in &self.symbols {
      entry.symbol.declarations.iter().copied().try_for_each(decl)?;
      entry.exports.iter().copied().try_for_each(symbol)?;
      if let Some(parent) = entry.symbol.parent {
        symbol(parent)?;
      }
      if let Some(target) = entry.alias_of {
        symbol(target)?;
      }
    }
    for entry in &self.declarations {
      let d = &entry.decl;
      file(d.file)?;
      d.parameters.iter().copied().try_for_each(decl)?;
      d.members.iter().copied().try_for_each(decl)?;
      if let Some(body) = d.body {
        symbol(body)?;
      }
      if let Some(sym) = d.symbol {
        symbol(sym)?;
      }
    }
    for start in 0..self.symbols.len() {
      let mut current = self.symbols[start].symbol.parent;
      for _ in 0..self.symbols.len() {
        match current {
          Some(parent) => current = self.symbols[parent.0 as usize].symbol.parent,
          None => break,
        }
      }
      if current.is_some() {
        return Err(ProgramError::ParentCycle {
          symbol: start as u32,
        });
      }
    }
    Ok(())
  }

  pub fn add_file(&mut self, name: impl Into<String>) -> FileId {
    let id = FileId(self.files.len() as u32);
    self.files.push(MemoryFile {
      name: name.into(),
      module_symbol: None,
      statements: Vec::new(),
    });
    id
  }

  pub fn add_symbol(
    &mut self,
    name: impl Into<String>,
    flags: SymbolFlags,
    parent: Option<SymbolId>,
  ) -> SymbolId {
    let id = SymbolId(self.symbols.len() as u32);
    self.symbols.push(SymbolEntry {
      symbol: SymbolData {
        name: name.into(),
        flags,
        declarations: Vec::new(),
        parent,
      },
      exports: Vec::new(),
      alias_of: None,
    });
    id
  }

  /// Adds a declaration, attaching it to `symbol` when given. The symbol gains
  /// the flags the declaration kind implies.
  pub fn add_declaration(&mut self, symbol: Option<SymbolId>, mut decl: Declaration) -> DeclId {
    let id = DeclId(self.declarations.len() as u32);
    decl.symbol = symbol;
    if let Some(symbol) = symbol {
      let flags = symbol_flags_for(&decl);
      let entry = &mut self.symbols[symbol.0 as usize];
      entry.symbol.flags |= flags;
      entry.symbol.declarations.push(id);
    }
    self.declarations.push(DeclEntry {
      decl,
      inferred_type: None,
      inferred_return_type: None,
    });
    id
  }

  /// Creates a module file: the file, its module symbol and the source file
  /// declaration.
  pub fn add_module_file(&mut self, name: impl Into<String>) -> (FileId, SymbolId) {
    let name: String = name.into();
    let file = self.add_file(name.clone());
    let stem = name.rsplit('/').next().unwrap_or(&name);
    let stem = stem.split('.').next().unwrap_or(stem);
    let symbol = self.add_symbol(format!("\"{stem}\""), SymbolFlags::empty(), None);
    self.add_declaration(Some(symbol), Declaration::new(DeclKind::SourceFile, file, &name));
    self.files[file.0 as usize].module_symbol = Some(symbol);
    (file, symbol)
  }

  /// Declares a named entity inside `parent` (a module or namespace symbol),
  /// returning the new symbol and its declaration.
  pub fn declare(&mut self, parent: Option<SymbolId>, decl: Declaration) -> (SymbolId, DeclId) {
    let symbol = self.add_symbol(decl.name.clone(), SymbolFlags::empty(), parent);
    let id = self.add_declaration(Some(symbol), decl);
    (symbol, id)
  }

  /// Adds another declaration to an existing symbol (declaration merging).
  pub fn merge_declaration(&mut self, symbol: SymbolId, decl: Declaration) -> DeclId {
    self.add_declaration(Some(symbol), decl)
  }

  /// Appends a member declaration to a class, interface or enum declaration.
  pub fn add_member(&mut self, owner: DeclId, decl: Declaration) -> DeclId {
    let parent = self.declarations[owner.0 as usize].decl.symbol;
    let (_, id) = self.declare(parent, decl);
    self.declarations[owner.0 as usize].decl.members.push(id);
    id
  }

  /// Appends a parameter to a callable declaration.
  pub fn add_parameter(&mut self, callable: DeclId, decl: Declaration) -> DeclId {
    let id = self.add_declaration(None, decl);
    self.declarations[callable.0 as usize].decl.parameters.push(id);
    id
  }

  pub fn add_statement(&mut self, file: FileId, symbol: SymbolId) {
    self.files[file.0 as usize].statements.push(symbol);
  }

  pub fn add_export(&mut self, module: SymbolId, export: SymbolId) {
    self.symbols[module.0 as usize].exports.push(export);
  }

  /// Declares an alias symbol (re-export binding) named `name` in `module`.
  /// `target` may be `None` to model an alias the checker could not resolve.
  pub fn add_alias(
    &mut self,
    module: SymbolId,
    file: FileId,
    name: impl Into<String>,
    target: Option<SymbolId>,
  ) -> SymbolId {
    let (alias, _) = self.declare(
      Some(module),
      Declaration::new(DeclKind::ExportSpecifier, file, name),
    );
    self.symbols[alias.0 as usize].alias_of = target;
    self.add_export(module, alias);
    alias
  }

  pub fn set_body(&mut self, namespace: DeclId, body: SymbolId) {
    self.declarations[namespace.0 as usize].decl.body = Some(body);
  }

  pub fn set_inferred_type(&mut self, decl: DeclId, ty: impl Into<String>) {
    self.declarations[decl.0 as usize].inferred_type = Some(ty.into());
  }

  pub fn set_inferred_return_type(&mut self, decl: DeclId, ty: impl Into<String>) {
    self.declarations[decl.0 as usize].inferred_return_type = Some(ty.into());
  }

}

fn normalize_file_name(name: &str) -> &str {
  name.strip_prefix("./").unwrap_or(name)
}

impl SemanticProgram for MemoryProgram {
  fn source_file(&self, name: &str) -> Option<FileId> {
    let name = normalize_file_name(name);
    self
      .files
      .iter()
      .position(|file| normalize_file_name(&file.name) == name)
      .map(|idx| FileId(idx as u32))
  }

  fn file_name(&self, file: FileId) -> &str {
    &self.files[file.0 as usize].name
  }

  fn module_symbol(&self, file: FileId) -> Option<SymbolId> {
    self.files[file.0 as usize].module_symbol
  }

  fn statement_symbols(&self, file: FileId) -> Vec<SymbolId> {
    self.files[file.0 as usize].statements.clone()
  }

  fn symbol(&self, symbol: SymbolId) -> &SymbolData {
    &self.symbols[symbol.0 as usize].symbol
  }

  fn declaration(&self, decl: DeclId) -> &Declaration {
    &self.declarations[decl.0 as usize].decl
  }

  fn exports_of(&self, module: SymbolId) -> Vec<SymbolId> {
    self.symbols[module.0 as usize].exports.clone()
  }

  fn resolve_alias(&self, alias: SymbolId) -> Option<SymbolId> {
    let mut current = alias;
    // Each step visits a distinct symbol unless the chain loops.
    for _ in 0..=self.symbols.len() {
      let entry = &self.symbols[current.0 as usize];
      if !entry.symbol.is_alias() {
        return Some(current);
      }
      current = entry.alias_of?;
    }
    None
  }

  fn inferred_type(&self, decl: DeclId) -> Option<String> {
    self.declarations[decl.0 as usize].inferred_type.clone()
  }

  fn inferred_return_type(&self, decl: DeclId) -> Option<String> {
    self.declarations[decl.0 as usize]
      .inferred_return_type
      .clone()
  }
}
