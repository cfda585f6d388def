//! Read-only contract for the semantic program consulted during extraction.
//!
//! A semantic program is built elsewhere (by a compiler service) from a set of
//! root files. Extraction never mutates it; it only asks the narrow set of
//! questions on [`SemanticProgram`]:
//!
//! - which file a requested name resolves to, and the module symbol of that
//!   file (absent for script files without top-level imports/exports);
//! - which top-level statements carry a symbol;
//! - the export list of a module or namespace symbol, with wildcard
//!   re-exports already flattened;
//! - the original symbol behind an alias;
//! - the display string of an inferred type.
//!
//! Symbols and declarations are addressed through dense ids, in the same way
//! the binder hands out `SymbolId`/`DeclId` indices. Declaration data keeps the
//! source text of annotations so types can be rendered as written.
use bitflags::bitflags;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl fmt::Display for FileId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl fmt::Display for SymbolId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl fmt::Display for DeclId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

bitflags! {
  /// What a symbol stands for. A symbol may carry several flags when
  /// declarations merge (e.g. a class merged with a namespace).
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
  #[serde(transparent)]
  pub struct SymbolFlags: u32 {
    const FUNCTION_SCOPED_VARIABLE = 1 << 0;
    const BLOCK_SCOPED_VARIABLE = 1 << 1;
    const PROPERTY = 1 << 2;
    const ENUM_MEMBER = 1 << 3;
    const FUNCTION = 1 << 4;
    const CLASS = 1 << 5;
    const INTERFACE = 1 << 6;
    const CONST_ENUM = 1 << 7;
    const REGULAR_ENUM = 1 << 8;
    const VALUE_MODULE = 1 << 9;
    const NAMESPACE_MODULE = 1 << 10;
    const METHOD = 1 << 11;
    const CONSTRUCTOR = 1 << 12;
    const GET_ACCESSOR = 1 << 13;
    const SET_ACCESSOR = 1 << 14;
    const SIGNATURE = 1 << 15;
    const TYPE_ALIAS = 1 << 16;
    const ALIAS = 1 << 17;

    const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits() | Self::BLOCK_SCOPED_VARIABLE.bits();
    const ENUM = Self::CONST_ENUM.bits() | Self::REGULAR_ENUM.bits();
    const MODULE = Self::VALUE_MODULE.bits() | Self::NAMESPACE_MODULE.bits();
  }
}

bitflags! {
  /// Syntactic modifiers present on a declaration.
  #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
  #[serde(transparent)]
  pub struct ModifierFlags: u16 {
    const EXPORT = 1 << 0;
    const DECLARE = 1 << 1;
    const PUBLIC = 1 << 2;
    const PROTECTED = 1 << 3;
    const PRIVATE = 1 << 4;
    const STATIC = 1 << 5;
    const READONLY = 1 << 6;
    const ABSTRACT = 1 << 7;
    const ASYNC = 1 << 8;
    const CONST = 1 << 9;
    const DEFAULT = 1 << 10;

    const ACCESSIBILITY = Self::PUBLIC.bits() | Self::PROTECTED.bits() | Self::PRIVATE.bits();
    /// Modifiers that turn a constructor parameter into a class property.
    const PARAMETER_PROPERTY = Self::ACCESSIBILITY.bits() | Self::READONLY.bits();
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
  SourceFile,
  Namespace,
  Class,
  Interface,
  Function,
  Enum,
  EnumMember,
  Variable,
  TypeAlias,
  Property,
  Method,
  Constructor,
  GetAccessor,
  SetAccessor,
  CallSignature,
  ConstructSignature,
  IndexSignature,
  Parameter,
  /// `export { a as b } from "./mod"`, `import { a } from "./mod"`.
  ExportSpecifier,
}

impl DeclKind {
  pub fn is_callable(self) -> bool {
    matches!(
      self,
      DeclKind::Function
        | DeclKind::Method
        | DeclKind::Constructor
        | DeclKind::CallSignature
        | DeclKind::ConstructSignature
    )
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKeyword {
  Var,
  Let,
  Const,
}

/// 1-based inclusive line range of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
  pub start: u32,
  pub end: u32,
}

/// Syntax-level facts about one declaration. Text fields hold source text as
/// written; absent annotations are `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
  pub kind: DeclKind,
  pub file: FileId,
  pub name: String,
  #[serde(default)]
  pub modifiers: ModifierFlags,
  /// `?` marker on properties, methods and parameters.
  #[serde(default)]
  pub question: bool,
  /// `...` marker on parameters.
  #[serde(default)]
  pub rest: bool,
  /// Type annotation, or the declared return type for callables.
  #[serde(default)]
  pub type_annotation: Option<String>,
  #[serde(default)]
  pub initializer: Option<String>,
  #[serde(default)]
  pub type_parameters: Vec<String>,
  #[serde(default)]
  pub parameters: Vec<DeclId>,
  /// Class, interface and enum members in source order.
  #[serde(default)]
  pub members: Vec<DeclId>,
  /// `extends`/`implements` clauses as written.
  #[serde(default)]
  pub heritage: Vec<String>,
  /// Symbol of the body of a namespace declaration. For `namespace a.b {}`
  /// the body of `a` is the declaration of `b`.
  #[serde(default)]
  pub body: Option<SymbolId>,
  #[serde(default)]
  pub var_keyword: Option<VarKeyword>,
  /// Whether a function body contains a `return <expr>` statement.
  #[serde(default)]
  pub returns_value: bool,
  /// Leading doc comment with the comment markers removed.
  #[serde(default)]
  pub doc_comment: Option<String>,
  #[serde(default)]
  pub lines: Option<LineRange>,
  /// Symbol this declaration binds, if any.
  #[serde(default)]
  pub symbol: Option<SymbolId>,
}

impl Declaration {
  pub fn new(kind: DeclKind, file: FileId, name: impl Into<String>) -> Self {
    Declaration {
      kind,
      file,
      name: name.into(),
      modifiers: ModifierFlags::empty(),
      question: false,
      rest: false,
      type_annotation: None,
      initializer: None,
      type_parameters: Vec::new(),
      parameters: Vec::new(),
      members: Vec::new(),
      heritage: Vec::new(),
      body: None,
      var_keyword: None,
      returns_value: false,
      doc_comment: None,
      lines: None,
      symbol: None,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolData {
  pub name: String,
  pub flags: SymbolFlags,
  #[serde(default)]
  pub declarations: Vec<DeclId>,
  /// Enclosing namespace or file module symbol.
  #[serde(default)]
  pub parent: Option<SymbolId>,
}

impl SymbolData {
  pub fn is_alias(&self) -> bool {
    self.flags.contains(SymbolFlags::ALIAS)
  }

  pub fn is_module(&self) -> bool {
    self.flags.intersects(SymbolFlags::MODULE)
  }
}

/// Query surface of a built semantic program.
///
/// Implementations answer from data computed up front; every method is a pure
/// read. Ids handed out by one method are always valid arguments to the
/// others.
pub trait SemanticProgram {
  /// Resolves a requested file name to a source file of the program.
  fn source_file(&self, name: &str) -> Option<FileId>;

  fn file_name(&self, file: FileId) -> &str;

  /// Module symbol of a file; `None` for script files.
  fn module_symbol(&self, file: FileId) -> Option<SymbolId>;

  /// Symbols attached to the file's top-level statements, in source order.
  fn statement_symbols(&self, file: FileId) -> Vec<SymbolId>;

  fn symbol(&self, symbol: SymbolId) -> &SymbolData;

  fn declaration(&self, decl: DeclId) -> &Declaration;

  /// Exports of a module or namespace symbol in declaration order.
  fn exports_of(&self, module: SymbolId) -> Vec<SymbolId>;

  /// Original symbol behind an alias, following re-export chains to the end.
  fn resolve_alias(&self, alias: SymbolId) -> Option<SymbolId>;

  /// Display string of the type the checker inferred for a declaration.
  fn inferred_type(&self, decl: DeclId) -> Option<String>;

  /// Display string of the inferred return type of a callable declaration.
  fn inferred_return_type(&self, decl: DeclId) -> Option<String>;
}
