//! Document graph produced by extraction.
//!
//! Documents are stored in a [`DocSet`], which is both the arena that owns
//! every document and the flat, ordered output list. Documents refer to each
//! other through [`DocId`] indices into that list: a module lists its exports,
//! an export lists its members, a member points back at its owner.
use crate::program::VarKeyword;
use derive_more::From;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DocId(pub u32);

impl fmt::Display for DocId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
  #[default]
  Public,
  Protected,
  Private,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
  pub file_name: String,
  pub start_line: u32,
  pub end_line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
  pub name: String,
  #[serde(rename = "type")]
  pub ty: String,
  pub optional: bool,
  pub default_value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
  pub type_parameters: Vec<String>,
  pub parameters: Vec<ParameterDoc>,
  pub return_type: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
  Property,
  Method,
  Constructor,
  GetAccessor,
  SetAccessor,
  EnumMember,
  CallSignature,
  ConstructSignature,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "docType", rename = "member", rename_all = "camelCase")]
pub struct MemberDoc {
  pub name: String,
  pub owner: DocId,
  pub member_kind: MemberKind,
  pub access: Access,
  pub is_static: bool,
  pub optional: bool,
  pub return_type: String,
  /// Present for callable members only.
  pub parameters: Option<Vec<ParameterDoc>>,
  pub type_parameters: Vec<String>,
  pub content: Option<String>,
  pub location: Option<SourceLocation>,
}

impl MemberDoc {
  pub fn is_callable(&self) -> bool {
    self.parameters.is_some()
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(
  tag = "docType",
  rename_all = "kebab-case",
  rename_all_fields = "camelCase"
)]
pub enum ExportKind {
  Class {
    type_parameters: Vec<String>,
    heritage: Vec<String>,
    is_abstract: bool,
    constructor: Option<DocId>,
    members: Vec<DocId>,
    statics: Vec<DocId>,
  },
  Interface {
    type_parameters: Vec<String>,
    heritage: Vec<String>,
    members: Vec<DocId>,
    call_member: Option<Box<MemberDoc>>,
    new_member: Option<Box<MemberDoc>>,
  },
  Function {
    #[serde(flatten)]
    signature: Signature,
  },
  Enum {
    members: Vec<DocId>,
  },
  Variable {
    keyword: VarKeyword,
    return_type: String,
  },
  TypeAlias {
    type_parameters: Vec<String>,
    type_definition: Option<String>,
  },
  /// The export could not be traced to a declaration.
  Unknown,
}

impl ExportKind {
  pub fn doc_type(&self) -> &'static str {
    match self {
      ExportKind::Class { .. } => "class",
      ExportKind::Interface { .. } => "interface",
      ExportKind::Function { .. } => "function",
      ExportKind::Enum { .. } => "enum",
      ExportKind::Variable { .. } => "variable",
      ExportKind::TypeAlias { .. } => "type-alias",
      ExportKind::Unknown => "unknown",
    }
  }

  /// Instance members (and enum members) in emitted order.
  pub fn members(&self) -> &[DocId] {
    match self {
      ExportKind::Class { members, .. }
      | ExportKind::Interface { members, .. }
      | ExportKind::Enum { members } => members,
      _ => &[],
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDoc {
  pub name: String,
  pub module: DocId,
  pub module_id: String,
  /// Module the symbol was declared in, for re-exports.
  pub original_module: Option<String>,
  pub content: Option<String>,
  pub location: Option<SourceLocation>,
  #[serde(flatten)]
  pub kind: ExportKind,
}

impl ExportDoc {
  pub fn doc_type(&self) -> &'static str {
    self.kind.doc_type()
  }

  pub fn members(&self) -> &[DocId] {
    self.kind.members()
  }

  /// Call signature member of an interface.
  pub fn call_member(&self) -> Option<&MemberDoc> {
    match &self.kind {
      ExportKind::Interface { call_member, .. } => call_member.as_deref(),
      _ => None,
    }
  }

  /// Construct signature member of an interface.
  pub fn new_member(&self) -> Option<&MemberDoc> {
    match &self.kind {
      ExportKind::Interface { new_member, .. } => new_member.as_deref(),
      _ => None,
    }
  }

  pub fn return_type(&self) -> Option<&str> {
    match &self.kind {
      ExportKind::Function { signature } => Some(&signature.return_type),
      ExportKind::Variable { return_type, .. } => Some(return_type),
      _ => None,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "docType", rename = "module", rename_all = "camelCase")]
pub struct ModuleDoc {
  /// Dotted identity joined with `/`, e.g. `example/test`.
  pub id: String,
  pub name: String,
  pub file_name: String,
  pub exports: Vec<DocId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, From)]
#[serde(untagged)]
pub enum Doc {
  Module(ModuleDoc),
  Export(ExportDoc),
  Member(MemberDoc),
}

impl Doc {
  pub fn name(&self) -> &str {
    match self {
      Doc::Module(doc) => &doc.name,
      Doc::Export(doc) => &doc.name,
      Doc::Member(doc) => &doc.name,
    }
  }

  pub fn doc_type(&self) -> &'static str {
    match self {
      Doc::Module(_) => "module",
      Doc::Export(doc) => doc.doc_type(),
      Doc::Member(_) => "member",
    }
  }

  pub fn as_module(&self) -> Option<&ModuleDoc> {
    match self {
      Doc::Module(doc) => Some(doc),
      _ => None,
    }
  }

  pub fn as_export(&self) -> Option<&ExportDoc> {
    match self {
      Doc::Export(doc) => Some(doc),
      _ => None,
    }
  }

  pub fn as_member(&self) -> Option<&MemberDoc> {
    match self {
      Doc::Member(doc) => Some(doc),
      _ => None,
    }
  }
}

/// Every document of one extraction run, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocSet {
  docs: Vec<Doc>,
}

impl DocSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, doc: impl Into<Doc>) -> DocId {
    let id = DocId(self.docs.len() as u32);
    self.docs.push(doc.into());
    id
  }

  pub fn len(&self) -> usize {
    self.docs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.docs.is_empty()
  }

  pub fn docs(&self) -> &[Doc] {
    &self.docs
  }

  pub fn get(&self, id: DocId) -> Option<&Doc> {
    self.docs.get(id.0 as usize)
  }

  pub(crate) fn get_mut(&mut self, id: DocId) -> Option<&mut Doc> {
    self.docs.get_mut(id.0 as usize)
  }

  pub fn modules(&self) -> impl Iterator<Item = &ModuleDoc> {
    self.docs.iter().filter_map(Doc::as_module)
  }

  pub fn exports(&self) -> impl Iterator<Item = &ExportDoc> {
    self.docs.iter().filter_map(Doc::as_export)
  }

  pub fn members(&self) -> impl Iterator<Item = &MemberDoc> {
    self.docs.iter().filter_map(Doc::as_member)
  }

  pub fn by_doc_type<'a>(&'a self, doc_type: &'a str) -> impl Iterator<Item = &'a Doc> + 'a {
    self
      .docs
      .iter()
      .filter(move |doc| doc.doc_type() == doc_type)
  }

  pub fn find(&self, doc_type: &str, name: &str) -> Option<&Doc> {
    self
      .docs
      .iter()
      .find(|doc| doc.doc_type() == doc_type && doc.name() == name)
  }

  pub fn module(&self, id: &str) -> Option<&ModuleDoc> {
    self.modules().find(|module| module.id == id)
  }

  pub fn export(&self, id: DocId) -> Option<&ExportDoc> {
    self.get(id).and_then(Doc::as_export)
  }

  pub fn member(&self, id: DocId) -> Option<&MemberDoc> {
    self.get(id).and_then(Doc::as_member)
  }

  /// Resolves a list of member ids, skipping ids that are not members.
  pub fn resolve_members<'a>(&'a self, ids: &'a [DocId]) -> impl Iterator<Item = &'a MemberDoc> + 'a {
    ids.iter().filter_map(|id| self.member(*id))
  }

  /// Resolves a module's export list.
  pub fn module_exports<'a>(&'a self, module: &'a ModuleDoc) -> impl Iterator<Item = &'a ExportDoc> + 'a {
    module.exports.iter().filter_map(|id| self.export(*id))
  }

  pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
    if pretty {
      serde_json::to_string_pretty(self)
    } else {
      serde_json::to_string(self)
    }
  }
}
