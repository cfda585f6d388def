//! Extraction driver: walks collected modules and emits the document graph.
use crate::collect::collect_modules;
use crate::doc::Access;
use crate::doc::Doc;
use crate::doc::DocId;
use crate::doc::DocSet;
use crate::doc::ExportDoc;
use crate::doc::ExportKind;
use crate::doc::MemberDoc;
use crate::doc::MemberKind;
use crate::error::ExtractError;
use crate::exports::resolve_exports;
use crate::exports::ResolvedExport;
use crate::filter::ExportFilter;
use crate::members::classify_members;
use crate::members::location_of;
use crate::members::render_member;
use crate::members::ClassifiedMember;
use crate::members::MemberLayout;
use crate::members::MemberSource;
use crate::options::ExtractOptions;
use crate::program::DeclId;
use crate::program::DeclKind;
use crate::program::ModifierFlags;
use crate::program::SemanticProgram;
use crate::program::SymbolFlags;
use crate::program::SymbolId;
use crate::program::VarKeyword;
use crate::signature::render_signature;
use crate::signature::render_type_parameters;
use crate::types::TypeRenderer;
use crate::unify::module_id;
use crate::unify::module_name;
use crate::unify::owning_module_id;
use crate::unify::ModuleTable;
use ahash::AHashSet;
use tracing::debug;
use tracing::debug_span;
use tracing::warn;

/// Extracts documents for `file_names`, in order.
///
/// Fails only when a requested file is not part of the program. Exports that
/// cannot be traced to a declaration are kept as `unknown` documents.
pub fn extract<P: SemanticProgram + ?Sized>(
  program: &P,
  file_names: &[&str],
  options: &ExtractOptions,
) -> Result<DocSet, ExtractError> {
  let collected = collect_modules(program, file_names)?;
  let mut extractor = Extractor::new(program, options);
  for module in collected {
    extractor.extract_module(module.symbol);
  }
  Ok(extractor.finish())
}

/// Which export document a declared symbol becomes. Checked in order, so a
/// class merged with a namespace is documented as a class.
fn export_kind_of(flags: SymbolFlags) -> Option<DeclKind> {
  [
    (SymbolFlags::FUNCTION, DeclKind::Function),
    (SymbolFlags::CLASS, DeclKind::Class),
    (SymbolFlags::INTERFACE, DeclKind::Interface),
    (SymbolFlags::ENUM, DeclKind::Enum),
    (SymbolFlags::TYPE_ALIAS, DeclKind::TypeAlias),
    (SymbolFlags::VARIABLE, DeclKind::Variable),
  ]
  .into_iter()
  .find(|(flag, _)| flags.intersects(*flag))
  .map(|(_, kind)| kind)
}

fn is_namespace_only(flags: SymbolFlags) -> bool {
  flags.intersects(SymbolFlags::MODULE) && export_kind_of(flags).is_none()
}

struct Extractor<'a, P: ?Sized> {
  program: &'a P,
  options: &'a ExtractOptions,
  filter: ExportFilter<'a>,
  renderer: TypeRenderer<'a, P>,
  docs: DocSet,
  modules: ModuleTable,
  /// Module symbols already walked. A symbol merged across files is listed by
  /// each of them but documented once; this also stops self-exporting
  /// namespaces.
  visited: AHashSet<SymbolId>,
}

impl<'a, P: SemanticProgram + ?Sized> Extractor<'a, P> {
  fn new(program: &'a P, options: &'a ExtractOptions) -> Self {
    Extractor {
      program,
      options,
      filter: ExportFilter::new(&options.ignore_exports_matching),
      renderer: TypeRenderer::new(program, &options.ignore_namespaces),
      docs: DocSet::new(),
      modules: ModuleTable::new(),
      visited: AHashSet::new(),
    }
  }

  fn finish(self) -> DocSet {
    self.docs
  }

  fn extract_module(&mut self, symbol: SymbolId) {
    if !self.visited.insert(symbol) {
      return;
    }
    let program = self.program;
    let base_dir = &self.options.base_dir;
    let id = module_id(program, base_dir, symbol);
    let name = module_name(program, base_dir, symbol);
    let file_name = program
      .symbol(symbol)
      .declarations
      .first()
      .map(|&decl| program.file_name(program.declaration(decl).file))
      .unwrap_or_default();

    let span = debug_span!("module", module = %id);
    let _guard = span.enter();
    let module = self
      .modules
      .get_or_insert(&mut self.docs, id.clone(), name, file_name);

    let exports = self.filter.retain(resolve_exports(program, symbol));
    for export in exports {
      match export.target {
        Some(target) if is_namespace_only(program.symbol(target).flags) => {
          self.extract_module(target);
        }
        _ => {
          let doc = self.extract_export(module, &id, &export);
          self.modules.append_export(&mut self.docs, module, doc);
        }
      }
    }
  }

  fn extract_export(&mut self, module: DocId, module_id: &str, export: &ResolvedExport) -> DocId {
    let program = self.program;
    let resolved = export.target.and_then(|target| {
      let data = program.symbol(target);
      let kind = export_kind_of(data.flags)?;
      let decls: Vec<DeclId> = data
        .declarations
        .iter()
        .copied()
        .filter(|&decl| program.declaration(decl).kind == kind)
        .collect();
      (!decls.is_empty()).then_some((target, kind, decls))
    });

    let Some((target, kind, decls)) = resolved else {
      warn!(export = %export.name, module = module_id, "export has no resolvable declaration");
      return self.docs.push(ExportDoc {
        name: export.name.clone(),
        module,
        module_id: module_id.to_string(),
        original_module: None,
        content: None,
        location: None,
        kind: ExportKind::Unknown,
      });
    };

    let primary = program.declaration(decls[0]);
    // Re-exports, including wildcard exports the program has flattened into
    // the module's export list, point at the module that declares them.
    let original_module = owning_module_id(program, &self.options.base_dir, target)
      .filter(|owner| owner.as_str() != module_id);
    let doc = self.docs.push(ExportDoc {
      name: export.name.clone(),
      module,
      module_id: module_id.to_string(),
      original_module,
      content: primary.doc_comment.clone(),
      location: location_of(program, primary),
      kind: ExportKind::Unknown,
    });

    let declared_name = &program.symbol(target).name;
    let kind = match kind {
      DeclKind::Class => self.class_kind(doc, declared_name, &decls),
      DeclKind::Interface => self.interface_kind(doc, declared_name, &decls),
      DeclKind::Enum => self.enum_kind(doc, declared_name, &decls),
      DeclKind::Function => ExportKind::Function {
        signature: render_signature(&self.renderer, decls[0]),
      },
      DeclKind::TypeAlias => ExportKind::TypeAlias {
        type_parameters: render_type_parameters(&self.renderer, decls[0]),
        type_definition: primary
          .type_annotation
          .as_deref()
          .map(|ty| self.renderer.display(ty)),
      },
      _ => ExportKind::Variable {
        keyword: primary.var_keyword.unwrap_or(VarKeyword::Var),
        return_type: self.renderer.declared_type(decls[0]),
      },
    };
    debug!(export = %export.name, doc_type = kind.doc_type(), "extracted export");

    if let Some(Doc::Export(export_doc)) = self.docs.get_mut(doc) {
      export_doc.kind = kind;
    }
    doc
  }

  /// Emits member documents right after their owner, in layout order.
  fn push_members(
    &mut self,
    owner: DocId,
    owner_name: &str,
    layout: &MemberLayout,
  ) -> Vec<DocId> {
    layout
      .ordered
      .iter()
      .map(|member| {
        let rendered = render_member(&self.renderer, member, owner, owner_name);
        self.docs.push(rendered)
      })
      .collect()
  }

  fn class_kind(&mut self, doc: DocId, name: &str, decls: &[DeclId]) -> ExportKind {
    let program = self.program;
    let layout = classify_members(program, decls, self.options);
    let primary = program.declaration(decls[0]);
    let mut constructor = None;
    let mut members = Vec::new();
    let mut statics = Vec::new();
    let ids = self.push_members(doc, name, &layout);
    for (member, id) in layout.ordered.iter().zip(ids) {
      if member.kind == MemberKind::Constructor {
        constructor = Some(id);
      } else if member.is_static {
        statics.push(id);
      } else {
        members.push(id);
      }
    }
    ExportKind::Class {
      type_parameters: render_type_parameters(&self.renderer, decls[0]),
      heritage: primary.heritage.clone(),
      is_abstract: primary.modifiers.contains(ModifierFlags::ABSTRACT),
      constructor,
      members,
      statics,
    }
  }

  /// Interface call and construct signatures, documented on the interface
  /// itself rather than in its member list.
  fn signature_member(
    &self,
    owner: DocId,
    owner_name: &str,
    decl: Option<DeclId>,
    kind: MemberKind,
  ) -> Option<Box<MemberDoc>> {
    let member = ClassifiedMember {
      decl: decl?,
      name: match kind {
        MemberKind::ConstructSignature => "new".to_string(),
        _ => "call".to_string(),
      },
      kind,
      access: Access::Public,
      is_static: false,
      source: MemberSource::Declared,
    };
    Some(Box::new(render_member(&self.renderer, &member, owner, owner_name)))
  }

  fn interface_kind(&mut self, doc: DocId, name: &str, decls: &[DeclId]) -> ExportKind {
    let program = self.program;
    let layout = classify_members(program, decls, self.options);
    let members = self.push_members(doc, name, &layout);
    let call_member =
      self.signature_member(doc, name, layout.call_signature, MemberKind::CallSignature);
    let new_member = self.signature_member(
      doc,
      name,
      layout.construct_signature,
      MemberKind::ConstructSignature,
    );
    let primary = program.declaration(decls[0]);
    ExportKind::Interface {
      type_parameters: render_type_parameters(&self.renderer, decls[0]),
      heritage: primary.heritage.clone(),
      members,
      call_member,
      new_member,
    }
  }

  fn enum_kind(&mut self, doc: DocId, name: &str, decls: &[DeclId]) -> ExportKind {
    let layout = classify_members(self.program, decls, self.options);
    let members = self.push_members(doc, name, &layout);
    ExportKind::Enum { members }
  }
}
