//! Classification and ordering of class, interface and enum members.
//!
//! Members come from the member lists of every declaration of the owning
//! symbol, in source order. A constructor is documented as a member named
//! `constructor`; each of its parameter properties (`constructor(public x:
//! string)`) becomes an extra property member. With member sorting on (the
//! default) those follow the constructor directly; with it off they are
//! appended after the declared members.
use crate::doc::Access;
use crate::doc::DocId;
use crate::doc::MemberDoc;
use crate::doc::MemberKind;
use crate::doc::SourceLocation;
use crate::options::ExtractOptions;
use crate::program::DeclId;
use crate::program::DeclKind;
use crate::program::Declaration;
use crate::program::ModifierFlags;
use crate::program::SemanticProgram;
use crate::signature::render_signature;
use crate::types::TypeRenderer;
use ahash::AHashSet;

pub fn access_of(modifiers: ModifierFlags) -> Access {
  if modifiers.contains(ModifierFlags::PRIVATE) {
    Access::Private
  } else if modifiers.contains(ModifierFlags::PROTECTED) {
    Access::Protected
  } else {
    Access::Public
  }
}

fn member_kind(kind: DeclKind) -> Option<MemberKind> {
  Some(match kind {
    DeclKind::Property => MemberKind::Property,
    DeclKind::Method => MemberKind::Method,
    DeclKind::Constructor => MemberKind::Constructor,
    DeclKind::GetAccessor => MemberKind::GetAccessor,
    DeclKind::SetAccessor => MemberKind::SetAccessor,
    DeclKind::EnumMember => MemberKind::EnumMember,
    DeclKind::CallSignature => MemberKind::CallSignature,
    DeclKind::ConstructSignature => MemberKind::ConstructSignature,
    _ => return None,
  })
}

/// Where a classified member came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberSource {
  Declared,
  /// Constructor parameter declared with an access or `readonly` modifier.
  ParameterProperty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedMember {
  pub decl: DeclId,
  pub name: String,
  pub kind: MemberKind,
  pub access: Access,
  pub is_static: bool,
  pub source: MemberSource,
}

/// Members of one owner in emission order, plus the interface signatures that
/// are documented separately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberLayout {
  pub ordered: Vec<ClassifiedMember>,
  pub call_signature: Option<DeclId>,
  pub construct_signature: Option<DeclId>,
}

/// Whether `hide_private_members` drops a class member. Interface and enum
/// members are never hidden.
fn is_hidden(name: &str, access: Access, options: &ExtractOptions) -> bool {
  options.hide_private_members && (access == Access::Private || name.starts_with('_'))
}

fn parameter_properties<P: SemanticProgram + ?Sized>(
  program: &P,
  constructor: &Declaration,
  options: &ExtractOptions,
) -> Vec<ClassifiedMember> {
  constructor
    .parameters
    .iter()
    .filter_map(|&param| {
      let data = program.declaration(param);
      if !data.modifiers.intersects(ModifierFlags::PARAMETER_PROPERTY) {
        return None;
      }
      let access = access_of(data.modifiers);
      if is_hidden(&data.name, access, options) {
        return None;
      }
      Some(ClassifiedMember {
        decl: param,
        name: data.name.clone(),
        kind: MemberKind::Property,
        access,
        is_static: false,
        source: MemberSource::ParameterProperty,
      })
    })
    .collect()
}

/// Classifies the members of every declaration in `owner_decls`.
pub fn classify_members<P: SemanticProgram + ?Sized>(
  program: &P,
  owner_decls: &[DeclId],
  options: &ExtractOptions,
) -> MemberLayout {
  let mut layout = MemberLayout::default();
  let mut trailing = Vec::new();
  // Overloads and accessor pairs share one member.
  let mut seen = AHashSet::new();

  for &owner in owner_decls {
    let is_class = program.declaration(owner).kind == DeclKind::Class;
    for &decl in &program.declaration(owner).members {
      let data = program.declaration(decl);
      let Some(kind) = member_kind(data.kind) else {
        continue;
      };
      match kind {
        MemberKind::CallSignature => {
          layout.call_signature.get_or_insert(decl);
          continue;
        }
        MemberKind::ConstructSignature => {
          layout.construct_signature.get_or_insert(decl);
          continue;
        }
        _ => {}
      }

      let is_static = data.modifiers.contains(ModifierFlags::STATIC);
      let name = if kind == MemberKind::Constructor {
        "constructor".to_string()
      } else {
        data.name.clone()
      };
      if !seen.insert((name.clone(), is_static)) {
        continue;
      }
      let access = access_of(data.modifiers);
      if is_class && kind != MemberKind::Constructor && is_hidden(&name, access, options) {
        continue;
      }

      layout.ordered.push(ClassifiedMember {
        decl,
        name,
        kind,
        access,
        is_static,
        source: MemberSource::Declared,
      });
      if kind == MemberKind::Constructor {
        let props = parameter_properties(program, data, options);
        if options.sort_class_members {
          layout.ordered.extend(props);
        } else {
          trailing.extend(props);
        }
      }
    }
  }

  layout.ordered.extend(trailing);
  layout
}

pub fn location_of<P: SemanticProgram + ?Sized>(program: &P, decl: &Declaration) -> Option<SourceLocation> {
  decl.lines.map(|lines| SourceLocation {
    file_name: program.file_name(decl.file).to_string(),
    start_line: lines.start,
    end_line: lines.end,
  })
}

/// Builds the document of a classified member. `owner_name` is the type a
/// constructor produces.
pub fn render_member<P: SemanticProgram + ?Sized>(
  renderer: &TypeRenderer<'_, P>,
  member: &ClassifiedMember,
  owner: DocId,
  owner_name: &str,
) -> MemberDoc {
  let program = renderer.program();
  let data = program.declaration(member.decl);
  let mut doc = MemberDoc {
    name: member.name.clone(),
    owner,
    member_kind: member.kind,
    access: member.access,
    is_static: member.is_static,
    optional: data.question,
    return_type: String::new(),
    parameters: None,
    type_parameters: Vec::new(),
    content: data.doc_comment.clone(),
    location: location_of(program, data),
  };

  match member.kind {
    MemberKind::Method | MemberKind::CallSignature | MemberKind::ConstructSignature => {
      let signature = render_signature(renderer, member.decl);
      doc.return_type = signature.return_type;
      doc.parameters = Some(signature.parameters);
      doc.type_parameters = signature.type_parameters;
    }
    MemberKind::Constructor => {
      let signature = render_signature(renderer, member.decl);
      doc.return_type = match data.type_annotation {
        Some(_) => signature.return_type,
        None => owner_name.to_string(),
      };
      doc.parameters = Some(signature.parameters);
      doc.type_parameters = signature.type_parameters;
    }
    MemberKind::EnumMember => {
      doc.return_type = program
        .inferred_type(member.decl)
        .map(|ty| renderer.display(&ty))
        .unwrap_or_else(|| owner_name.to_string());
    }
    MemberKind::Property | MemberKind::GetAccessor | MemberKind::SetAccessor => {
      doc.return_type = renderer.declared_type(member.decl);
    }
  }
  doc
}
