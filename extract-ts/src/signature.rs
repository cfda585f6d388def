//! Call, construct and method signatures.
use crate::doc::ParameterDoc;
use crate::doc::Signature;
use crate::program::DeclId;
use crate::program::SemanticProgram;
use crate::types::TypeRenderer;

pub fn render_parameter<P: SemanticProgram + ?Sized>(
  renderer: &TypeRenderer<'_, P>,
  param: DeclId,
) -> ParameterDoc {
  let data = renderer.program().declaration(param);
  let name = if data.rest {
    format!("...{}", data.name)
  } else {
    data.name.clone()
  };
  let default_value = data.initializer.as_ref().map(|init| init.trim().to_string());
  ParameterDoc {
    name,
    ty: renderer.declared_type(param),
    optional: data.question || default_value.is_some(),
    default_value,
  }
}

pub fn render_parameters<P: SemanticProgram + ?Sized>(
  renderer: &TypeRenderer<'_, P>,
  callable: DeclId,
) -> Vec<ParameterDoc> {
  renderer
    .program()
    .declaration(callable)
    .parameters
    .iter()
    .map(|&param| render_parameter(renderer, param))
    .collect()
}

pub fn render_type_parameters<P: SemanticProgram + ?Sized>(
  renderer: &TypeRenderer<'_, P>,
  decl: DeclId,
) -> Vec<String> {
  renderer
    .program()
    .declaration(decl)
    .type_parameters
    .iter()
    .map(|tp| tp.trim().to_string())
    .collect()
}

/// Type parameters, parameters and return type of a callable declaration.
pub fn render_signature<P: SemanticProgram + ?Sized>(
  renderer: &TypeRenderer<'_, P>,
  callable: DeclId,
) -> Signature {
  Signature {
    type_parameters: render_type_parameters(renderer, callable),
    parameters: render_parameters(renderer, callable),
    return_type: renderer.return_type(callable),
  }
}
