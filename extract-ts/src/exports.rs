//! Export resolution: pairs every export name with the symbol it was declared
//! as, looking through re-export aliases.
use crate::program::SemanticProgram;
use crate::program::SymbolId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedExport {
  /// Name the module exports the symbol under.
  pub name: String,
  /// Symbol as listed in the module's exports; the alias for re-exports.
  pub symbol: SymbolId,
  /// Declared symbol behind the export. `None` when an alias chain could not
  /// be resolved.
  pub target: Option<SymbolId>,
}

pub fn resolve_export<P: SemanticProgram + ?Sized>(program: &P, symbol: SymbolId) -> ResolvedExport {
  let data = program.symbol(symbol);
  let target = if data.is_alias() {
    program.resolve_alias(symbol)
  } else {
    Some(symbol)
  };
  ResolvedExport {
    name: data.name.clone(),
    symbol,
    target,
  }
}

/// Exports of a module in the order the program lists them.
pub fn resolve_exports<P: SemanticProgram + ?Sized>(
  program: &P,
  module: SymbolId,
) -> Vec<ResolvedExport> {
  program
    .exports_of(module)
    .into_iter()
    .map(|symbol| resolve_export(program, symbol))
    .collect()
}
