//! Module symbol collection.
use crate::error::ExtractError;
use crate::program::DeclKind;
use crate::program::FileId;
use crate::program::SemanticProgram;
use crate::program::SymbolId;
use ahash::AHashSet;
use tracing::warn;

/// A module symbol to document, with the file it was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectedModule {
  pub file: FileId,
  pub symbol: SymbolId,
}

/// Collects the module symbols of the requested files, in request order.
///
/// Module files contribute their file symbol. Script files contribute one
/// symbol per top-level statement that has one, each narrowed to the closest
/// namespace that actually exports something.
pub fn collect_modules<P: SemanticProgram + ?Sized>(
  program: &P,
  file_names: &[&str],
) -> Result<Vec<CollectedModule>, ExtractError> {
  let mut modules = Vec::new();
  for &name in file_names {
    let file = program
      .source_file(name)
      .ok_or_else(|| ExtractError::MissingSourceFile {
        file: name.to_string(),
      })?;

    if let Some(symbol) = program.module_symbol(file) {
      modules.push(CollectedModule { file, symbol });
      continue;
    }

    let statements = program.statement_symbols(file);
    if statements.is_empty() {
      warn!(file = name, "no module code found");
      continue;
    }
    modules.extend(
      statements
        .into_iter()
        .map(|symbol| CollectedModule {
          file,
          symbol: closest_exporting_symbol(program, symbol),
        }),
    );
  }
  Ok(modules)
}

/// Descends through namespaces that export nothing themselves and consist of a
/// single declaration whose body carries its own symbol (`namespace a.b.c`).
/// Stops at the last new symbol if the bodies loop.
pub fn closest_exporting_symbol<P: SemanticProgram + ?Sized>(
  program: &P,
  symbol: SymbolId,
) -> SymbolId {
  descend(program, symbol, &mut AHashSet::new())
}

fn descend<P: SemanticProgram + ?Sized>(
  program: &P,
  symbol: SymbolId,
  seen: &mut AHashSet<SymbolId>,
) -> SymbolId {
  seen.insert(symbol);
  let data = program.symbol(symbol);
  if !program.exports_of(symbol).is_empty() {
    return symbol;
  }
  let [decl] = data.declarations.as_slice() else {
    return symbol;
  };
  let decl = program.declaration(*decl);
  match (decl.kind, decl.body) {
    (DeclKind::Namespace, Some(body)) if !seen.contains(&body) => descend(program, body, seen),
    _ => symbol,
  }
}
