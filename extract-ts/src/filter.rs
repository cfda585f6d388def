use crate::exports::ResolvedExport;
use crate::options::es_module_marker;
use regex::Regex;

/// Drops exports by name. The ES module marker is always dropped; caller
/// patterns add to it.
pub struct ExportFilter<'a> {
  patterns: &'a [Regex],
}

impl<'a> ExportFilter<'a> {
  pub fn new(patterns: &'a [Regex]) -> Self {
    ExportFilter { patterns }
  }

  pub fn is_ignored(&self, name: &str) -> bool {
    es_module_marker().is_match(name) || self.patterns.iter().any(|re| re.is_match(name))
  }

  pub fn retain(&self, exports: Vec<ResolvedExport>) -> Vec<ResolvedExport> {
    exports
      .into_iter()
      .filter(|export| !self.is_ignored(&export.name))
      .collect()
  }
}
