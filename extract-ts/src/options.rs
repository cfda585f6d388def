//! Per-run extraction configuration.
use crate::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

/// Name of the ES module interop marker, in raw and compiler-escaped form.
pub const ES_MODULE_MARKER_PATTERN: &str = "^_{2,3}esModule$";

static ES_MODULE_MARKER: Lazy<Regex> = Lazy::new(|| {
  Regex::new(ES_MODULE_MARKER_PATTERN).expect("marker pattern is valid")
});

pub fn es_module_marker() -> &'static Regex {
  &ES_MODULE_MARKER
}

#[derive(Clone, Debug)]
pub struct ExtractOptions {
  /// Directory module ids are computed relative to.
  pub base_dir: String,
  /// Exports whose name matches any of these are skipped. The ES module marker
  /// is always skipped in addition.
  pub ignore_exports_matching: Vec<Regex>,
  /// Namespace qualifiers matching any of these are kept in rendered types.
  pub ignore_namespaces: Vec<Regex>,
  pub sort_class_members: bool,
  pub hide_private_members: bool,
}

impl Default for ExtractOptions {
  fn default() -> Self {
    ExtractOptions {
      base_dir: String::new(),
      ignore_exports_matching: Vec::new(),
      ignore_namespaces: Vec::new(),
      sort_class_members: true,
      hide_private_members: false,
    }
  }
}

fn compile(pattern: &str) -> Result<Regex, ExtractError> {
  Regex::new(pattern).map_err(|err| ExtractError::InvalidPattern {
    pattern: pattern.to_string(),
    message: err.to_string(),
  })
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, ExtractError> {
  patterns.iter().map(|p| compile(p.as_ref())).collect()
}

impl ExtractOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
    self.base_dir = base_dir.into();
    self
  }

  pub fn with_ignore_exports<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, ExtractError> {
    self.ignore_exports_matching.extend(compile_all(patterns)?);
    Ok(self)
  }

  pub fn with_ignore_namespaces<S: AsRef<str>>(
    mut self,
    patterns: &[S],
  ) -> Result<Self, ExtractError> {
    self.ignore_namespaces.extend(compile_all(patterns)?);
    Ok(self)
  }

  pub fn with_sort_class_members(mut self, sort: bool) -> Self {
    self.sort_class_members = sort;
    self
  }

  pub fn with_hide_private_members(mut self, hide: bool) -> Self {
    self.hide_private_members = hide;
    self
  }
}

/// Serialized form of [`ExtractOptions`], with patterns as strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOptions {
  pub base_dir: String,
  pub ignore_exports_matching: Vec<String>,
  #[serde(alias = "ignoreTypeScriptNamespaces")]
  pub ignore_namespaces: Vec<String>,
  pub sort_class_members: bool,
  pub hide_private_members: bool,
}

impl Default for RawOptions {
  fn default() -> Self {
    RawOptions {
      base_dir: String::new(),
      ignore_exports_matching: Vec::new(),
      ignore_namespaces: Vec::new(),
      sort_class_members: true,
      hide_private_members: false,
    }
  }
}

impl TryFrom<RawOptions> for ExtractOptions {
  type Error = ExtractError;

  fn try_from(raw: RawOptions) -> Result<Self, Self::Error> {
    let options = ExtractOptions::new()
      .with_base_dir(raw.base_dir)
      .with_ignore_exports(raw.ignore_exports_matching.as_slice())?
      .with_ignore_namespaces(raw.ignore_namespaces.as_slice())?
      .with_sort_class_members(raw.sort_class_members)
      .with_hide_private_members(raw.hide_private_members);
    Ok(options)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn marker_matches_raw_and_escaped_names() {
    let marker = es_module_marker();
    assert!(marker.is_match("__esModule"));
    assert!(marker.is_match("___esModule"));
    assert!(!marker.is_match("esModule"));
    assert!(!marker.is_match("__esModuleX"));
  }

  #[test]
  fn invalid_patterns_are_rejected_when_building_options() {
    let err = ExtractOptions::new()
      .with_ignore_exports(&["^_", "(unclosed"])
      .unwrap_err();
    match err {
      ExtractError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
      other => panic!("unexpected error {other:?}"),
    }
  }

  #[test]
  fn raw_options_default_to_sorted_members() {
    let raw: RawOptions =
      serde_json::from_str(r#"{"ignoreTypeScriptNamespaces": ["^angular"]}"#).unwrap();
    assert!(raw.sort_class_members);
    let opts = ExtractOptions::try_from(raw).unwrap();
    assert_eq!(opts.ignore_namespaces.len(), 1);
    assert!(opts.ignore_exports_matching.is_empty());
  }
}
