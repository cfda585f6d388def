//! Rendering of declared and inferred types to display strings.
use crate::program::DeclId;
use crate::program::DeclKind;
use crate::program::SemanticProgram;
use regex::Regex;

/// Type used when neither an annotation nor an inferred type is available.
pub const FALLBACK_TYPE: &str = "any";

pub struct TypeRenderer<'a, P: ?Sized> {
  program: &'a P,
  keep_namespaces: &'a [Regex],
}

impl<'a, P: SemanticProgram + ?Sized> TypeRenderer<'a, P> {
  pub fn new(program: &'a P, keep_namespaces: &'a [Regex]) -> Self {
    TypeRenderer {
      program,
      keep_namespaces,
    }
  }

  pub fn program(&self) -> &'a P {
    self.program
  }

  /// Type of a property, variable or parameter: the annotation as written,
  /// otherwise whatever the checker inferred.
  pub fn declared_type(&self, decl: DeclId) -> String {
    let data = self.program.declaration(decl);
    match data.kind {
      kind if kind.is_callable() || kind == DeclKind::GetAccessor => return self.return_type(decl),
      DeclKind::SetAccessor => {
        if let Some(param) = data.parameters.first() {
          return self.declared_type(*param);
        }
      }
      _ => {}
    }
    let raw = data
      .type_annotation
      .clone()
      .or_else(|| self.program.inferred_type(decl))
      .unwrap_or_else(|| FALLBACK_TYPE.to_string());
    self.display(&raw)
  }

  /// Return type of a callable. Bodies without a `return <expr>` and nothing
  /// inferred render as `void`.
  pub fn return_type(&self, decl: DeclId) -> String {
    let data = self.program.declaration(decl);
    let raw = match data
      .type_annotation
      .clone()
      .or_else(|| self.program.inferred_return_type(decl))
    {
      Some(raw) => raw,
      None if !data.returns_value => "void".to_string(),
      None => FALLBACK_TYPE.to_string(),
    };
    self.display(&raw)
  }

  /// Final form of a raw type string.
  pub fn display(&self, raw: &str) -> String {
    strip_namespaces(raw.trim(), self.keep_namespaces)
  }
}

fn is_ident_start(c: char) -> bool {
  c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '$'
}

fn keeps_qualifier(segments: &[&str], keep: &[Regex]) -> bool {
  (1..segments.len()).any(|len| {
    let qualifier = segments[..len].join(".");
    keep.iter().any(|re| re.is_match(&qualifier))
  })
}

/// Reduces every dotted name (`ng.core.Injector`) to its last segment, unless
/// one of its qualifiers matches a pattern in `keep`. String literal types and
/// numbers are left untouched.
pub fn strip_namespaces(text: &str, keep: &[Regex]) -> String {
  let chars: Vec<char> = text.chars().collect();
  let mut out = String::with_capacity(text.len());
  let mut i = 0;
  while i < chars.len() {
    let c = chars[i];
    if c == '"' || c == '\'' || c == '`' {
      let start = i;
      i += 1;
      while i < chars.len() && chars[i] != c {
        if chars[i] == '\\' {
          i += 1;
        }
        i += 1;
      }
      i = (i + 1).min(chars.len());
      out.extend(&chars[start..i]);
    } else if c.is_ascii_digit() {
      let start = i;
      while i < chars.len() && (is_ident_part(chars[i]) || chars[i] == '.') {
        i += 1;
      }
      out.extend(&chars[start..i]);
    } else if is_ident_start(c) {
      let mut segments = Vec::new();
      let start = i;
      loop {
        let seg_start = i;
        while i < chars.len() && is_ident_part(chars[i]) {
          i += 1;
        }
        segments.push((seg_start, i));
        let continues = i + 1 < chars.len() && chars[i] == '.' && is_ident_start(chars[i + 1]);
        if !continues {
          break;
        }
        i += 1;
      }
      if segments.len() == 1 {
        out.extend(&chars[start..i]);
        continue;
      }
      let names: Vec<String> = segments
        .iter()
        .map(|&(s, e)| chars[s..e].iter().collect())
        .collect();
      let names: Vec<&str> = names.iter().map(String::as_str).collect();
      if keeps_qualifier(&names, keep) {
        out.extend(&chars[start..i]);
      } else if let Some(last) = names.last() {
        out.push_str(last);
      }
    } else {
      out.push(c);
      i += 1;
    }
  }
  out
}
