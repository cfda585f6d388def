use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
  /// A requested file is not part of the semantic program.
  MissingSourceFile { file: String },
  /// A configured pattern failed to compile.
  InvalidPattern { pattern: String, message: String },
}

impl fmt::Display for ExtractError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExtractError::MissingSourceFile { file } => write!(f, "invalid source file: {file}"),
      ExtractError::InvalidPattern { pattern, message } => {
        write!(f, "invalid pattern '{pattern}': {message}")
      }
    }
  }
}

impl Error for ExtractError {}
