//! Documentation model extraction for TypeScript programs.
//!
//! Extraction consults a built semantic program (see [`program`]) instead of
//! raw syntax and produces a [`DocSet`]: a flat, ordered list of module, export
//! and member documents that reference each other by [`DocId`].
//!
//! ```
//! use extract_ts::memory::MemoryProgram;
//! use extract_ts::program::{DeclKind, Declaration};
//! use extract_ts::{extract, ExtractOptions};
//!
//! let mut program = MemoryProgram::new();
//! let (file, module) = program.add_module_file("greeter.ts");
//! let mut greet = Declaration::new(DeclKind::Function, file, "greet");
//! greet.type_annotation = Some("string".into());
//! let (symbol, _) = program.declare(Some(module), greet);
//! program.add_export(module, symbol);
//!
//! let docs = extract(&program, &["greeter.ts"], &ExtractOptions::default()).unwrap();
//! let greet = docs.exports().next().unwrap();
//! assert_eq!(greet.module_id, "greeter");
//! assert_eq!(greet.doc_type(), "function");
//! assert_eq!(greet.return_type(), Some("string"));
//! ```
//!
//! Processing order:
//! 1. [`collect`] finds the module symbols of each requested file;
//! 2. [`exports`] pairs each export with its declared symbol, through aliases;
//! 3. [`filter`] drops ignored export names;
//! 4. [`members`], [`types`] and [`signature`] build the export documents;
//! 5. [`unify`] merges modules that share an id across files.

pub mod collect;
pub mod doc;
pub mod error;
pub mod exports;
pub mod extract;
pub mod filter;
pub mod memory;
pub mod members;
pub mod options;
pub mod program;
pub mod signature;
pub mod types;
pub mod unify;

pub use doc::Access;
pub use doc::Doc;
pub use doc::DocId;
pub use doc::DocSet;
pub use doc::ExportDoc;
pub use doc::ExportKind;
pub use doc::MemberDoc;
pub use doc::ModuleDoc;
pub use doc::ParameterDoc;
pub use error::ExtractError;
pub use extract::extract;
pub use options::ExtractOptions;
pub use options::RawOptions;
pub use program::SemanticProgram;
