//! macrogen - a compiler for template definitions
//!
//! A source file declares text and macro definitions. The compiler parses
//! them, validates the definition graph, assigns target-safe identifiers and
//! emits typed builder code. Generated Rust code links against [`runtime`],
//! which also renders trees directly from a compiled [`Catalog`](runtime::Catalog).
//!
//! # Example
//!
//! ```rust
//! use macrogen::runtime::{Arguments, Tree};
//!
//! let unit = macrogen::compile(r#"text pair(a, b) { a "," b }"#).unwrap();
//! let pair = unit.catalog.find("pair").unwrap();
//! let tree = Tree::new(
//!     &unit.catalog,
//!     pair,
//!     Arguments::new().param("Arnaud").param("Julien"),
//! )
//! .unwrap();
//! assert_eq!(tree.render(), "Arnaud,Julien");
//! ```

pub mod codegen;
pub mod config;
pub mod definition;
pub mod error;
pub mod parser;
pub mod runtime;

pub use codegen::{write_files, Backend, GeneratedFile};
pub use config::{ConfigError, GeneratorConfig, Target};
pub use definition::{DefinitionGraph, NameTable, SemanticError, ValidatedGraph};
pub use error::ParseError;
pub use parser::{parse, Document};
pub use runtime::{Catalog, RuntimeError};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while compiling a definition source
#[derive(Debug, Error)]
pub enum CompileError {
    /// Error during parsing
    #[error("parse errors: {}", join_errors(.0))]
    Parse(Vec<ParseError>),

    /// Errors found in the definition graph
    #[error("semantic errors: {}", join_errors(.0))]
    Semantic(Vec<SemanticError>),
}

impl From<Vec<ParseError>> for CompileError {
    fn from(errors: Vec<ParseError>) -> Self {
        CompileError::Parse(errors)
    }
}

impl From<Vec<SemanticError>> for CompileError {
    fn from(errors: Vec<SemanticError>) -> Self {
        CompileError::Semantic(errors)
    }
}

impl CompileError {
    /// Number of individual diagnostics
    pub fn len(&self) -> usize {
        match self {
            CompileError::Parse(errors) => errors.len(),
            CompileError::Semantic(errors) => errors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render every diagnostic against the source
    pub fn report(&self, source: &str, filename: &str) -> String {
        match self {
            CompileError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect(),
            CompileError::Semantic(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect(),
        }
    }
}

fn join_errors<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Everything the back ends need, produced by one successful compilation
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub graph: ValidatedGraph,
    pub names: NameTable,
    pub catalog: Catalog,
}

/// Parse and validate a definition source
///
/// Conversion errors (bad slot options) and validation errors are reported
/// together.
pub fn compile(source: &str) -> Result<CompilationUnit, CompileError> {
    let doc = parse(source)?;
    debug!(definitions = doc.definitions.len(), "parsed");
    let (graph, mut errors) = DefinitionGraph::convert(&doc);
    match definition::validate(graph) {
        Ok(graph) if errors.is_empty() => finish(graph),
        Ok(_) => Err(errors.into()),
        Err(found) => {
            errors.extend(found);
            Err(errors.into())
        }
    }
}

/// Validate a graph built in code and prepare it for emission
pub fn compile_graph(graph: DefinitionGraph) -> Result<CompilationUnit, CompileError> {
    finish(definition::validate(graph)?)
}

fn finish(graph: ValidatedGraph) -> Result<CompilationUnit, CompileError> {
    let names = NameTable::assign(&graph)?;
    let catalog = definition::lower(&graph);
    debug!(templates = catalog.len(), "compiled");
    Ok(CompilationUnit {
        graph,
        names,
        catalog,
    })
}

/// Compile a source and run every configured back end
pub fn generate(source: &str, config: &GeneratorConfig) -> Result<Vec<GeneratedFile>, CompileError> {
    let unit = compile(source)?;
    Ok(codegen::generate(&unit, config))
}
