//! Code emission back ends
//!
//! Each [`Backend`] turns a [`CompilationUnit`] into source files for one
//! target language. Back ends never re-validate: they rely on the graph,
//! the name table and the catalog produced by [`crate::compile`].

pub mod java;
pub mod rust;

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{GeneratorConfig, Target};
use crate::CompilationUnit;

pub use java::JavaBackend;
pub use rust::RustBackend;

/// One emitted source file, path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// A code emitter for one target language
pub trait Backend {
    fn target(&self) -> Target;

    fn emit(&self, unit: &CompilationUnit) -> Vec<GeneratedFile>;
}

/// Back end for `target`, configured from `config`
pub fn backend(target: Target, config: &GeneratorConfig) -> Box<dyn Backend> {
    match target {
        Target::Rust => Box::new(RustBackend::new(config)),
        Target::Java => Box::new(JavaBackend::new(config)),
    }
}

/// Run every configured back end
pub fn generate(unit: &CompilationUnit, config: &GeneratorConfig) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    for target in &config.targets {
        let emitted = backend(*target, config).emit(unit);
        info!(%target, files = emitted.len(), "generated");
        files.extend(emitted);
    }
    files
}

/// Write files below `out_dir`, creating directories as needed
pub fn write_files(files: &[GeneratedFile], out_dir: &Path) -> io::Result<()> {
    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &file.contents)?;
        info!(path = %path.display(), bytes = file.contents.len(), "wrote");
    }
    Ok(())
}

/// Line-oriented source builder with block indentation
pub(crate) struct CodeWriter {
    lines: Vec<String>,
    indent: usize,
    unit: &'static str,
}

impl CodeWriter {
    pub(crate) fn new(unit: &'static str) -> Self {
        Self {
            lines: vec![],
            indent: 0,
            unit,
        }
    }

    fn indent_str(&self) -> String {
        self.unit.repeat(self.indent)
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", self.indent_str(), text));
        }
    }

    pub(crate) fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    /// Write `text` and indent what follows
    pub(crate) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedent and write `text`
    pub(crate) fn close(&mut self, text: impl AsRef<str>) {
        self.dedent();
        self.line(text);
    }

    pub(crate) fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Append `text` to the last written line
    pub(crate) fn append(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some(last) => last.push_str(text),
            None => self.lines.push(text.to_string()),
        }
    }

    pub(crate) fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
