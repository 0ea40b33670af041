//! Generator configuration
//!
//! Defaults can be overridden in code with the `with_*` builders or loaded
//! from a TOML file:
//!
//! ```toml
//! targets = ["rust", "java"]
//! type_prefix = "M"
//!
//! [rust]
//! module = "macros"
//!
//! [java]
//! package = "org.example.macros"
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Language an emitter writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Rust,
    Java,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Rust => f.write_str("rust"),
            Target::Java => f.write_str("java"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RustConfig {
    /// File stem of the generated module
    pub module: String,
    /// Path generated code uses to reach the runtime
    pub runtime_path: String,
}

impl Default for RustConfig {
    fn default() -> Self {
        Self {
            module: "macros".to_string(),
            runtime_path: "macrogen::runtime".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JavaConfig {
    pub package: Option<String>,
}

/// Configuration of the code emitters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub targets: Vec<Target>,
    /// Prepended to every generated type name
    pub type_prefix: String,
    pub rust: RustConfig,
    pub java: JavaConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            targets: vec![Target::Rust],
            type_prefix: "M".to_string(),
            rust: RustConfig::default(),
            java: JavaConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_type_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.type_prefix = prefix.into();
        self
    }

    pub fn with_rust_module(mut self, module: impl Into<String>) -> Self {
        self.rust.module = module.into();
        self
    }

    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.rust.runtime_path = path.into();
        self
    }

    pub fn with_java_package(mut self, package: impl Into<String>) -> Self {
        self.java.package = Some(package.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.targets, vec![Target::Rust]);
        assert_eq!(config.type_prefix, "M");
        assert_eq!(config.rust.runtime_path, "macrogen::runtime");
        assert!(config.java.package.is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = GeneratorConfig::from_toml(
            r#"
            targets = ["rust", "java"]
            type_prefix = "T"

            [java]
            package = "org.example"
            "#,
        )
        .unwrap();
        assert_eq!(config.targets, vec![Target::Rust, Target::Java]);
        assert_eq!(config.type_prefix, "T");
        assert_eq!(config.rust.module, "macros");
        assert_eq!(config.java.package.as_deref(), Some("org.example"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_target() {
        let err = GeneratorConfig::from_toml(r#"targets = ["cobol"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = GeneratorConfig::from_file(Path::new("/nonexistent/macrogen.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_builders() {
        let config = GeneratorConfig::new()
            .with_targets(vec![Target::Java])
            .with_type_prefix("")
            .with_java_package("a.b");
        assert_eq!(config.targets, vec![Target::Java]);
        assert_eq!(config.type_prefix, "");
        assert_eq!(config.java.package.as_deref(), Some("a.b"));
    }
}
