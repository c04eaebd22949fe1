//! Analyzer configuration.
//!
//! Loaded from TOML, every field optional:
//!
//! ```toml
//! stdlib = true
//! max_errors = 50
//!
//! [access]
//! default_visibility = "public"
//! private_scope = "same-module"
//! protected_scope = "subtree"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ast::types::Modifier;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Compile in standard-library mode until `STANDARDLIB_FINISH_CODE;`.
    pub stdlib: bool,
    /// Stop collecting diagnostics after this many.
    pub max_errors: Option<usize>,
    pub access: AccessPolicy,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub fn of(modifier: Modifier) -> Option<Visibility> {
        match modifier {
            Modifier::Public => Some(Visibility::Public),
            Modifier::Private => Some(Visibility::Private),
            Modifier::Protected => Some(Visibility::Protected),
            _ => None,
        }
    }
}

/// Which modules may see a restricted declaration, relative to the module
/// that owns it.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    /// Only the owning module itself.
    SameModule,
    /// The owning module and everything nested inside it.
    Subtree,
    /// The owning module's parent and everything nested inside that.
    Siblings,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccessPolicy {
    /// Visibility of declarations that carry no visibility modifier.
    pub default_visibility: Visibility,
    pub private_scope: Boundary,
    pub protected_scope: Boundary,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        AccessPolicy {
            default_visibility: Visibility::Public,
            private_scope: Boundary::SameModule,
            protected_scope: Boundary::Subtree,
        }
    }
}

impl AccessPolicy {
    /// The boundary that applies to a declaration with these modifiers, or
    /// `None` when it is visible everywhere.
    pub fn boundary_for(&self, modifiers: &[Modifier]) -> Option<Boundary> {
        let visibility = modifiers
            .iter()
            .find_map(|modifier| Visibility::of(*modifier))
            .unwrap_or(self.default_visibility);

        match visibility {
            Visibility::Public => None,
            Visibility::Private => Some(self.private_scope),
            Visibility::Protected => Some(self.protected_scope),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(content: &str) -> Result<AnalyzerConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<string>"),
            message: e.message().to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Standard-library mode with otherwise default settings.
    pub fn stdlib() -> AnalyzerConfig {
        AnalyzerConfig {
            stdlib: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = AnalyzerConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert!(!config.stdlib);
        assert_eq!(config.access.default_visibility, Visibility::Public);
    }

    #[test]
    fn parse_full_config() {
        let content = r#"
stdlib = true
max_errors = 10

[access]
default_visibility = "private"
private_scope = "subtree"
protected_scope = "siblings"
"#;
        let config = AnalyzerConfig::from_toml_str(content).unwrap();

        assert!(config.stdlib);
        assert_eq!(config.max_errors, Some(10));
        assert_eq!(config.access.default_visibility, Visibility::Private);
        assert_eq!(config.access.private_scope, Boundary::Subtree);
        assert_eq!(config.access.protected_scope, Boundary::Siblings);
    }

    #[test]
    fn parse_partial_access_table() {
        let config = AnalyzerConfig::from_toml_str("[access]\nprotected_scope = \"same-module\"\n").unwrap();

        assert_eq!(config.access.protected_scope, Boundary::SameModule);
        assert_eq!(config.access.private_scope, Boundary::SameModule);
        assert_eq!(config.access.default_visibility, Visibility::Public);
    }

    #[test]
    fn parse_invalid_toml() {
        let result = AnalyzerConfig::from_toml_str("stdlib = [");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn parse_unknown_boundary() {
        let result = AnalyzerConfig::from_toml_str("[access]\nprivate_scope = \"world\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file() {
        let result = AnalyzerConfig::load(Path::new("/nonexistent/mu.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn boundary_for_modifiers() {
        let policy = AccessPolicy::default();

        assert_eq!(policy.boundary_for(&[Modifier::Public]), None);
        assert_eq!(policy.boundary_for(&[]), None);
        assert_eq!(
            policy.boundary_for(&[Modifier::Mutable, Modifier::Private]),
            Some(Boundary::SameModule)
        );
        assert_eq!(policy.boundary_for(&[Modifier::Protected]), Some(Boundary::Subtree));

        let strict = AccessPolicy {
            default_visibility: Visibility::Private,
            ..AccessPolicy::default()
        };
        assert_eq!(strict.boundary_for(&[]), Some(Boundary::SameModule));
    }
}
