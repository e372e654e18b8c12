//! Configuration module for DocRouter.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.
//! The loaded [`Config`] is turned once into immutable [`RoutingSettings`]
//! that the sweep consumes.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::destination::{expand_template, DestinationMapping};
use crate::domain::errors::DomainError;
use crate::domain::newtypes::DepartmentName;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for DocRouter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub clients: ClientsConfig,
    /// Department name to destination template, relative to the client folder.
    pub destinations: BTreeMap<String, String>,
    pub logging: LoggingConfig,
}

/// Where documents are picked up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Candidate source roots, in priority order. The first reachable one wins.
    pub candidates: Vec<PathBuf>,
    /// Department subfolders swept under the source root, in sweep order.
    pub departments: Vec<String>,
}

/// Where client folders are searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientsConfig {
    /// Drives searched in priority order. A single letter `X` means `X:\`;
    /// anything else is used as a literal path.
    pub drives: Vec<String>,
    /// Shared-folder root directly under each drive.
    pub shared_root: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Directory receiving the dated log files.
    pub directory: PathBuf,
    /// File name prefix; files are named `<prefix>_DD-MM-YYYY.txt`.
    pub file_prefix: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path`, or return [`Config::default`] when no file exists.
    ///
    /// # Errors
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/docrouter/config.yaml` on Linux and
    /// `%APPDATA%\docrouter\config.yaml` on Windows.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docrouter")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Config::default()
// ---------------------------------------------------------------------------

/// Department folders swept by default, in sweep order.
pub const DEFAULT_DEPARTMENTS: &[&str] = &["FOLHA", "CONTABIL", "PESSOAL", "FISCAL", "PATRIMONIO"];

impl Default for Config {
    fn default() -> Self {
        let destinations = DEFAULT_DEPARTMENTS
            .iter()
            .map(|d| {
                (
                    d.to_string(),
                    format!("3 CONTABIL/{{year}}/3 ROTINAS AUTOMATICAS/{d}"),
                )
            })
            .collect();
        Self {
            source: SourceConfig::default(),
            clients: ClientsConfig::default(),
            destinations,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                PathBuf::from(r"\\192.168.10.17\e\backup\ROTINAS_AUTOMATICAS"),
                PathBuf::from(r"O:\ROTINAS_AUTOMATICAS"),
            ],
            departments: DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            drives: vec!["I".to_string(), "G".to_string(), "F".to_string()],
            shared_root: "Drives compartilhados".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docrouter");
        Self {
            level: "info".to_string(),
            directory: data_dir.join("logs"),
            file_prefix: "automacao_log".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"clients.shared_root"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. Source candidates
    /// and drives are not checked for existence: they are network shares
    /// that may be offline at validation time.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- source ---
        if self.source.candidates.is_empty() {
            errors.push(ValidationError {
                field: "source.candidates".into(),
                message: "at least one source path is required".into(),
            });
        }
        for (i, candidate) in self.source.candidates.iter().enumerate() {
            if candidate.as_os_str().is_empty() {
                errors.push(ValidationError {
                    field: format!("source.candidates[{i}]"),
                    message: "must not be empty".into(),
                });
            }
        }
        if self.source.departments.is_empty() {
            errors.push(ValidationError {
                field: "source.departments".into(),
                message: "at least one department is required".into(),
            });
        }
        let mut seen = HashSet::new();
        for (i, department) in self.source.departments.iter().enumerate() {
            if let Err(e) = DepartmentName::new(department.as_str()) {
                errors.push(ValidationError {
                    field: format!("source.departments[{i}]"),
                    message: e.to_string(),
                });
            } else if !seen.insert(department.as_str()) {
                errors.push(ValidationError {
                    field: format!("source.departments[{i}]"),
                    message: format!("duplicate department '{department}'"),
                });
            }
        }

        // --- clients ---
        if self.clients.drives.is_empty() {
            errors.push(ValidationError {
                field: "clients.drives".into(),
                message: "at least one drive is required".into(),
            });
        }
        for (i, drive) in self.clients.drives.iter().enumerate() {
            if drive.trim().is_empty() {
                errors.push(ValidationError {
                    field: format!("clients.drives[{i}]"),
                    message: "must not be blank".into(),
                });
            }
        }
        if self.clients.shared_root.trim().is_empty() {
            errors.push(ValidationError {
                field: "clients.shared_root".into(),
                message: "must not be blank".into(),
            });
        }

        // --- destinations ---
        for department in &self.source.departments {
            if !self.destinations.contains_key(department) {
                errors.push(ValidationError {
                    field: format!("destinations.{department}"),
                    message: "department has no destination mapping".into(),
                });
            }
        }
        for (department, template) in &self.destinations {
            if let Err(e) = expand_template(template, 2000) {
                errors.push(ValidationError {
                    field: format!("destinations.{department}"),
                    message: e.to_string(),
                });
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }
        if self.logging.directory.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "logging.directory".into(),
                message: "must not be empty".into(),
            });
        }
        if self.logging.file_prefix.trim().is_empty() {
            errors.push(ValidationError {
                field: "logging.file_prefix".into(),
                message: "must not be blank".into(),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// RoutingSettings
// ---------------------------------------------------------------------------

/// Converts a configured drive entry into its root path.
///
/// A single ASCII letter, with or without a trailing colon, becomes the
/// Windows drive root `X:\`. Anything else is used verbatim.
pub fn drive_root(entry: &str) -> PathBuf {
    let entry = entry.trim();
    let letter = entry.strip_suffix(':').unwrap_or(entry);
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            PathBuf::from(format!("{}:\\", c.to_ascii_uppercase()))
        }
        _ => PathBuf::from(entry),
    }
}

/// Immutable settings for one process, derived once from [`Config`].
#[derive(Debug, Clone)]
pub struct RoutingSettings {
    pub source_candidates: Vec<PathBuf>,
    pub departments: Vec<DepartmentName>,
    pub drive_roots: Vec<PathBuf>,
    pub shared_root: String,
    pub mapping: DestinationMapping,
}

impl Config {
    /// Builds the routing settings, expanding `{year}` with `year`.
    ///
    /// Unmapped departments are kept: their files are rejected one by one
    /// during the sweep.
    ///
    /// # Errors
    /// Fails on an invalid department name or destination template.
    pub fn routing(&self, year: i32) -> Result<RoutingSettings, DomainError> {
        let departments = self
            .source
            .departments
            .iter()
            .map(|d| DepartmentName::new(d.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let templates = self
            .destinations
            .iter()
            .map(|(d, t)| DepartmentName::new(d.as_str()).map(|name| (name, t.clone())))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let mapping = DestinationMapping::from_templates(&templates, year)?;

        Ok(RoutingSettings {
            source_candidates: self.source.candidates.clone(),
            departments,
            drive_roots: self.clients.drives.iter().map(|d| drive_root(d)).collect(),
            shared_root: self.clients.shared_root.clone(),
            mapping,
        })
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use docrouter_core::config::ConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = ConfigBuilder::new()
///     .source_candidates(vec![PathBuf::from("/srv/staging")])
///     .drives(vec!["/mnt/i".to_string()])
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- source ---

    pub fn source_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.config.source.candidates = candidates;
        self
    }

    pub fn departments(mut self, departments: Vec<String>) -> Self {
        self.config.source.departments = departments;
        self
    }

    // --- clients ---

    pub fn drives(mut self, drives: Vec<String>) -> Self {
        self.config.clients.drives = drives;
        self
    }

    pub fn shared_root(mut self, shared_root: impl Into<String>) -> Self {
        self.config.clients.shared_root = shared_root.into();
        self
    }

    // --- destinations ---

    pub fn destination(mut self, department: impl Into<String>, template: impl Into<String>) -> Self {
        self.config
            .destinations
            .insert(department.into(), template.into());
        self
    }

    pub fn clear_destinations(mut self) -> Self {
        self.config.destinations.clear();
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn logging_directory(mut self, directory: PathBuf) -> Self {
        self.config.logging.directory = directory;
        self
    }

    pub fn logging_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.logging.file_prefix = prefix.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
