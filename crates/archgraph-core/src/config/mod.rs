//! Configuration management for archgraph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `archgraph.toml` file
//! 3. User config `~/.config/archgraph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Where the graph files go.
    pub output: OutputConfig,

    /// Feature switches for optional detectors.
    pub scan: ScanConfig,

    /// Fully-qualified names of metadata tags.
    pub markers: MarkerConfig,

    /// Fully-qualified names of framework capabilities and their methods.
    pub capabilities: CapabilityConfig,

    /// Lifecycle method names used for synthesized entity methods.
    pub lifecycle: LifecycleConfig,
}

impl AnalysisConfig {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./archgraph.toml` (project local)
    /// 2. `~/.config/archgraph/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("archgraph").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit file when given, otherwise from default locations.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: AnalysisConfig = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("ARCHGRAPH_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
        if let Ok(flag) = std::env::var("ARCHGRAPH_SCAN_SPRING") {
            if let Ok(b) = flag.parse() {
                self.scan.spring = b;
            }
        }
        if let Ok(flag) = std::env::var("ARCHGRAPH_INCLUDE_REPO_UOW") {
            if let Ok(b) = flag.parse() {
                self.scan.repo_uow = b;
            }
        }
    }

    /// Reject configurations the collector cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.subdir.trim().is_empty() {
            return Err(ConfigError::Invalid("output.subdir must not be empty".into()));
        }
        if self.capabilities.dispatch_methods.is_empty() {
            return Err(ConfigError::Invalid(
                "capabilities.dispatch_methods must name at least one method".into(),
            ));
        }
        if self.lifecycle.on_create.is_empty() || self.lifecycle.on_remove.is_empty() {
            return Err(ConfigError::Invalid("lifecycle primary names must not be empty".into()));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = AnalysisConfig::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Output location configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Module root used when none can be derived from the source files.
    pub dir: PathBuf,

    /// Directory created under `<module>/build/`.
    pub subdir: String,

    /// Files whose presence marks a module root.
    pub build_markers: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            subdir: DEFAULT_OUTPUT_SUBDIR.to_string(),
            build_markers: owned(DEFAULT_BUILD_MARKERS),
        }
    }
}

/// Optional detectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Detect controllers, entry points and controller reachability.
    pub spring: bool,

    /// Track aggregate removal through unit-of-work and repository calls.
    pub repo_uow: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            spring: true,
            repo_uow: true,
        }
    }
}

/// Metadata tag names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub aggregate: String,
    pub domain_event: String,
    pub integration_event: String,
    pub event_listener: String,
    pub controller: String,
    pub routes: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            aggregate: DEFAULT_AGGREGATE_ANNOTATION.to_string(),
            domain_event: DEFAULT_DOMAIN_EVENT_ANNOTATION.to_string(),
            integration_event: DEFAULT_INTEGRATION_EVENT_ANNOTATION.to_string(),
            event_listener: DEFAULT_EVENT_LISTENER_ANNOTATION.to_string(),
            controller: DEFAULT_CONTROLLER_ANNOTATION.to_string(),
            routes: owned(DEFAULT_ROUTE_ANNOTATIONS),
        }
    }
}

impl MarkerConfig {
    /// Whether `annotation` is one of the routing tags.
    pub fn is_route(&self, annotation: &str) -> bool {
        self.routes.iter().any(|r| r == annotation)
    }
}

/// Framework capability names and the methods recognised on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityConfig {
    pub request_supervisor: String,
    pub unit_of_work: String,
    pub repository_supervisor: String,
    pub aggregate_factory_supervisor: String,
    pub request_param: String,
    pub command_handler: String,
    pub query_handler: String,
    pub request_handler: String,
    pub constraint_validators: Vec<String>,
    pub predicate: String,
    pub aggregate_predicate: String,

    pub dispatch_methods: Vec<String>,
    pub create_methods: Vec<String>,
    pub save_methods: Vec<String>,
    pub remove_methods: Vec<String>,
    pub lookup_methods: Vec<String>,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            request_supervisor: DEFAULT_REQUEST_SUPERVISOR.to_string(),
            unit_of_work: DEFAULT_UNIT_OF_WORK.to_string(),
            repository_supervisor: DEFAULT_REPOSITORY_SUPERVISOR.to_string(),
            aggregate_factory_supervisor: DEFAULT_AGGREGATE_FACTORY_SUPERVISOR.to_string(),
            request_param: DEFAULT_REQUEST_PARAM.to_string(),
            command_handler: DEFAULT_COMMAND_HANDLER.to_string(),
            query_handler: DEFAULT_QUERY_HANDLER.to_string(),
            request_handler: DEFAULT_REQUEST_HANDLER.to_string(),
            constraint_validators: owned(DEFAULT_CONSTRAINT_VALIDATORS),
            predicate: DEFAULT_PREDICATE.to_string(),
            aggregate_predicate: DEFAULT_AGGREGATE_PREDICATE.to_string(),
            dispatch_methods: owned(DEFAULT_DISPATCH_METHODS),
            create_methods: owned(DEFAULT_CREATE_METHODS),
            save_methods: owned(DEFAULT_SAVE_METHODS),
            remove_methods: owned(DEFAULT_REMOVE_METHODS),
            lookup_methods: owned(DEFAULT_LOOKUP_METHODS),
        }
    }
}

impl CapabilityConfig {
    pub fn is_dispatch(&self, method: &str) -> bool {
        self.dispatch_methods.iter().any(|m| m == method)
    }

    pub fn is_create(&self, method: &str) -> bool {
        self.create_methods.iter().any(|m| m == method)
    }

    pub fn is_save(&self, method: &str) -> bool {
        self.save_methods.iter().any(|m| m == method)
    }

    pub fn is_remove(&self, method: &str) -> bool {
        self.remove_methods.iter().any(|m| m == method)
    }

    pub fn is_lookup(&self, method: &str) -> bool {
        self.lookup_methods.iter().any(|m| m == method)
    }
}

/// Lifecycle method names (primary, then fallback).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub on_create: String,
    pub on_create_fallback: String,
    pub on_remove: String,
    pub on_remove_fallback: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            on_create: DEFAULT_ON_CREATE.to_string(),
            on_create_fallback: DEFAULT_ON_CREATE_FALLBACK.to_string(),
            on_remove: DEFAULT_ON_REMOVE.to_string(),
            on_remove_fallback: DEFAULT_ON_REMOVE_FALLBACK.to_string(),
        }
    }
}
