//! Configuration loading and constants.
//!
//! `AppConfig` is read from a TOML file and drives the page host. `BuildInfo`
//! is the immutable build record shown on the page; it comes from the process
//! environment, not from the file, because the deployment pipeline injects it.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Static assets (CSS) - long cache with immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 86400;

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}, immutable", HTTP_CACHE_STATIC_MAX_AGE);

/// The status page carries a fresh deploy timestamp on every render
pub const CACHE_CONTROL_PAGE: &str = "no-cache";

// =============================================================================
// Build Environment
// =============================================================================

/// Environment variable carrying the CI build number
pub const BUILD_NUMBER_VAR: &str = "BUILD_NUMBER";

/// Environment variable carrying the deployment environment name
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Build number shown when the page was not built by CI
pub const DEFAULT_BUILD_NUMBER: &str = "local";

/// Environment name shown when none was injected
pub const DEFAULT_ENVIRONMENT: &str = "unknown";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Glob pattern for template files
pub const TEMPLATE_GLOB: &str = "templates/**/*";

/// Directory for static files
pub const STATIC_DIR: &str = "static";

/// Default page title
pub const DEFAULT_PAGE_TITLE: &str = "DevSecOps Pipeline";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "pipeline_page=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Version, build and environment of the running page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub app_version: String,
    pub build_number: String,
    pub environment: String,
}

impl BuildInfo {
    /// Read the build record from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the record from any variable source. Unset and empty values fall back to sentinels.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            build_number: read(BUILD_NUMBER_VAR, DEFAULT_BUILD_NUMBER),
            environment: read(ENVIRONMENT_VAR, DEFAULT_ENVIRONMENT),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Status page settings
    #[serde(default)]
    pub page: PageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    /// Title shown in the browser tab
    #[serde(default = "PageConfig::default_title")]
    pub title: String,
    /// Value injected as `<meta name="environment">`; overrides hostname detection
    pub environment_override: Option<String>,
    #[serde(default = "PageConfig::default_static_dir")]
    pub static_dir: String,
    #[serde(default = "PageConfig::default_template_glob")]
    pub template_glob: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            environment_override: None,
            static_dir: Self::default_static_dir(),
            template_glob: Self::default_template_glob(),
        }
    }
}

impl PageConfig {
    fn default_title() -> String {
        DEFAULT_PAGE_TITLE.to_string()
    }

    fn default_static_dir() -> String {
        STATIC_DIR.to_string()
    }

    fn default_template_glob() -> String {
        TEMPLATE_GLOB.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(contents)?;

        if config.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be a non-zero port".to_string(),
            ));
        }
        if config.page.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "page.title must not be empty".to_string(),
            ));
        }

        // An empty override is the same as no override
        if config
            .page
            .environment_override
            .as_deref()
            .is_some_and(|v| v.trim().is_empty())
        {
            config.page.environment_override = None;
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
