use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Backend that serves generated recipes when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "https://bperry129.pythonanywhere.com";

/// Directory the generation scripts write recipe JSON files into
pub const DEFAULT_RECIPES_DIR: &str = "recipes_output";

/// Placeholder image for recipes without an `image_url`
pub const DEFAULT_RECIPE_IMAGE: &str = "/images/default-recipe.png";

/// Main site configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Where raw recipe records come from
    pub source: SourceConfig,
    /// Request timeout in seconds for every outbound HTTP call
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Seconds a loaded catalog is reused; 0 reloads on every request
    #[serde(default)]
    pub cache_ttl: u64,
    /// Image URL used when a recipe has none
    #[serde(default = "default_image")]
    pub default_image: String,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// CSV ingest relay configuration
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Catalog source selection
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Fetch `{base_url}/recipes` from the recipe backend
    Remote { base_url: String },
    /// Read every `*.json` file in a directory
    Local { directory: PathBuf },
}

/// Configuration for the JSON API server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:3000"
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Whether to answer cross-origin requests
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_enabled: true,
        }
    }
}

/// Configuration for forwarding CSV uploads to the generation backend
#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Base URL of the generation backend; uploads are refused when unset
    pub backend_url: Option<String>,
    /// Default for the `use_ai` form field when the upload omits it
    #[serde(default = "default_true")]
    pub use_ai: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            use_ai: true,
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_image() -> String {
    DEFAULT_RECIPE_IMAGE.to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_true() -> bool {
    true
}

impl SiteConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with KNOCKOFF__ prefix
    /// 2. knockoff.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: KNOCKOFF__SOURCE__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Timeout applied to catalog fetches and ingest submissions
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Catalog cache lifetime, `None` when caching is disabled
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl > 0).then(|| Duration::from_secs(self.cache_ttl))
    }
}

/// Load configuration from file and environment variables
///
/// See [`SiteConfig::load`] for the source priority.
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    let settings = Config::builder()
        .set_default("source.kind", "remote")?
        .set_default("source.base_url", DEFAULT_BACKEND_URL)?
        .set_default("source.directory", DEFAULT_RECIPES_DIR)?
        // Optional config file (can be missing)
        .add_source(File::with_name("knockoff").required(false))
        // Use double underscore for nested: KNOCKOFF__SOURCE__KIND
        .add_source(
            Environment::with_prefix("KNOCKOFF")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
