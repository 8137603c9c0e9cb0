use log::info;
use std::sync::Arc;

use crate::config::{SiteConfig, SourceConfig};
use crate::error::CatalogError;
use crate::sources::{CachedSource, CatalogSource, LocalDirectorySource, RemoteSource};

pub struct SourceFactory;

impl SourceFactory {
    /// Create the configured catalog source.
    ///
    /// The source is wrapped in a [`CachedSource`] when `cache_ttl` is set.
    pub fn from_config(config: &SiteConfig) -> Result<Arc<dyn CatalogSource>, CatalogError> {
        match &config.source {
            SourceConfig::Remote { base_url } => {
                info!("Using remote recipe catalog at {}", base_url);
                let source = RemoteSource::new(base_url.as_str(), config.request_timeout())?;
                Ok(Self::maybe_cached(source, config))
            }
            SourceConfig::Local { directory } => {
                info!("Using local recipe catalog in {}", directory.display());
                let source = LocalDirectorySource::new(directory.clone());
                Ok(Self::maybe_cached(source, config))
            }
        }
    }

    fn maybe_cached<S: CatalogSource + 'static>(
        source: S,
        config: &SiteConfig,
    ) -> Arc<dyn CatalogSource> {
        match config.cache_ttl() {
            Some(ttl) => {
                info!("Caching catalog loads for {:?}", ttl);
                Arc::new(CachedSource::new(source, ttl))
            }
            None => Arc::new(source),
        }
    }

    /// List all available source kinds
    pub fn available_sources() -> Vec<&'static str> {
        vec!["remote", "local"]
    }
}
