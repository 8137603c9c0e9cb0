mod cached;
mod factory;
mod local;
mod remote;

pub use cached::CachedSource;
pub use factory::SourceFactory;
pub use local::LocalDirectorySource;
pub use remote::RemoteSource;

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::model::RawRecipe;

/// Supplier of the raw recipe collection.
///
/// Implementations are read-only from the catalog's point of view. An empty
/// collection is `Ok(vec![])`; a source that cannot answer must return `Err`
/// so callers can tell "no recipes" from "source unreachable".
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Get the source name (e.g., "remote", "local")
    fn source_name(&self) -> &str;

    /// Load every raw recipe record, in source order
    async fn load_all(&self) -> Result<Vec<RawRecipe>, CatalogError>;

    /// Drop anything remembered from earlier loads
    async fn invalidate(&self) {}
}
