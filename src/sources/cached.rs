use async_trait::async_trait;
use log::debug;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::CatalogError;
use crate::model::RawRecipe;
use crate::sources::CatalogSource;

/// Last successful load and when it happened
struct Snapshot {
    loaded_at: Instant,
    recipes: Vec<RawRecipe>,
}

/// Reuses the inner source's collection for `ttl`.
///
/// Failed loads are never cached. The lock is held while loading, so
/// concurrent requests on an expired cache trigger a single fetch.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    snapshot: Mutex<Option<Snapshot>>,
}

impl<S: CatalogSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogSource for CachedSource<S> {
    fn source_name(&self) -> &str {
        self.inner.source_name()
    }

    async fn load_all(&self) -> Result<Vec<RawRecipe>, CatalogError> {
        let mut snapshot = self.snapshot.lock().await;

        if let Some(cached) = snapshot.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                debug!(
                    "Serving {} cached recipes from {}",
                    cached.recipes.len(),
                    self.inner.source_name()
                );
                return Ok(cached.recipes.clone());
            }
        }

        let recipes = self.inner.load_all().await?;
        *snapshot = Some(Snapshot {
            loaded_at: Instant::now(),
            recipes: recipes.clone(),
        });
        Ok(recipes)
    }

    async fn invalidate(&self) {
        debug!("Invalidating cached {} catalog", self.inner.source_name());
        *self.snapshot.lock().await = None;
        self.inner.invalidate().await;
    }
}
