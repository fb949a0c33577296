//! Cafe directory service

use cafe_core::{Cafe, CafeError, CafeStore, NewCafe, Result};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CafeDirectory {
    store: Arc<dyn CafeStore>,
    api_key: String,
}

impl CafeDirectory {
    pub fn new(store: Arc<dyn CafeStore>, api_key: String) -> Self {
        Self { store, api_key }
    }

    pub async fn all(&self) -> Result<Vec<Cafe>> {
        self.store.list_all().await
    }

    pub async fn random(&self) -> Result<Cafe> {
        let cafes = self.store.list_all().await?;
        cafes
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(CafeError::EmptyCollection)
    }

    pub async fn search(&self, location: &str) -> Result<Vec<Cafe>> {
        let cafes = self.store.list_all().await?;
        Ok(cafes
            .into_iter()
            .filter(|cafe| cafe.is_located_in(location))
            .collect())
    }

    pub async fn add(&self, cafe: NewCafe) -> Result<Cafe> {
        let cafe = self.store.insert(cafe).await?;
        info!("Added cafe: id={}, name={}", cafe.id, cafe.name);
        Ok(cafe)
    }

    pub async fn update_price(&self, id: i64, new_price: Option<String>) -> Result<()> {
        self.store.update_price(id, new_price.clone()).await?;
        info!("Updated price: id={}, price={:?}", id, new_price);
        Ok(())
    }

    /// Deletes a cafe reported as closed. The key check happens before
    /// storage is touched.
    pub async fn report_closed(&self, id: i64, api_key: Option<&str>) -> Result<()> {
        if api_key != Some(self.api_key.as_str()) {
            warn!("Rejected delete of cafe {}: wrong API key", id);
            return Err(CafeError::AuthorizationFailure);
        }

        self.store.delete(id).await?;
        info!("Deleted cafe reported closed: id={}", id);
        Ok(())
    }
}
