//! Storage traits for persistence

use crate::{Cafe, NewCafe, Result};
use async_trait::async_trait;

/// Cafe store
///
/// Every operation is atomic on a single row. Implementations report a
/// duplicate name or a missing required field as
/// [`CafeError::ConstraintViolation`](crate::CafeError::ConstraintViolation)
/// and an unknown id on update/delete as
/// [`CafeError::NotFound`](crate::CafeError::NotFound).
#[async_trait]
pub trait CafeStore: Send + Sync {
    /// All records in insertion order.
    async fn list_all(&self) -> Result<Vec<Cafe>>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Cafe>>;
    /// Stores the cafe and returns it with its assigned id.
    async fn insert(&self, cafe: NewCafe) -> Result<Cafe>;
    async fn update_price(&self, id: i64, new_price: Option<String>) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}
