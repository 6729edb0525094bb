use async_trait::async_trait;
use sea_orm::DbErr;

use crate::core::Resource;
use crate::pagination::Page;

/// Persistence backend keyed by the resource identifier.
///
/// Implementations decide their own ordering for paged scans but must keep it
/// stable between requests, otherwise page links point at shifting slices.
#[async_trait]
pub trait KeyedStore<R: Resource>: Send + Sync + 'static {
    /// Fetch one entity, `None` when the identifier is unknown.
    async fn get(&self, id: &R::Id) -> Result<Option<R>, DbErr>;

    /// Insert or replace an entity and return its persisted form.
    async fn save(&self, entity: R) -> Result<R, DbErr>;

    /// Fetch `limit` entities starting at `offset`, with the total count.
    async fn find_page(&self, offset: u64, limit: u64) -> Result<Page<R>, DbErr>;

    /// Fetch every entity, used by resources listed without pagination.
    async fn find_all(&self) -> Result<Vec<R>, DbErr>;
}
