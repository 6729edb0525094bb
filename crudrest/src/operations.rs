//! # CRUD pipeline
//!
//! [`CrudService`] wires a [`KeyedStore`], a [`StructuralCodec`] and a
//! [`ResourceConfig`] into the five operations exposed over HTTP. Every call
//! is independent; the service only holds shared, immutable collaborators
//! and can be cloned into each request.
//!
//! ```rust,ignore
//! let service = CrudService::new(MemoryStore::with_entities(seed), ResourceConfig::default());
//!
//! let one = service.get_one("1").await?;
//! let (headers, list) = service.list(&params, "/transactions").await?;
//! let merged = service.patch("1", br#"{"memo": "lunch"}"#).await?;
//! ```

use hyper::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::{JsonCodec, StructuralCodec};
use crate::config::ResourceConfig;
use crate::core::{PatchMerger, Resource};
use crate::errors::ApiError;
use crate::pagination::{ListResponse, PageLinkBuilder, ParamResolver, calculate_content_range};
use crate::store::KeyedStore;

/// Query parameter that turns a list request into a lookup by identifier.
pub const ID_PARAM: &str = "id";

pub struct CrudService<R, S, C = JsonCodec> {
    store: Arc<S>,
    codec: Arc<C>,
    config: Arc<ResourceConfig>,
    merger: Arc<PatchMerger<R>>,
}

impl<R, S, C> Clone for CrudService<R, S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            codec: Arc::clone(&self.codec),
            config: Arc::clone(&self.config),
            merger: Arc::clone(&self.merger),
        }
    }
}

impl<R, S> CrudService<R, S, JsonCodec>
where
    R: Resource,
    S: KeyedStore<R>,
{
    /// Service decoding request bodies as JSON.
    #[must_use]
    pub fn new(store: S, config: ResourceConfig) -> Self {
        Self::with_codec(store, JsonCodec, config)
    }
}

impl<R, S, C> CrudService<R, S, C>
where
    R: Resource,
    S: KeyedStore<R>,
    C: StructuralCodec,
{
    #[must_use]
    pub fn with_codec(store: S, codec: C, config: ResourceConfig) -> Self {
        let merger = PatchMerger::for_resource(&config);
        Self {
            store: Arc::new(store),
            codec: Arc::new(codec),
            config: Arc::new(config),
            merger: Arc::new(merger),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    #[must_use]
    pub fn merger(&self) -> &PatchMerger<R> {
        &self.merger
    }

    /// Fetch one entity by its raw identifier.
    ///
    /// # Errors
    ///
    /// 400 when `raw_id` does not parse, 404 when no entity has it, 500 when
    /// the store fails.
    pub async fn get_one(&self, raw_id: &str) -> Result<R, ApiError> {
        let id = Self::parse_id(raw_id)?;
        self.fetch_existing(&id).await
    }

    /// List entities.
    ///
    /// With an `id` parameter the result holds that entity or nothing. With
    /// pagination disabled it holds every entity. Otherwise it holds one page
    /// plus `_meta_` links built on `request_path`, and the returned headers
    /// carry a `Content-Range`.
    ///
    /// # Errors
    ///
    /// 400 for an unparsable `id` or invalid `page` / `per_page`, 500 when the
    /// store fails.
    pub async fn list(
        &self,
        params: &HashMap<String, String>,
        request_path: &str,
    ) -> Result<(HeaderMap, ListResponse<R>), ApiError> {
        if let Some(raw_id) = params.get(ID_PARAM) {
            let id = Self::parse_id(raw_id)?;
            let found = self.store.get(&id).await?;
            return Ok((
                HeaderMap::new(),
                ListResponse::unpaginated(found.into_iter().collect()),
            ));
        }

        if !self.config.pagination.supported {
            let all = self.store.find_all().await?;
            return Ok((HeaderMap::new(), ListResponse::unpaginated(all)));
        }

        let request = ParamResolver::new(&self.config.pagination).resolve(params)?;
        let page = self
            .store
            .find_page(request.offset(), request.per_page)
            .await?;

        tracing::debug!(
            resource = R::RESOURCE_NAME_PLURAL,
            page = request.page,
            per_page = request.per_page,
            total = page.total,
            "Listing page"
        );

        let links = PageLinkBuilder::build(&page, request.page, request.per_page, request_path);
        let headers = calculate_content_range(
            request.offset(),
            page.items.len() as u64,
            page.total,
            R::RESOURCE_NAME_PLURAL,
        );
        Ok((headers, ListResponse::paginated(page.items, links)))
    }

    /// Decode a full entity and persist it.
    ///
    /// # Errors
    ///
    /// 400 when the body does not decode, 500 when the store fails.
    pub async fn create(&self, body: &[u8]) -> Result<R, ApiError> {
        let entity: R = self.codec.decode_strict(body)?;
        let saved = self.store.save(entity).await?;
        tracing::debug!(
            resource = R::RESOURCE_NAME_SINGULAR,
            id = %saved.id(),
            "Created entity"
        );
        Ok(saved)
    }

    /// Apply a partial update and persist the result, even when the document
    /// changed nothing.
    ///
    /// # Errors
    ///
    /// 400 for an unparsable id or body, 404 when the entity does not exist,
    /// 500 when the store fails.
    pub async fn patch(&self, raw_id: &str, body: &[u8]) -> Result<R, ApiError> {
        let id = Self::parse_id(raw_id)?;
        let current = self.fetch_existing(&id).await?;
        let outcome = self.merger.merge(self.codec.as_ref(), body, current)?;
        if outcome.is_noop() {
            tracing::debug!(resource = R::RESOURCE_NAME_SINGULAR, id = %id, "Empty patch");
        }
        Ok(self.store.save(outcome.entity).await?)
    }

    /// Replace every field but the identifier with the values in `body`.
    ///
    /// # Errors
    ///
    /// 400 for an unparsable id or body, 404 when the entity does not exist,
    /// 500 when the store fails.
    pub async fn put(&self, raw_id: &str, body: &[u8]) -> Result<(), ApiError> {
        let id = Self::parse_id(raw_id)?;
        let current = self.fetch_existing(&id).await?;
        let replacement: R = self.codec.decode_strict(body)?;
        let updated = self.merger.replace(&replacement, current);
        self.store.save(updated).await?;
        Ok(())
    }

    async fn fetch_existing(&self, id: &R::Id) -> Result<R, ApiError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found(R::RESOURCE_NAME_SINGULAR, Some(id.to_string())))
    }

    fn parse_id(raw: &str) -> Result<R::Id, ApiError> {
        R::parse_id(raw).ok_or_else(|| {
            ApiError::bad_request(format!(
                "Invalid identifier '{raw}' for entity of type {}",
                R::RESOURCE_NAME_SINGULAR
            ))
        })
    }
}
