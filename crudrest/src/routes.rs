//! Axum handlers over a [`CrudService`].
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET, HEAD | `/` | [`get_all_handler`] |
//! | POST | `/` | [`create_one_handler`] |
//! | GET, HEAD | `/{id}` | [`get_one_handler`] |
//! | PATCH | `/{id}` | [`patch_one_handler`] |
//! | PUT | `/{id}` | [`update_one_handler`] |
//! | OPTIONS | both | answers with an `Allow` header |
//!
//! HEAD is served by the GET handlers; axum drops the body.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    routing::get,
};
use hyper::HeaderMap;
use hyper::header::{ALLOW, HeaderName};
use std::collections::HashMap;

use crate::codec::StructuralCodec;
use crate::core::Resource;
use crate::errors::ApiError;
use crate::operations::CrudService;
use crate::pagination::ListResponse;
use crate::store::KeyedStore;

pub const COLLECTION_ALLOW: &str = "GET, HEAD, POST, OPTIONS";
pub const ITEM_ALLOW: &str = "GET, HEAD, PATCH, PUT, OPTIONS";

impl<R, S, C> CrudService<R, S, C>
where
    R: Resource,
    S: KeyedStore<R>,
    C: StructuralCodec,
{
    /// Router for this resource, meant to be nested at its base path.
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/",
                get(get_all_handler::<R, S, C>)
                    .post(create_one_handler::<R, S, C>)
                    .options(collection_options_handler),
            )
            .route(
                "/{id}",
                get(get_one_handler::<R, S, C>)
                    .patch(patch_one_handler::<R, S, C>)
                    .put(update_one_handler::<R, S, C>)
                    .options(item_options_handler),
            )
            .with_state(self.clone())
    }
}

pub async fn get_one_handler<R, S, C>(
    State(service): State<CrudService<R, S, C>>,
    Path(id): Path<String>,
) -> Result<Json<R>, ApiError>
where
    R: Resource,
    S: KeyedStore<R>,
    C: StructuralCodec,
{
    service.get_one(&id).await.map(Json)
}

/// Paged list; `?id=` narrows it to a single entity.
pub async fn get_all_handler<R, S, C>(
    State(service): State<CrudService<R, S, C>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<(HeaderMap, Json<ListResponse<R>>), ApiError>
where
    R: Resource,
    S: KeyedStore<R>,
    C: StructuralCodec,
{
    let (headers, list) = service.list(&params, uri.path()).await?;
    Ok((headers, Json(list)))
}

pub async fn create_one_handler<R, S, C>(
    State(service): State<CrudService<R, S, C>>,
    body: Bytes,
) -> Result<(StatusCode, Json<R>), ApiError>
where
    R: Resource,
    S: KeyedStore<R>,
    C: StructuralCodec,
{
    let created = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn patch_one_handler<R, S, C>(
    State(service): State<CrudService<R, S, C>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<R>, ApiError>
where
    R: Resource,
    S: KeyedStore<R>,
    C: StructuralCodec,
{
    service.patch(&id, &body).await.map(Json)
}

/// Full replacement, answered with an empty 200.
pub async fn update_one_handler<R, S, C>(
    State(service): State<CrudService<R, S, C>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError>
where
    R: Resource,
    S: KeyedStore<R>,
    C: StructuralCodec,
{
    service.put(&id, &body).await?;
    Ok(StatusCode::OK)
}

async fn collection_options_handler() -> (StatusCode, [(HeaderName, &'static str); 1]) {
    (StatusCode::OK, [(ALLOW, COLLECTION_ALLOW)])
}

async fn item_options_handler() -> (StatusCode, [(HeaderName, &'static str); 1]) {
    (StatusCode::OK, [(ALLOW, ITEM_ALLOW)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceConfig;
    use crate::core::FieldTable;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde::{Deserialize, Serialize};
    use tower::ServiceExt;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Tag {
        id: u32,
        label: String,
    }

    impl Resource for Tag {
        type Id = u32;
        const RESOURCE_NAME_SINGULAR: &'static str = "Tag";
        const RESOURCE_NAME_PLURAL: &'static str = "tags";

        fn id(&self) -> u32 {
            self.id
        }

        fn field_table() -> FieldTable<Self> {
            crate::field_table!(Tag { id, label })
        }
    }

    fn app() -> Router {
        let store = MemoryStore::with_entities([Tag {
            id: 1,
            label: "red".to_string(),
        }]);
        let service = CrudService::new(store, ResourceConfig::default());
        Router::new().nest("/tags", service.router())
    }

    #[tokio::test]
    async fn test_options_lists_methods() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/tags/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(ALLOW).unwrap(), ITEM_ALLOW);
    }

    #[tokio::test]
    async fn test_put_answers_empty_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri("/tags/1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"label": "blue"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
