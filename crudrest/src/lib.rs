//! # crudrest
//!
//! Generic CRUD REST endpoints for Axum without per-entity handlers.
//!
//! A resource type implements [`Resource`] (its identifier and a field table
//! built with [`field_table!`]), a [`KeyedStore`] persists it, and
//! [`CrudService::router`] exposes get-one, list, create, patch and put.
//!
//! ```rust,ignore
//! use crudrest::{CrudService, MemoryStore, ResourceConfig};
//!
//! let service = CrudService::new(MemoryStore::<CardTransaction>::new(), ResourceConfig::default());
//! let app = axum::Router::new().nest("/transactions", service.router());
//! ```
//!
//! PATCH only touches the fields present in the request body, and list
//! responses carry `_meta_` navigation links next to the `data` array.

pub mod codec;
pub mod config;
pub mod core;
pub mod errors;
pub mod openapi;
pub mod operations;
pub mod pagination;
pub mod routes;
pub mod store;

pub use crate::codec::{DecodeError, JsonCodec, StructuralCodec};
pub use crate::config::{PaginationPolicy, ResourceConfig};
pub use crate::core::{FieldAccessor, FieldTable, MergeOutcome, PatchMerger, Resource, UnknownFieldError};
pub use crate::errors::ApiError;
pub use crate::operations::CrudService;
pub use crate::pagination::{
    BadParameterError, ListResponse, Page, PageLinkBuilder, PageLinks, PageRequest, ParamResolver,
};
pub use crate::store::{KeyedStore, MemoryStore, SeaOrmStore};
