//! # Pagination
//!
//! List requests take 0-based `page` and `per_page` query parameters:
//!
//! ```text
//! GET /transactions?page=1&per_page=4
//! ```
//!
//! and answer with the page content plus navigation links:
//!
//! ```json
//! {
//!   "data": [ ... ],
//!   "_meta_": {
//!     "page": 1,
//!     "per_page": 4,
//!     "curr": "/transactions?page=1&per_page=4",
//!     "prev": "/transactions?page=0&per_page=4",
//!     "next": "/transactions?page=2&per_page=4"
//!   }
//! }
//! ```
//!
//! `prev` and `next` are omitted on the first and last page.

pub mod links;
pub mod page;
pub mod params;
pub mod range;

pub use links::{ListResponse, PageLinkBuilder, PageLinks};
pub use page::Page;
pub use params::{BadParameterError, PAGE_PARAM, PER_PAGE_PARAM, PageRequest, ParamResolver};
pub use range::calculate_content_range;
