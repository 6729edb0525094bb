use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;
use std::str::FromStr;

use super::fields::FieldTable;

/// An entity exposed through the generic CRUD endpoints.
///
/// The field table is what PATCH and PUT use to copy individual fields by
/// name, so it should list every field a client is allowed to send. The
/// identifier may be listed too; it is always skipped when merging.
///
/// ```rust,ignore
/// #[derive(Clone, Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// pub struct CardTransaction {
///     pub id: i64,
///     pub amount: f64,
///     pub memo: String,
/// }
///
/// impl Resource for CardTransaction {
///     type Id = i64;
///     const RESOURCE_NAME_SINGULAR: &'static str = "CardTransaction";
///     const RESOURCE_NAME_PLURAL: &'static str = "transactions";
///
///     fn id(&self) -> i64 {
///         self.id
///     }
///
///     fn field_table() -> FieldTable<Self> {
///         crudrest::field_table!(CardTransaction { id, amount, memo })
///     }
/// }
/// ```
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Clone + Display + FromStr + Send + Sync + 'static;

    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const RESOURCE_DESCRIPTION: &'static str = "";

    fn id(&self) -> Self::Id;

    fn field_table() -> FieldTable<Self>;

    /// Parse an identifier taken from a path segment or query parameter.
    #[must_use]
    fn parse_id(raw: &str) -> Option<Self::Id> {
        raw.parse().ok()
    }
}
