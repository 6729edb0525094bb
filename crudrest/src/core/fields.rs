//! Reflection-free field access.
//!
//! Each resource publishes a table mapping wire field names to copy functions.
//! Tables are plain data built once per service, so copying a field by name is
//! a lookup plus a direct assignment.

use std::fmt;

/// Copies one named field from a source entity into a target entity.
pub struct FieldAccessor<R> {
    name: &'static str,
    copy: fn(&R, &mut R),
}

impl<R> FieldAccessor<R> {
    #[must_use]
    pub const fn new(name: &'static str, copy: fn(&R, &mut R)) -> Self {
        Self { name, copy }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Overwrite the field on `target` with the value held by `source`.
    pub fn copy(&self, source: &R, target: &mut R) {
        (self.copy)(source, target);
    }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldAccessor<R> {}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor").field("name", &self.name).finish()
    }
}

/// Field name to accessor mapping for one resource shape.
pub struct FieldTable<R> {
    accessors: Vec<FieldAccessor<R>>,
}

impl<R> FieldTable<R> {
    #[must_use]
    pub fn new(accessors: Vec<FieldAccessor<R>>) -> Self {
        Self { accessors }
    }

    /// Look up an accessor by its exact declared name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldAccessor<R>> {
        self.accessors.iter().find(|accessor| accessor.name == name)
    }

    /// Look up an accessor ignoring ASCII case.
    #[must_use]
    pub fn find_ignore_case(&self, name: &str) -> Option<&FieldAccessor<R>> {
        self.accessors
            .iter()
            .find(|accessor| accessor.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accessors.iter().map(FieldAccessor::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldAccessor<R>> {
        self.accessors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl<R> Clone for FieldTable<R> {
    fn clone(&self) -> Self {
        Self {
            accessors: self.accessors.clone(),
        }
    }
}

impl<R> fmt::Debug for FieldTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Build a [`FieldTable`] for a struct from its field identifiers.
///
/// Fields are cloned from source to target, so every listed field must be
/// `Clone`. Use the `"wire_name" => field` form when serde renames a field.
///
/// ```rust,ignore
/// let table = crudrest::field_table!(CardTransaction { id, amount, memo });
/// let renamed = crudrest::field_table!(Account { "accountId" => account_id, "displayName" => display_name });
/// ```
#[macro_export]
macro_rules! field_table {
    (@accessor $resource:ty, $name:expr, $field:ident) => {
        $crate::core::FieldAccessor::<$resource>::new(
            $name,
            |source: &$resource, target: &mut $resource| {
                target.$field = ::std::clone::Clone::clone(&source.$field);
            },
        )
    };
    ($resource:ty { $($field:ident),+ $(,)? }) => {
        $crate::core::FieldTable::<$resource>::new(::std::vec![
            $( $crate::field_table!(@accessor $resource, stringify!($field), $field), )+
        ])
    };
    ($resource:ty { $($name:literal => $field:ident),+ $(,)? }) => {
        $crate::core::FieldTable::<$resource>::new(::std::vec![
            $( $crate::field_table!(@accessor $resource, $name, $field), )+
        ])
    };
}
