//! Partial-update merge engine.
//!
//! A PATCH body is decoded twice: strictly into a scratch entity (so values
//! are converted and type-checked) and loosely into a key/value map (so we
//! know which keys the caller sent). Only the sent keys are copied from the
//! scratch entity into the current one, which keeps absent fields untouched
//! even when the scratch entity holds a default or zero value for them.

use std::fmt;

use super::fields::FieldTable;
use super::traits::Resource;
use crate::codec::{DecodeError, StructuralCodec};
use crate::config::ResourceConfig;

/// A key in the patch document that does not name any field of the resource.
///
/// Non-fatal: the key is skipped and the rest of the patch is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError {
    pub resource: &'static str,
    pub field: String,
}

impl UnknownFieldError {
    #[must_use]
    pub fn new(resource: &'static str, field: impl Into<String>) -> Self {
        Self {
            resource,
            field: field.into(),
        }
    }
}

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entity of type {} has no field '{}'",
            self.resource, self.field
        )
    }
}

impl std::error::Error for UnknownFieldError {}

/// Result of a merge: the updated entity and what happened to each key.
#[derive(Debug, Clone)]
pub struct MergeOutcome<R> {
    pub entity: R,
    /// Keys copied into the entity.
    pub applied: Vec<String>,
    /// Keys ignored because the resource has no such field.
    pub skipped: Vec<UnknownFieldError>,
}

impl<R> MergeOutcome<R> {
    /// True when nothing was copied into the entity.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Copies explicitly-sent fields onto existing entities.
pub struct PatchMerger<R> {
    fields: FieldTable<R>,
    identifier: String,
}

impl<R> Clone for PatchMerger<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

impl<R: Resource> PatchMerger<R> {
    #[must_use]
    pub fn new(fields: FieldTable<R>, identifier: impl Into<String>) -> Self {
        Self {
            fields,
            identifier: identifier.into(),
        }
    }

    /// Merger over `R::field_table()` honouring the configured identifier.
    #[must_use]
    pub fn for_resource(config: &ResourceConfig) -> Self {
        let fields = R::field_table();
        if fields.find_ignore_case(&config.identifier_field_name).is_none() {
            tracing::warn!(
                resource = R::RESOURCE_NAME_SINGULAR,
                identifier = %config.identifier_field_name,
                "Identifier field is not part of the field table"
            );
        }
        Self::new(fields, config.identifier_field_name.clone())
    }

    #[must_use]
    pub fn fields(&self) -> &FieldTable<R> {
        &self.fields
    }

    #[must_use]
    pub fn is_identifier(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.identifier)
    }

    /// Apply a partial-update document to `current`.
    ///
    /// Keys naming the identifier are ignored. Keys with no matching field are
    /// reported in [`MergeOutcome::skipped`]. Fields not present in the
    /// document keep their current value.
    ///
    /// # Errors
    ///
    /// Returns a `DecodeError` if the document is malformed, not an object, or
    /// holds a value of the wrong type for one of the resource's fields.
    pub fn merge<C: StructuralCodec>(
        &self,
        codec: &C,
        document: &[u8],
        mut current: R,
    ) -> Result<MergeOutcome<R>, DecodeError> {
        let scratch: R = codec.decode_strict(document)?;
        let present = codec.decode_loose(document)?;

        let mut applied = Vec::with_capacity(present.len());
        let mut skipped = Vec::new();

        for key in present.keys() {
            if self.is_identifier(key) {
                continue;
            }

            if let Some(accessor) = self.fields.get(key) {
                tracing::debug!(
                    resource = R::RESOURCE_NAME_SINGULAR,
                    id = %current.id(),
                    field = %key,
                    "Copying patched field"
                );
                accessor.copy(&scratch, &mut current);
                applied.push(key.clone());
            } else {
                let err = UnknownFieldError::new(R::RESOURCE_NAME_SINGULAR, key.as_str());
                tracing::warn!(error = %err, "Skipping unknown field in patch");
                skipped.push(err);
            }
        }

        Ok(MergeOutcome {
            entity: current,
            applied,
            skipped,
        })
    }

    /// Copy every field of `replacement` except the identifier onto `current`.
    #[must_use]
    pub fn replace(&self, replacement: &R, mut current: R) -> R {
        for accessor in self.fields.iter() {
            if !self.is_identifier(accessor.name()) {
                accessor.copy(replacement, &mut current);
            }
        }
        current
    }
}
