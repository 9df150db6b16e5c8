//! Field-by-field state transfer between entity instances

use crate::core::entity::{Entity, FieldDescriptor};
use crate::core::error::{AugmentError, FieldAccessError};

/// Copies every field of a source entity, including inherited ones, onto a
/// destination entity
pub struct FieldCopier;

impl FieldCopier {
    /// Copy all fields of `source`'s hierarchy that `destination` also has.
    ///
    /// Only `destination` is modified.
    pub fn copy<S: Entity, D: Entity>(source: &S, destination: &mut D) -> Result<(), AugmentError> {
        let source_shape = S::type_shape();
        let destination_fields = D::type_shape().fields_hierarchical();

        let shared: Vec<FieldDescriptor> = source_shape
            .fields_hierarchical()
            .into_iter()
            .filter(|field| destination_fields.iter().any(|d| d.name == field.name))
            .collect();

        Self::copy_fields(source, destination, source_shape.type_name, &shared)
    }

    /// Copy exactly `fields` from `source` to `destination`
    pub fn copy_fields<S: Entity + ?Sized, D: Entity + ?Sized>(
        source: &S,
        destination: &mut D,
        type_name: &str,
        fields: &[FieldDescriptor],
    ) -> Result<(), AugmentError> {
        for field in fields {
            let value = source
                .field_value(field.name)
                .ok_or_else(|| AugmentError::CopyFailure {
                    type_name: type_name.to_string(),
                    field: field.name.to_string(),
                    reason: FieldAccessError::UnknownField {
                        field: field.name.to_string(),
                    },
                })?;

            destination
                .set_field_value(field.name, value)
                .map_err(|reason| AugmentError::CopyFailure {
                    type_name: type_name.to_string(),
                    field: field.name.to_string(),
                    reason,
                })?;

            tracing::trace!(type_name, field = field.name, "copied field");
        }

        Ok(())
    }
}
