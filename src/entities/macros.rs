//! Macros for reducing boilerplate when describing entities
//!
//! These macros generate the [`Entity`](crate::core::entity::Entity)
//! implementation an augmentable type needs: its field list, one public
//! all-fields constructor, and name-based field access.

/// Implement `Entity` for an existing struct
///
/// Every listed field must implement `Clone`, `Default`,
/// `Into<FieldValue>`, `FromFieldValue` and `FieldKind`. That covers `String`,
/// the integer types `i16`, `i32`, `i64`, `u32`, `u64` and `usize`, `f32`,
/// `f64`, `bool`, `Uuid`, `DateTime<Utc>`, `serde_json::Value`, and
/// `Option`/`Vec`/`Arc` of those, nested at any depth. An `Arc` field receives
/// a fresh `Arc` holding a clone of the original's value.
///
/// # Example
///
/// ```rust,ignore
/// use hateoas::prelude::*;
///
/// #[derive(Debug, Clone, Serialize)]
/// pub struct Book {
///     id: i64,
///     author: String,
///     title: String,
/// }
///
/// impl_entity!(Book, "Book", { id: i64, author: String, title: String });
///
/// // A struct composing a base entity exposes the base fields as its own.
/// #[derive(Debug, Clone, Serialize)]
/// pub struct Loan {
///     #[serde(flatten)]
///     book: Book,
///     borrower: Option<String>,
/// }
///
/// impl_entity!(Loan extends Book via book, "Loan", { borrower: Option<String> });
/// ```
#[macro_export]
macro_rules! impl_entity {
    (
        $type:ident,
        $type_name:expr,
        {
            $( $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        impl $crate::core::entity::Entity for $type {
            fn type_shape() -> $crate::core::entity::TypeShape {
                $crate::core::entity::TypeShape::new(
                    $type_name,
                    $crate::__entity_field_descriptors!($( $field : $field_type ),*),
                )
            }

            fn constructors() -> Vec<$crate::core::entity::Constructor<Self>> {
                vec![$crate::core::entity::Constructor::public(
                    concat!($type_name, "::new"),
                    vec![$( <$field_type as $crate::core::entity::FieldKind>::KIND ),*],
                    |args| {
                        #[allow(unused_mut, unused_variables)]
                        let mut cursor = args.cursor();
                        Ok(Self {
                            $( $field: cursor.next_or_default::<$field_type>()? ),*
                        })
                    },
                )]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $( stringify!($field) => Some(self.$field.clone().into()), )*
                    _ => None,
                }
            }

            fn set_field_value(
                &mut self,
                field: &str,
                #[allow(unused_variables)] value: $crate::core::field::FieldValue,
            ) -> Result<(), $crate::core::error::FieldAccessError> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field = $crate::core::entity::field_from_value(
                                field,
                                stringify!($field_type),
                                value,
                            )?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::core::error::FieldAccessError::UnknownField {
                        field: field.to_string(),
                    }),
                }
            }
        }
    };

    (
        $type:ident extends $parent:ident via $base:ident,
        $type_name:expr,
        {
            $( $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        impl $crate::core::entity::Entity for $type {
            fn type_shape() -> $crate::core::entity::TypeShape {
                $crate::core::entity::TypeShape::new(
                    $type_name,
                    $crate::__entity_field_descriptors!($( $field : $field_type ),*),
                )
                .with_parent(<$parent as $crate::core::entity::Entity>::type_shape())
            }

            fn constructors() -> Vec<$crate::core::entity::Constructor<Self>> {
                vec![$crate::core::entity::Constructor::public(
                    concat!($type_name, "::new"),
                    vec![$( <$field_type as $crate::core::entity::FieldKind>::KIND ),*],
                    |args| {
                        #[allow(unused_mut, unused_variables)]
                        let mut cursor = args.cursor();
                        Ok(Self {
                            $base: $crate::core::entity::construct_with_placeholders::<$parent>()?,
                            $( $field: cursor.next_or_default::<$field_type>()? ),*
                        })
                    },
                )]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $( stringify!($field) => Some(self.$field.clone().into()), )*
                    _ => $crate::core::entity::Entity::field_value(&self.$base, field),
                }
            }

            fn set_field_value(
                &mut self,
                field: &str,
                value: $crate::core::field::FieldValue,
            ) -> Result<(), $crate::core::error::FieldAccessError> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field = $crate::core::entity::field_from_value(
                                field,
                                stringify!($field_type),
                                value,
                            )?;
                            Ok(())
                        }
                    )*
                    _ => $crate::core::entity::Entity::set_field_value(&mut self.$base, field, value),
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __entity_field_descriptors {
    ($( $field:ident : $field_type:ty ),*) => {
        vec![$(
            $crate::core::entity::FieldDescriptor::new(
                stringify!($field),
                <$field_type as $crate::core::entity::FieldKind>::KIND,
            )
        ),*]
    };
}
