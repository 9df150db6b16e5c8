//! Field value types used to move entity state between instances

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    List(Vec<FieldValue>),
    Json(serde_json::Value),
    Null,
    /// A present optional whose content is itself absent, such as
    /// `Some(None)`. Keeps nested options apart from a plain `None`.
    Present(Box<FieldValue>),
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Get the value as a list if possible
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Short variant name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Uuid(_) => "uuid",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::List(_) => "list",
            FieldValue::Json(_) => "json",
            FieldValue::Null => "null",
            FieldValue::Present(_) => "present",
        }
    }
}

/// Conversion out of a [`FieldValue`].
///
/// Returns `None` when the variant does not match the target type.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> Option<Self>;
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        Some(value)
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_integer()
    }
}

impl FromFieldValue for i32 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_integer().and_then(|i| i32::try_from(i).ok())
    }
}

impl FromFieldValue for u32 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_integer().and_then(|i| u32::try_from(i).ok())
    }
}

impl FromFieldValue for i16 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_integer().and_then(|i| i16::try_from(i).ok())
    }
}

impl FromFieldValue for u64 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(i) => u64::try_from(i).ok(),
            FieldValue::Json(serde_json::Value::Number(n)) => n.as_u64(),
            _ => None,
        }
    }
}

impl FromFieldValue for usize {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        u64::from_field_value(value).and_then(|u| usize::try_from(u).ok())
    }
}

impl FromFieldValue for f32 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        f64::from_field_value(value).map(|f| f as f32)
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(f) => Some(f),
            FieldValue::Integer(i) => Some(i as f64),
            _ => None,
        }
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromFieldValue for Uuid {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_uuid()
    }
}

impl FromFieldValue for DateTime<Utc> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl FromFieldValue for serde_json::Value {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Json(v) => Some(v),
            FieldValue::Null => Some(serde_json::Value::Null),
            other => serde_json::to_value(other).ok(),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Null => Some(None),
            FieldValue::Present(inner) => T::from_field_value(*inner).map(Some),
            other => T::from_field_value(other).map(Some),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::List(items) => items.into_iter().map(T::from_field_value).collect(),
            _ => None,
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Arc<T> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        T::from_field_value(value).map(Arc::new)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => FieldValue::Integer(i),
            Err(_) => FieldValue::Json(value.into()),
        }
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        (value as u64).into()
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value.map(Into::<FieldValue>::into) {
            None => FieldValue::Null,
            Some(inner @ (FieldValue::Null | FieldValue::Present(_))) => {
                FieldValue::Present(Box::new(inner))
            }
            Some(inner) => inner,
        }
    }
}

/// The shared value is cloned out; the receiving field gets its own `Arc`.
impl<T: Clone + Into<FieldValue>> From<Arc<T>> for FieldValue {
    fn from(value: Arc<T>) -> Self {
        Arc::unwrap_or_clone(value).into()
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        FieldValue::List(value.into_iter().map(Into::into).collect())
    }
}
