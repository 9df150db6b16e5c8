//! Entity traits describing the shape of a response object
//!
//! The augmentation engine never knows entity types at compile time. Instead
//! each type describes itself: which fields it carries (including those of a
//! composed base entity), which constructors it offers, and how to read or
//! write a field by name. The [`impl_entity!`](crate::impl_entity) macro
//! generates all of this for ordinary structs.

use crate::core::error::{ConstructionError, FieldAccessError};
use crate::core::field::{FieldValue, FromFieldValue};
use std::fmt;

/// Who may call a constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    /// Restricted to the defining module
    Package,
    Private,
}

impl Visibility {
    /// Whether the engine may invoke a constructor with this visibility
    pub fn is_usable(&self) -> bool {
        matches!(self, Visibility::Public | Visibility::Protected)
    }
}

/// The broad kind of a constructor parameter or field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Boolean,
    Integer,
    Float,
    /// Anything that is not a plain number or flag
    Reference,
}

impl ParamKind {
    /// The value handed to a constructor when no real argument exists
    pub fn placeholder(&self) -> FieldValue {
        match self {
            ParamKind::Boolean => FieldValue::Boolean(false),
            ParamKind::Integer => FieldValue::Integer(0),
            ParamKind::Float => FieldValue::Float(0.0),
            ParamKind::Reference => FieldValue::Null,
        }
    }
}

/// Maps a Rust field type to its [`ParamKind`]
pub trait FieldKind {
    const KIND: ParamKind;
}

macro_rules! field_kind {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $( impl FieldKind for $ty { const KIND: ParamKind = $kind; } )+
    };
}

field_kind!(ParamKind::Boolean => bool);
field_kind!(ParamKind::Integer => i64, i32, i16, u32, u64, usize);
field_kind!(ParamKind::Float => f64, f32);
field_kind!(
    ParamKind::Reference =>
    String,
    FieldValue,
    serde_json::Value,
    uuid::Uuid,
    chrono::DateTime<chrono::Utc>,
);

impl<T> FieldKind for Option<T> {
    const KIND: ParamKind = ParamKind::Reference;
}

impl<T> FieldKind for Vec<T> {
    const KIND: ParamKind = ParamKind::Reference;
}

impl<T: FieldKind> FieldKind for std::sync::Arc<T> {
    const KIND: ParamKind = T::KIND;
}

/// A named field declared directly on a type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: ParamKind) -> Self {
        Self { name, kind }
    }
}

/// Static description of an entity type and its ancestors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeShape {
    pub type_name: &'static str,
    pub fields: Vec<FieldDescriptor>,
    pub parent: Option<Box<TypeShape>>,
}

impl TypeShape {
    pub fn new(type_name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            type_name,
            fields,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: TypeShape) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Declared fields of this type and every ancestor, most-derived first.
    ///
    /// A name declared on several levels is listed once, at the most-derived
    /// level.
    pub fn fields_hierarchical(&self) -> Vec<FieldDescriptor> {
        let mut fields: Vec<FieldDescriptor> = Vec::new();
        let mut current = Some(self);

        while let Some(shape) = current {
            for field in &shape.fields {
                if !fields.iter().any(|f| f.name == field.name) {
                    fields.push(*field);
                }
            }
            current = shape.parent.as_deref();
        }

        fields
    }

    /// Names of this type followed by its ancestors
    pub fn lineage(&self) -> Vec<&'static str> {
        let mut names = vec![self.type_name];
        let mut current = self.parent.as_deref();
        while let Some(shape) = current {
            names.push(shape.type_name);
            current = shape.parent.as_deref();
        }
        names
    }
}

/// Arguments handed to a [`Constructor`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorArgs {
    values: Vec<FieldValue>,
}

impl ConstructorArgs {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Argument `index` converted to `T`; a null argument yields `T::default()`
    pub fn value_or_default<T>(&self, index: usize) -> Result<T, ConstructionError>
    where
        T: FromFieldValue + Default,
    {
        match self.raw(index)? {
            FieldValue::Null => Ok(T::default()),
            value => convert(index, value.clone()),
        }
    }

    /// Argument `index` converted to `T`; a null argument is an error
    pub fn required<T: FromFieldValue>(&self, index: usize) -> Result<T, ConstructionError> {
        match self.raw(index)? {
            FieldValue::Null => Err(ConstructionError::NullArgument { index }),
            value => convert(index, value.clone()),
        }
    }

    /// Sequential reader over the arguments, in parameter order
    pub fn cursor(&self) -> ArgCursor<'_> {
        ArgCursor {
            args: self,
            index: 0,
        }
    }

    fn raw(&self, index: usize) -> Result<&FieldValue, ConstructionError> {
        self.values
            .get(index)
            .ok_or_else(|| ConstructionError::InvalidArgument {
                index,
                message: format!("only {} arguments supplied", self.values.len()),
            })
    }
}

/// Reads [`ConstructorArgs`] one parameter at a time
pub struct ArgCursor<'a> {
    args: &'a ConstructorArgs,
    index: usize,
}

impl ArgCursor<'_> {
    pub fn next_or_default<T>(&mut self) -> Result<T, ConstructionError>
    where
        T: FromFieldValue + Default,
    {
        let value = self.args.value_or_default(self.index);
        self.index += 1;
        value
    }

    pub fn next_required<T: FromFieldValue>(&mut self) -> Result<T, ConstructionError> {
        let value = self.args.required(self.index);
        self.index += 1;
        value
    }
}

fn convert<T: FromFieldValue>(index: usize, value: FieldValue) -> Result<T, ConstructionError> {
    let kind = value.kind();
    T::from_field_value(value).ok_or_else(|| ConstructionError::InvalidArgument {
        index,
        message: format!("cannot convert {} argument", kind),
    })
}

/// Signature of a constructor body
pub type BuildFn<T> = fn(&ConstructorArgs) -> Result<T, ConstructionError>;

/// One way of creating a `T`
pub struct Constructor<T> {
    pub name: &'static str,
    pub visibility: Visibility,
    pub params: Vec<ParamKind>,
    build: BuildFn<T>,
}

impl<T> Constructor<T> {
    pub fn new(
        name: &'static str,
        visibility: Visibility,
        params: Vec<ParamKind>,
        build: BuildFn<T>,
    ) -> Self {
        Self {
            name,
            visibility,
            params,
            build,
        }
    }

    pub fn public(name: &'static str, params: Vec<ParamKind>, build: BuildFn<T>) -> Self {
        Self::new(name, Visibility::Public, params, build)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Placeholder argument for every parameter
    pub fn placeholders(&self) -> ConstructorArgs {
        ConstructorArgs::new(self.params.iter().map(ParamKind::placeholder).collect())
    }

    pub fn invoke(&self, args: &ConstructorArgs) -> Result<T, ConstructionError> {
        (self.build)(args)
    }
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            visibility: self.visibility,
            params: self.params.clone(),
            build: self.build,
        }
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("params", &self.params)
            .finish()
    }
}

/// Pick the usable constructor with the most parameters.
///
/// Ties go to the constructor declared first. Returns `None` when every
/// constructor is private or package-restricted.
pub fn largest_usable_constructor<T>(constructors: &[Constructor<T>]) -> Option<&Constructor<T>> {
    constructors
        .iter()
        .filter(|c| c.visibility.is_usable())
        .fold(None, |best: Option<&Constructor<T>>, candidate| match best {
            Some(current) if current.arity() >= candidate.arity() => Some(current),
            _ => Some(candidate),
        })
}

/// Build a `T` through its largest usable constructor fed with placeholders.
///
/// Composed entities use this to initialise their base part, the way a
/// derived constructor delegates to its parent.
pub fn construct_with_placeholders<T: Entity>() -> Result<T, ConstructionError> {
    let constructors = T::constructors();
    let constructor = largest_usable_constructor(&constructors).ok_or_else(|| {
        ConstructionError::Failed(format!(
            "no usable constructor for base type '{}'",
            T::type_shape().type_name
        ))
    })?;
    constructor.invoke(&constructor.placeholders())
}

/// Base trait for every entity that can carry links.
///
/// Implementations describe the type's fields and constructors and expose
/// name-based field access. Nothing here requires the type to declare a links
/// field.
pub trait Entity: Send + Sync + 'static {
    /// Fields of this type and its ancestors
    fn type_shape() -> TypeShape
    where
        Self: Sized;

    /// Every constructor of this type, in declaration order
    fn constructors() -> Vec<Constructor<Self>>
    where
        Self: Sized;

    /// Read a field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Write a field by name
    fn set_field_value(&mut self, field: &str, value: FieldValue) -> Result<(), FieldAccessError>;
}

/// Convert a value for a named field, reporting a mismatch as a [`FieldAccessError`]
pub fn field_from_value<T: FromFieldValue>(
    field: &str,
    expected: &'static str,
    value: FieldValue,
) -> Result<T, FieldAccessError> {
    let actual = value.kind();
    T::from_field_value(value).ok_or_else(|| FieldAccessError::TypeMismatch {
        field: field.to_string(),
        expected,
        actual,
    })
}
