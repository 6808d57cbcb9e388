// inspector_core/src/reflect/value.rs
use crate::error::AccessError;
use crate::reflect::reflect::Reflect;
use std::fmt;

/// Kind of value a member holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
    Enum,
    Array,
    Object,
}

/// One enum variant together with the variants of its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: &'static str,
    pub variant: &'static str,
    pub variants: &'static [&'static str],
}

/// Type-erased member value.
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Enum(EnumValue),
    Array(Vec<Value>),
    Object(Box<dyn Reflect>),
}

impl Value {
    /// `None` for `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Text(_) => Some(ValueKind::Text),
            Value::Enum(_) => Some(ValueKind::Enum),
            Value::Array(_) => Some(ValueKind::Array),
            Value::Object(_) => Some(ValueKind::Object),
        }
    }

    /// Short name of the held type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Enum(e) => e.type_name,
            Value::Array(_) => "array",
            Value::Object(o) => o.type_info().name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&dyn Reflect> {
        match self {
            Value::Object(o) => Some(o.as_ref()),
            _ => None,
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(i) => Value::Int(*i),
            Value::Float(f) => Value::Float(*f),
            Value::Text(t) => Value::Text(t.clone()),
            Value::Enum(e) => Value::Enum(e.clone()),
            Value::Array(a) => Value::Array(a.clone()),
            Value::Object(o) => Value::Object(o.clone_reflect()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a.type_name == b.type_name && a.variant == b.variant,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.reflect_eq(b.as_ref()),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(v) => write!(f, "Float({v})"),
            Value::Text(t) => write!(f, "Text({t:?})"),
            Value::Enum(e) => write!(f, "Enum({}::{})", e.type_name, e.variant),
            Value::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Value::Object(o) => write!(f, "Object({})", o.type_info().name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "<null>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(t) => write!(f, "{t:?}"),
            Value::Enum(e) => write!(f, "{}", e.variant),
            Value::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Object(o) => write!(f, "{} {{ .. }}", o.type_info().name()),
        }
    }
}

/// Conversion between a concrete member type and `Value`.
pub trait ReflectValue: Sized {
    fn to_value(&self) -> Result<Value, AccessError>;
    fn from_value(value: Value) -> Result<Self, AccessError>;
    fn value_kind() -> ValueKind;
}

impl ReflectValue for bool {
    fn to_value(&self) -> Result<Value, AccessError> {
        Ok(Value::Bool(*self))
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(AccessError::type_mismatch("bool", &other)),
        }
    }

    fn value_kind() -> ValueKind {
        ValueKind::Bool
    }
}

macro_rules! impl_reflect_int {
    ($($ty:ty),*) => {
        $(
            impl ReflectValue for $ty {
                fn to_value(&self) -> Result<Value, AccessError> {
                    i64::try_from(*self).map(Value::Int).map_err(|_| AccessError::OutOfRange {
                        value: self.to_string(),
                        target: "i64",
                    })
                }

                fn from_value(value: Value) -> Result<Self, AccessError> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(v).map_err(|_| AccessError::OutOfRange {
                            value: v.to_string(),
                            target: stringify!($ty),
                        }),
                        other => Err(AccessError::type_mismatch(stringify!($ty), &other)),
                    }
                }

                fn value_kind() -> ValueKind {
                    ValueKind::Int
                }
            }
        )*
    };
}

impl_reflect_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl ReflectValue for f32 {
    fn to_value(&self) -> Result<Value, AccessError> {
        Ok(Value::Float(f64::from(*self)))
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        let v = match value {
            Value::Float(v) => v,
            Value::Int(i) => i as f64,
            other => return Err(AccessError::type_mismatch("f32", &other)),
        };
        if v.is_finite() && v.abs() > f64::from(f32::MAX) {
            return Err(AccessError::OutOfRange { value: v.to_string(), target: "f32" });
        }
        Ok(v as f32)
    }

    fn value_kind() -> ValueKind {
        ValueKind::Float
    }
}

impl ReflectValue for f64 {
    fn to_value(&self) -> Result<Value, AccessError> {
        Ok(Value::Float(*self))
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(i) => Ok(i as f64),
            other => Err(AccessError::type_mismatch("f64", &other)),
        }
    }

    fn value_kind() -> ValueKind {
        ValueKind::Float
    }
}

impl ReflectValue for String {
    fn to_value(&self) -> Result<Value, AccessError> {
        Ok(Value::Text(self.clone()))
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Text(t) => Ok(t),
            other => Err(AccessError::type_mismatch("text", &other)),
        }
    }

    fn value_kind() -> ValueKind {
        ValueKind::Text
    }
}

impl<T: ReflectValue> ReflectValue for Vec<T> {
    fn to_value(&self) -> Result<Value, AccessError> {
        self.iter().map(ReflectValue::to_value).collect::<Result<_, _>>().map(Value::Array)
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(AccessError::type_mismatch("array", &other)),
        }
    }

    fn value_kind() -> ValueKind {
        ValueKind::Array
    }
}

impl<T: ReflectValue, const N: usize> ReflectValue for [T; N] {
    fn to_value(&self) -> Result<Value, AccessError> {
        self.iter().map(ReflectValue::to_value).collect::<Result<_, _>>().map(Value::Array)
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        let items = Vec::<T>::from_value(value)?;
        let found = items.len();
        items
            .try_into()
            .map_err(|_| AccessError::LengthMismatch { expected: N, found })
    }

    fn value_kind() -> ValueKind {
        ValueKind::Array
    }
}

/// `None` is presented as a null value.
impl<T: ReflectValue> ReflectValue for Option<T> {
    fn to_value(&self) -> Result<Value, AccessError> {
        match self {
            Some(v) => v.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn value_kind() -> ValueKind {
        T::value_kind()
    }
}

/// Unboxes a reflected object into its concrete type.
pub fn object_from_value<T: Reflect>(value: Value) -> Result<T, AccessError> {
    match value {
        Value::Object(object) => {
            let found = object.type_info().name();
            object
                .into_any()
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| AccessError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    found,
                })
        }
        other => Err(AccessError::type_mismatch(std::any::type_name::<T>(), &other)),
    }
}

/// Value kind and type name of a property getter, used by the derive.
pub fn getter_value_type<S, T: ReflectValue>(_getter: fn(&S) -> T) -> (ValueKind, &'static str) {
    (T::value_kind(), std::any::type_name::<T>())
}
