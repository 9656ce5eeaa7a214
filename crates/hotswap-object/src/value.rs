//! Value - Dynamically typed property values
//!
//! Provides [`Value`], the payload of every property. Primitives compare by
//! value, objects and methods by reference identity.

use crate::method::Method;
use crate::object::ObjectHandle;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// A property value
///
/// Equality follows [`Value::same_value`]: `NaN` equals itself and
/// reference-typed values are equal only when they are the same reference.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Undefined,

    /// Explicit empty value
    Null,

    /// Boolean
    Bool(bool),

    /// Number
    Number(f64),

    /// Immutable string
    Str(Arc<str>),

    /// Object reference
    Object(ObjectHandle),

    /// Callable method
    Method(Method),
}

impl Value {
    /// Identity comparison
    ///
    /// Numbers use bitwise-aware comparison so that `NaN` is the same value
    /// as itself; objects and methods compare by reference.
    #[must_use]
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Method(a), Self::Method(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Returns true for [`Value::Undefined`]
    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true for [`Value::Method`]
    #[inline]
    #[must_use]
    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method(_))
    }

    /// Method payload, if callable
    #[inline]
    #[must_use]
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Self::Method(m) => Some(m),
            _ => None,
        }
    }

    /// Object payload, if any
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectHandle> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Number payload, if any
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload, if any
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(&**s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value(other)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Object(o) => write!(f, "[object {}]", o.id()),
            Self::Method(_) => write!(f, "[method]"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<ObjectHandle> for Value {
    fn from(o: ObjectHandle) -> Self {
        Self::Object(o)
    }
}

impl From<Method> for Value {
    fn from(m: Method) -> Self {
        Self::Method(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_same_value_as_itself() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
    }

    #[test]
    fn signed_zeroes_differ() {
        assert_ne!(Value::Number(0.0), Value::Number(-0.0));
    }

    #[test]
    fn objects_compare_by_reference() {
        let a = ObjectHandle::new();
        let b = ObjectHandle::new();

        assert_eq!(Value::from(a.clone()), Value::from(a));
        assert_ne!(Value::from(ObjectHandle::new()), Value::from(b));
    }

    #[test]
    fn methods_compare_by_reference() {
        let m = Method::new(|_, _| Ok(Value::Undefined));
        let other = Method::new(|_, _| Ok(Value::Undefined));

        assert_eq!(Value::from(m.clone()), Value::from(m.clone()));
        assert_ne!(Value::from(m), Value::from(other));
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(42).as_number(), Some(42.0));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert!(Value::default().is_undefined());
    }
}
