//! Property descriptors

use crate::value::Value;

/// Data property descriptor
///
/// # Attributes
/// - `writable`: assignment through [`ObjectHandle::set`](crate::ObjectHandle::set) is allowed
/// - `enumerable`: visible to [`ObjectHandle::assign_from`](crate::ObjectHandle::assign_from)
///   and [`ObjectHandle::enumerable_keys`](crate::ObjectHandle::enumerable_keys)
/// - `configurable`: may be redefined or deleted
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Stored value
    pub value: Value,

    /// Assignable
    pub writable: bool,

    /// Enumerable
    pub enumerable: bool,

    /// Redefinable and deletable
    pub configurable: bool,
}

impl Property {
    /// Plain data property (all attributes set)
    #[inline]
    #[must_use]
    pub fn data(value: impl Into<Value>) -> Self {
        Self::with_attributes(value, true, true, true)
    }

    /// Non-enumerable but otherwise unrestricted property, the shape of a
    /// class method
    #[inline]
    #[must_use]
    pub fn hidden(value: impl Into<Value>) -> Self {
        Self::with_attributes(value, true, false, true)
    }

    /// Enumerable, non-writable property
    #[inline]
    #[must_use]
    pub fn read_only(value: impl Into<Value>) -> Self {
        Self::with_attributes(value, false, true, true)
    }

    /// Property with explicit attributes
    #[inline]
    #[must_use]
    pub fn with_attributes(
        value: impl Into<Value>,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        Self {
            value: value.into(),
            writable,
            enumerable,
            configurable,
        }
    }
}
