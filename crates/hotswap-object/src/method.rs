//! Method - Callable values with attached data
//!
//! A [`Method`] pairs a native body with an `attached` object. Component
//! definition styles sometimes hang auxiliary data off a method value; that
//! data lives in the attached object and is copied explicitly where needed.

use crate::error::Result;
use crate::object::ObjectHandle;
use crate::value::Value;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Native method body: `(receiver, arguments) -> result`
pub type NativeFn = dyn Fn(&ObjectHandle, &[Value]) -> Result<Value> + Send + Sync;

/// Callable method descriptor
///
/// Cloning is cheap and preserves identity: clones compare equal under
/// [`Method::ptr_eq`].
#[derive(Clone)]
pub struct Method {
    inner: Arc<MethodInner>,
}

struct MethodInner {
    body: Box<NativeFn>,
    attached: ObjectHandle,
}

impl Method {
    /// Create method with an empty attached object
    #[must_use]
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&ObjectHandle, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::with_attached(body, ObjectHandle::new())
    }

    /// Create method carrying existing attached data
    #[must_use]
    pub fn with_attached<F>(body: F, attached: ObjectHandle) -> Self
    where
        F: Fn(&ObjectHandle, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(MethodInner {
                body: Box::new(body),
                attached,
            }),
        }
    }

    /// Invoke with `receiver` bound as the method's `this`
    ///
    /// # Errors
    /// Whatever the body returns.
    #[inline]
    pub fn call(&self, receiver: &ObjectHandle, args: &[Value]) -> Result<Value> {
        (self.inner.body)(receiver, args)
    }

    /// Auxiliary data attached to this method
    #[inline]
    #[must_use]
    pub fn attached(&self) -> &ObjectHandle {
        &self.inner.attached
    }

    /// Reference identity
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("attached", &self.inner.attached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_receives_receiver_and_args() {
        let m = Method::new(|this, args| {
            let base = this.get("base").as_number().unwrap_or_default();
            let extra = args.first().and_then(Value::as_number).unwrap_or_default();
            Ok(Value::Number(base + extra))
        });

        let receiver = ObjectHandle::new();
        receiver.set("base", 40).unwrap();

        assert_eq!(m.call(&receiver, &[Value::from(2)]).unwrap(), Value::from(42));
    }

    #[test]
    fn clones_share_identity() {
        let m = Method::new(|_, _| Ok(Value::Undefined));
        let copy = m.clone();

        assert!(m.ptr_eq(&copy));
        assert!(m.attached().ptr_eq(copy.attached()));
    }

    #[test]
    fn with_attached_keeps_data() {
        let attached = ObjectHandle::new();
        attached.set("displayName", "Counter").unwrap();

        let m = Method::with_attached(|_, _| Ok(Value::Null), attached);
        assert_eq!(m.attached().get("displayName"), Value::from("Counter"));
    }
}
