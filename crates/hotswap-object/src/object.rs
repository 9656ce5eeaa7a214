//! Object - Reference-identity property bags with explicit delegation
//!
//! [`ObjectHandle`] is the shared reference every definition, proxy and
//! instance is built from. Member resolution is an explicit walk:
//! own properties first, then the delegation parent (the "prototype"),
//! see [`ObjectHandle::lookup`].

use crate::error::{ObjectError, Result};
use crate::property::Property;
use crate::value::Value;
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// Stable identifier of an object, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[..8])
    }
}

/// Owned object state
///
/// Own properties keep insertion order; redefining an existing name keeps
/// its original position.
#[derive(Debug)]
pub struct Object {
    properties: IndexMap<String, Property>,
    prototype: Option<ObjectHandle>,
    extensible: bool,
}

impl Object {
    /// Empty extensible object without prototype
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: IndexMap::new(),
            prototype: None,
            extensible: true,
        }
    }

    /// Empty object delegating to `prototype`
    #[inline]
    #[must_use]
    pub fn with_prototype(prototype: ObjectHandle) -> Self {
        Self {
            prototype: Some(prototype),
            ..Self::new()
        }
    }

    /// Builder: add or replace a property
    #[inline]
    #[must_use]
    pub fn define(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Number of own properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True if no own properties
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared, reference-identity handle to an [`Object`]
///
/// Cloning yields the same object. Locks are held only for the duration of
/// a single operation and never while a method body runs, so methods may
/// freely call back into the objects they are invoked on.
#[derive(Clone)]
pub struct ObjectHandle {
    inner: Arc<ObjectCell>,
}

struct ObjectCell {
    id: ObjectId,
    object: RwLock<Object>,
}

impl ObjectHandle {
    /// New empty object
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_object(Object::new())
    }

    /// Wrap an owned object
    #[must_use]
    pub fn from_object(object: Object) -> Self {
        Self {
            inner: Arc::new(ObjectCell {
                id: ObjectId::generate(),
                object: RwLock::new(object),
            }),
        }
    }

    /// New empty object delegating to `prototype`
    #[inline]
    #[must_use]
    pub fn with_prototype(prototype: &ObjectHandle) -> Self {
        Self::from_object(Object::with_prototype(prototype.clone()))
    }

    /// Object id
    #[inline]
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.inner.id
    }

    /// Reference identity
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &ObjectHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Non-owning reference
    #[inline]
    #[must_use]
    pub fn downgrade(&self) -> WeakObjectHandle {
        WeakObjectHandle {
            id: self.inner.id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Object> {
        self.inner.object.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Object> {
        self.inner.object.write()
    }

    /// Own property descriptor
    #[must_use]
    pub fn get_own_property(&self, name: &str) -> Option<Property> {
        self.read().properties.get(name).cloned()
    }

    /// True if `name` is an own property
    #[must_use]
    pub fn has_own_property(&self, name: &str) -> bool {
        self.read().properties.contains_key(name)
    }

    /// Own property names in insertion order, enumerable or not
    #[must_use]
    pub fn own_keys(&self) -> Vec<String> {
        self.read().properties.keys().cloned().collect()
    }

    /// Own enumerable property names in insertion order
    #[must_use]
    pub fn enumerable_keys(&self) -> Vec<String> {
        self.read()
            .properties
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Snapshot of every own property in insertion order
    #[must_use]
    pub fn own_properties(&self) -> Vec<(String, Property)> {
        self.read()
            .properties
            .iter()
            .map(|(name, p)| (name.clone(), p.clone()))
            .collect()
    }

    /// Resolve `name`: own properties first, then along the prototype chain
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Property> {
        let mut cursor = Some(self.clone());
        while let Some(handle) = cursor {
            let object = handle.read();
            if let Some(property) = object.properties.get(name) {
                return Some(property.clone());
            }
            cursor = object.prototype.clone();
        }
        None
    }

    /// Resolved value of `name`, [`Value::Undefined`] if absent
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).map_or(Value::Undefined, |p| p.value)
    }

    /// True if `name` resolves anywhere on the chain
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Assign `name`
    ///
    /// Writes an existing own property in place. Otherwise creates a plain
    /// data property on this object, shadowing any inherited one.
    ///
    /// # Errors
    /// - [`ObjectError::ReadOnly`] if the own or inherited property is not writable
    /// - [`ObjectError::NotExtensible`] if a new property cannot be added
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();

        let prototype = {
            let mut object = self.write();
            if let Some(existing) = object.properties.get_mut(name) {
                if !existing.writable {
                    return Err(ObjectError::read_only(name));
                }
                existing.value = value;
                return Ok(());
            }
            object.prototype.clone()
        };

        if let Some(prototype) = prototype {
            if prototype.lookup(name).is_some_and(|p| !p.writable) {
                return Err(ObjectError::read_only(name));
            }
        }

        let mut object = self.write();
        if !object.extensible {
            return Err(ObjectError::not_extensible(name));
        }
        object
            .properties
            .insert(name.to_owned(), Property::data(value));
        Ok(())
    }

    /// Define or redefine an own property with explicit attributes
    ///
    /// # Errors
    /// - [`ObjectError::NonConfigurable`] when replacing a non-configurable property
    /// - [`ObjectError::NotExtensible`] when adding to a non-extensible object
    pub fn define_property(&self, name: &str, property: Property) -> Result<()> {
        let mut object = self.write();
        let configurable = object.properties.get(name).map(|p| p.configurable);
        match configurable {
            Some(false) => Err(ObjectError::non_configurable(name)),
            None if !object.extensible => Err(ObjectError::not_extensible(name)),
            _ => {
                object.properties.insert(name.to_owned(), property);
                Ok(())
            }
        }
    }

    /// Remove an own property, returning whether it existed
    ///
    /// # Errors
    /// [`ObjectError::NonConfigurable`] if the property cannot be deleted
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut object = self.write();
        match object.properties.get(name).map(|p| p.configurable) {
            None => Ok(false),
            Some(false) => Err(ObjectError::non_configurable(name)),
            Some(true) => {
                object.properties.shift_remove(name);
                Ok(true)
            }
        }
    }

    /// Delegation parent
    #[must_use]
    pub fn prototype(&self) -> Option<ObjectHandle> {
        self.read().prototype.clone()
    }

    /// Relink the delegation parent
    ///
    /// # Errors
    /// [`ObjectError::PrototypeCycle`] if this object is on `prototype`'s chain
    pub fn set_prototype(&self, prototype: Option<ObjectHandle>) -> Result<()> {
        if let Some(candidate) = &prototype {
            if candidate.ptr_eq(self) || candidate.inherits_from(self) {
                return Err(ObjectError::PrototypeCycle {
                    object: self.id().to_string(),
                });
            }
        }

        self.write().prototype = prototype;
        Ok(())
    }

    /// True if `ancestor` is somewhere on this object's prototype chain
    #[must_use]
    pub fn inherits_from(&self, ancestor: &ObjectHandle) -> bool {
        let mut cursor = self.prototype();
        while let Some(handle) = cursor {
            if handle.ptr_eq(ancestor) {
                return true;
            }
            cursor = handle.prototype();
        }
        false
    }

    /// Forbid adding new properties
    pub fn prevent_extensions(&self) {
        self.write().extensible = false;
    }

    /// Resolve `name` and invoke it with this object as receiver
    ///
    /// # Errors
    /// - [`ObjectError::NotCallable`] if `name` does not resolve to a method
    /// - any error returned by the method body
    pub fn call_method(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.get(name) {
            Value::Method(method) => method.call(self, args),
            _ => Err(ObjectError::not_callable(name)),
        }
    }

    /// Shallow-copy `source`'s enumerable own properties onto this object
    ///
    /// Values are assigned through [`ObjectHandle::set`], so nested objects
    /// are shared, not cloned.
    ///
    /// # Errors
    /// The first assignment failure; properties copied before it stay copied.
    pub fn assign_from(&self, source: &ObjectHandle) -> Result<()> {
        let entries: Vec<(String, Value)> = source
            .read()
            .properties
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(name, p)| (name.clone(), p.value.clone()))
            .collect();

        for (name, value) in entries {
            self.set(&name, value)?;
        }
        Ok(())
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Object> for ObjectHandle {
    fn from(object: Object) -> Self {
        Self::from_object(object)
    }
}

impl Debug for ObjectHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ObjectHandle");
        s.field("id", &self.inner.id);
        // Keys only: values may point back at this object
        if let Some(object) = self.inner.object.try_read() {
            s.field("keys", &object.properties.keys().collect::<Vec<_>>());
        }
        s.finish()
    }
}

/// Non-owning reference to an object
#[derive(Debug, Clone)]
pub struct WeakObjectHandle {
    id: ObjectId,
    inner: Weak<ObjectCell>,
}

impl WeakObjectHandle {
    /// Id of the referenced object, available even after it is dropped
    #[inline]
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Strong handle, if the object is still alive
    #[inline]
    #[must_use]
    pub fn upgrade(&self) -> Option<ObjectHandle> {
        self.inner.upgrade().map(|inner| ObjectHandle { inner })
    }

    /// True while some strong handle exists
    #[inline]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
