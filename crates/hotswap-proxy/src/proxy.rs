//! PrototypeProxy - Stable identity that always forwards to the latest definition
//!
//! The proxy owns one object (returned by [`PrototypeProxy::get`]) that hosts
//! use as the prototype of every instance. Each [`PrototypeProxy::update`]
//! rewrites that object's members in place so existing instances pick up
//! the new behavior without being recreated.

use crate::config::ProxyConfig;
use crate::diff::MemberDiff;
use crate::error::{ProxyError, Result};
use crate::mounted::MountedInstances;
use hotswap_object::{Method, ObjectError, ObjectHandle, Property, Value};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A component definition: the object whose members describe its behavior
pub type Definition = ObjectHandle;

type CurrentSlot = Arc<RwLock<Option<Definition>>>;

/// Lifecycle state of a proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyState {
    /// No definition applied yet
    Uninitialized,
    /// At least one definition applied
    Active,
}

/// Hot-swappable prototype proxy
///
/// Cloning yields another handle to the same proxy.
///
/// # Example
/// ```
/// use hotswap_object::{Method, Object, ObjectHandle, Property, Value};
/// use hotswap_proxy::PrototypeProxy;
///
/// let v1 = ObjectHandle::from(Object::new().define(
///     "render",
///     Property::hidden(Method::new(|_, _| Ok(Value::from("v1")))),
/// ));
/// let v2 = ObjectHandle::from(Object::new().define(
///     "render",
///     Property::hidden(Method::new(|_, _| Ok(Value::from("v2")))),
/// ));
///
/// let proxy = PrototypeProxy::new();
/// proxy.update(&v1).unwrap();
/// let instance = proxy.instantiate();
///
/// proxy.update(&v2).unwrap();
/// assert_eq!(instance.call_method("render", &[]).unwrap(), Value::from("v2"));
/// ```
#[derive(Debug, Clone)]
pub struct PrototypeProxy {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    config: ProxyConfig,
    target: ObjectHandle,
    current: CurrentSlot,
    mounted: MountedInstances,
    exposed: Mutex<Exposed>,
}

/// Definition-derived members and the values installed for them
#[derive(Debug, Default)]
struct Exposed {
    installed: IndexMap<String, Value>,
    generation: u64,
}

impl PrototypeProxy {
    /// Create uninitialized proxy with default injected member names
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProxyConfig::default())
    }

    /// Create uninitialized proxy with custom injected member names
    #[must_use]
    pub fn with_config(config: ProxyConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                target: ObjectHandle::new(),
                current: Arc::new(RwLock::new(None)),
                mounted: MountedInstances::new(),
                exposed: Mutex::new(Exposed::default()),
            }),
        }
    }

    /// Create proxy already pointing at `definition`
    ///
    /// # Errors
    /// See [`PrototypeProxy::update`].
    pub fn from_definition(definition: &Definition) -> Result<Self> {
        let proxy = Self::new();
        proxy.update(definition)?;
        Ok(proxy)
    }

    /// Repoint the proxy at `next`
    ///
    /// Removes members `next` no longer declares, reinstalls every member it
    /// does declare, resets the injected members, then makes `next` both the
    /// dispatch target of all forwarders and the proxy object's prototype.
    ///
    /// A value assigned directly onto the proxy object replaces the installed
    /// one and from then on belongs to the caller: it survives updates that
    /// do not declare its name, and is overwritten by one that does.
    ///
    /// # Errors
    /// [`ProxyError::Install`] when a member cannot be copied, defined or
    /// deleted. Members handled before the failure remain changed.
    pub fn update(&self, next: &Definition) -> Result<()> {
        let shared = &*self.shared;
        let target = &shared.target;
        if next.ptr_eq(target) || next.inherits_from(target) {
            return Err(ObjectError::PrototypeCycle {
                object: target.id().to_string(),
            }
            .into());
        }

        let mut exposed = shared.exposed.lock();

        // Names reassigned from outside since the last update are no longer ours
        exposed.installed.retain(|name, installed| {
            target
                .get_own_property(name)
                .is_some_and(|p| p.value.same_value(installed))
        });

        let declared = next.own_properties();
        let diff = MemberDiff::between(
            &exposed.installed.keys().collect::<Vec<_>>(),
            &declared.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        );

        for name in &diff.removed {
            tracing::trace!(member = %name, "removing proxy member");
            target
                .delete(name)
                .map_err(|source| ProxyError::install(name, source))?;
            exposed.installed.shift_remove(name);
        }

        for (name, property) in &declared {
            let value = match &property.value {
                Value::Method(method) => Value::Method(self.forwarder(name, method)?),
                data => data.clone(),
            };
            self.install(name, value.clone(), Some(property))?;
            // Owned from here on, even if a later member fails to install
            exposed.installed.insert(name.clone(), value);
        }

        let config = &shared.config;
        self.install(
            &config.mount_hook,
            Value::Method(self.mount_hook()),
            next.get_own_property(&config.mount_hook).as_ref(),
        )?;
        self.install(
            &config.unmount_hook,
            Value::Method(self.unmount_hook()),
            next.get_own_property(&config.unmount_hook).as_ref(),
        )?;
        self.install(
            &config.auto_bind_cache,
            Value::Object(ObjectHandle::new()),
            next.get_own_property(&config.auto_bind_cache).as_ref(),
        )?;

        *shared.current.write() = Some(next.clone());
        target.set_prototype(Some(next.clone()))?;

        exposed.installed = declared
            .into_iter()
            .map(|(name, _)| {
                let value = target.get(&name);
                (name, value)
            })
            .collect();
        exposed.generation += 1;

        tracing::debug!(
            generation = exposed.generation,
            added = diff.added.len(),
            removed = diff.removed.len(),
            retained = diff.retained.len(),
            "prototype proxy updated"
        );
        Ok(())
    }

    /// The proxy object: stable across every update
    #[inline]
    #[must_use]
    pub fn get(&self) -> ObjectHandle {
        self.shared.target.clone()
    }

    /// Instances whose mount hook ran and whose unmount hook has not
    #[inline]
    #[must_use]
    pub fn mounted_instances(&self) -> MountedInstances {
        self.shared.mounted.clone()
    }

    /// New empty instance delegating to the proxy object
    ///
    /// The instance is not tracked until its mount hook runs.
    #[inline]
    #[must_use]
    pub fn instantiate(&self) -> ObjectHandle {
        ObjectHandle::with_prototype(&self.shared.target)
    }

    /// Active definition, if any
    #[must_use]
    pub fn current(&self) -> Option<Definition> {
        self.shared.current.read().clone()
    }

    /// Lifecycle state
    #[must_use]
    pub fn state(&self) -> ProxyState {
        if self.shared.current.read().is_some() {
            ProxyState::Active
        } else {
            ProxyState::Uninitialized
        }
    }

    /// Number of completed updates
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.shared.exposed.lock().generation
    }

    /// Definition-derived member names currently owned by the proxy
    #[must_use]
    pub fn members(&self) -> Vec<String> {
        self.shared.exposed.lock().installed.keys().cloned().collect()
    }

    /// Injected member names
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.shared.config
    }

    /// Define `name` on the proxy object, keeping the source descriptor's
    /// `enumerable`/`writable` (default: hidden, writable)
    fn install(&self, name: &str, value: Value, source: Option<&Property>) -> Result<()> {
        let (enumerable, writable) = source.map_or((false, true), |p| (p.enumerable, p.writable));
        self.shared
            .target
            .define_property(
                name,
                Property::with_attributes(value, writable, enumerable, true),
            )
            .map_err(|source| ProxyError::install(name, source))
    }

    /// Method that dispatches to the current definition's `name` at call time
    fn forwarder(&self, name: &str, original: &Method) -> Result<Method> {
        let current = Arc::clone(&self.shared.current);
        let key = name.to_owned();
        let method = Method::new(move |receiver, args| forward(&current, &key, receiver, args));

        method
            .attached()
            .assign_from(original.attached())
            .map_err(|source| ProxyError::install(name, source))?;
        Ok(method)
    }

    fn mount_hook(&self) -> Method {
        let current = Arc::clone(&self.shared.current);
        let mounted = self.shared.mounted.clone();
        let hook = self.shared.config.mount_hook.clone();

        Method::new(move |receiver, args| {
            let count = mounted.push(receiver);
            tracing::trace!(instance = %receiver.id(), mounted = count, "instance mounted");
            forward(&current, &hook, receiver, args)
        })
    }

    fn unmount_hook(&self) -> Method {
        let current = Arc::clone(&self.shared.current);
        let mounted = self.shared.mounted.clone();
        let hook = self.shared.config.unmount_hook.clone();

        Method::new(move |receiver, args| {
            if mounted.remove(receiver) {
                tracing::trace!(instance = %receiver.id(), mounted = mounted.len(), "instance unmounted");
            } else {
                tracing::warn!(instance = %receiver.id(), "unmount hook ran for an instance that is not mounted");
            }
            forward(&current, &hook, receiver, args)
        })
    }
}

impl Default for PrototypeProxy {
    fn default() -> Self {
        Self::new()
    }
}

/// Call `name` on the current definition with `receiver` bound; a missing
/// or non-callable member yields `Undefined`
fn forward(
    current: &CurrentSlot,
    name: &str,
    receiver: &ObjectHandle,
    args: &[Value],
) -> hotswap_object::Result<Value> {
    // Lock released before the call so the method may update the proxy
    let resolved = current.read().as_ref().map(|definition| definition.get(name));
    match resolved {
        Some(Value::Method(method)) => method.call(receiver, args),
        _ => Ok(Value::Undefined),
    }
}
