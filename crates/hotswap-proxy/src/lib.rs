//! Hotswap Prototype Proxy
//!
//! Hot-swapping of component behavior at runtime. A [`PrototypeProxy`]
//! hands out one stable object to be used as the prototype of every
//! component instance; [`PrototypeProxy::update`] redirects that object to a
//! newly loaded definition so already-mounted instances keep their state and
//! pick up the new behavior.
//!
//! # Core Concepts
//!
//! - [`PrototypeProxy`]: `update` / `get` / `mounted_instances`
//! - [`MountedInstances`]: Live view of instances tracked by the lifecycle hooks
//! - [`MemberDiff`]: Ordered added/removed/retained member names
//! - [`ProxyConfig`]: Names of the injected lifecycle hooks and cache member
//!
//! # Example
//!
//! ```rust
//! use hotswap_object::{Object, ObjectHandle, Property, Value};
//! use hotswap_proxy::PrototypeProxy;
//!
//! let v1 = ObjectHandle::from(Object::new().define("answer", Property::data(42)));
//! let proxy = PrototypeProxy::from_definition(&v1).unwrap();
//!
//! // Host creates and mounts an instance
//! let instance = proxy.instantiate();
//! instance.call_method("onInstanceWillMount", &[]).unwrap();
//! assert_eq!(proxy.mounted_instances().len(), 1);
//!
//! // A reload swaps the behavior in place
//! let v2 = ObjectHandle::from(Object::new().define("answer", Property::data(43)));
//! proxy.update(&v2).unwrap();
//! assert_eq!(instance.get("answer"), Value::from(43));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod diff;
mod error;
mod mounted;
mod proxy;

// Re-exports
pub use config::{ProxyConfig, DEFAULT_AUTO_BIND_CACHE, DEFAULT_MOUNT_HOOK, DEFAULT_UNMOUNT_HOOK};
pub use diff::MemberDiff;
pub use error::{ProxyError, Result};
pub use mounted::MountedInstances;
pub use proxy::{Definition, PrototypeProxy, ProxyState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
