//! Proxy configuration
//!
//! Names of the members a [`PrototypeProxy`](crate::PrototypeProxy) injects
//! on every update.

use serde::{Deserialize, Serialize};

/// Default name of the mount lifecycle hook
pub const DEFAULT_MOUNT_HOOK: &str = "onInstanceWillMount";

/// Default name of the unmount lifecycle hook
pub const DEFAULT_UNMOUNT_HOOK: &str = "onInstanceWillUnmount";

/// Default name of the auxiliary cache member
pub const DEFAULT_AUTO_BIND_CACHE: &str = "__autoBindMap";

/// Injected member names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Hook that starts tracking an instance
    pub mount_hook: String,
    /// Hook that stops tracking an instance
    pub unmount_hook: String,
    /// Member reset to a fresh empty object on every update; hosts use it to
    /// cache per-identity data such as bound methods
    pub auto_bind_cache: String,
}

impl ProxyConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With lifecycle hook names
    #[inline]
    #[must_use]
    pub fn with_lifecycle_hooks(
        mut self,
        mount: impl Into<String>,
        unmount: impl Into<String>,
    ) -> Self {
        self.mount_hook = mount.into();
        self.unmount_hook = unmount.into();
        self
    }

    /// With auxiliary cache member name
    #[inline]
    #[must_use]
    pub fn with_auto_bind_cache(mut self, name: impl Into<String>) -> Self {
        self.auto_bind_cache = name.into();
        self
    }

    /// Names injected on every update, in installation order
    #[must_use]
    pub fn injected_names(&self) -> [&str; 3] {
        [
            self.mount_hook.as_str(),
            self.unmount_hook.as_str(),
            self.auto_bind_cache.as_str(),
        ]
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            mount_hook: DEFAULT_MOUNT_HOOK.to_owned(),
            unmount_hook: DEFAULT_UNMOUNT_HOOK.to_owned(),
            auto_bind_cache: DEFAULT_AUTO_BIND_CACHE.to_owned(),
        }
    }
}
