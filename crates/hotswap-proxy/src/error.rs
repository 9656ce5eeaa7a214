//! Error types for proxy updates

use hotswap_object::ObjectError;

/// Errors surfaced by [`PrototypeProxy::update`](crate::PrototypeProxy::update)
///
/// An update that fails midway is not rolled back: members processed before
/// the failing one stay installed.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Installing, replacing or removing a proxy member failed
    #[error("failed to install proxy member '{name}': {source}")]
    Install {
        /// Member name
        name: String,
        /// Underlying object model failure
        #[source]
        source: ObjectError,
    },

    /// Object model failure outside member installation
    #[error("object model error: {0}")]
    Object(#[from] ObjectError),
}

impl ProxyError {
    /// Create installation error for member `name`
    pub fn install(name: impl Into<String>, source: ObjectError) -> Self {
        Self::Install {
            name: name.into(),
            source,
        }
    }

    /// Member name, for installation failures
    #[must_use]
    pub fn member(&self) -> Option<&str> {
        match self {
            Self::Install { name, .. } => Some(name),
            Self::Object(_) => None,
        }
    }
}

/// Result type alias for proxy operations
pub type Result<T> = std::result::Result<T, ProxyError>;
