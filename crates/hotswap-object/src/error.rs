//! Error types for object model operations

/// Errors raised by property access, definition and method dispatch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectError {
    /// A new property was added to an object that no longer accepts them
    #[error("cannot add property '{name}': object is not extensible")]
    NotExtensible {
        /// Property name
        name: String,
    },

    /// Redefinition or deletion of a non-configurable property
    #[error("property '{name}' is not configurable")]
    NonConfigurable {
        /// Property name
        name: String,
    },

    /// Assignment to a non-writable property
    #[error("cannot assign to read-only property '{name}'")]
    ReadOnly {
        /// Property name
        name: String,
    },

    /// Name did not resolve to a method
    #[error("'{name}' is not a method")]
    NotCallable {
        /// Property name
        name: String,
    },

    /// Prototype link would make the delegation chain circular
    #[error("prototype of object {object} would create a cycle")]
    PrototypeCycle {
        /// Id of the object whose prototype was being set
        object: String,
    },

    /// Failure reported by a method body
    #[error("method failed: {0}")]
    Thrown(String),
}

impl ObjectError {
    /// Create a method failure
    pub fn thrown(message: impl Into<String>) -> Self {
        Self::Thrown(message.into())
    }

    pub(crate) fn not_extensible(name: &str) -> Self {
        Self::NotExtensible {
            name: name.to_owned(),
        }
    }

    pub(crate) fn non_configurable(name: &str) -> Self {
        Self::NonConfigurable {
            name: name.to_owned(),
        }
    }

    pub(crate) fn read_only(name: &str) -> Self {
        Self::ReadOnly {
            name: name.to_owned(),
        }
    }

    pub(crate) fn not_callable(name: &str) -> Self {
        Self::NotCallable {
            name: name.to_owned(),
        }
    }
}

/// Result type alias for object model operations
pub type Result<T> = std::result::Result<T, ObjectError>;
