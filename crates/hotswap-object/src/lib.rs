//! Hotswap Object Model
//!
//! Minimal dynamic object model that component definitions, prototype
//! proxies and mounted instances are built from.
//!
//! # Core Concepts
//!
//! - [`ObjectHandle`]: Shared object with reference identity and a delegation parent
//! - [`Property`]: Data descriptor (`writable`, `enumerable`, `configurable`)
//! - [`Value`]: Primitive, object or method payload
//! - [`Method`]: Callable body plus attached auxiliary data
//!
//! # Example
//!
//! ```rust
//! use hotswap_object::{Method, Object, ObjectHandle, Property, Value};
//!
//! // A definition with one method and one static-style data member
//! let definition = ObjectHandle::from(
//!     Object::new()
//!         .define("answer", Property::data(42))
//!         .define("render", Property::hidden(Method::new(|this, _| Ok(this.get("answer"))))),
//! );
//!
//! // Instances delegate to it
//! let instance = ObjectHandle::with_prototype(&definition);
//! assert_eq!(instance.call_method("render", &[]).unwrap(), Value::from(42));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod method;
mod object;
mod property;
mod value;

// Re-exports
pub use error::{ObjectError, Result};
pub use method::{Method, NativeFn};
pub use object::{Object, ObjectHandle, ObjectId, WeakObjectHandle};
pub use property::Property;
pub use value::Value;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
