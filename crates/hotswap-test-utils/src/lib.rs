//! Testing utilities for Hotswap workspace
//!
//! Shared component fixtures, a shallow host renderer, and tracing setup.

#![allow(missing_docs)]

use hotswap_object::{Method, Object, ObjectError, ObjectHandle, Property, Value};
use parking_lot::Mutex;
use std::sync::{Arc, Once};

pub const MOUNT_HOOK: &str = "onInstanceWillMount";
pub const UNMOUNT_HOOK: &str = "onInstanceWillUnmount";

/// Install a test subscriber once; filter through `RUST_LOG`
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// `render` reads `answer` through the receiver's prototype chain
pub fn render_answer() -> Method {
    Method::new(|this, _| Ok(this.get("answer")))
}

/// Definition with a static-style `answer` and a `render` method
pub fn static_property(answer: i32) -> ObjectHandle {
    ObjectHandle::from(
        Object::new()
            .define("answer", Property::data(answer))
            .define("render", Property::hidden(render_answer())),
    )
}

/// Same component with `answer` removed
pub fn static_property_removal() -> ObjectHandle {
    ObjectHandle::from(Object::new().define("render", Property::hidden(render_answer())))
}

/// Definition with `propTypes`, `contextTypes` and `childContextTypes`,
/// each mapping `something` to `kind`
pub fn prop_types(kind: &str) -> ObjectHandle {
    let mut object = Object::new().define(
        "render",
        Property::hidden(Method::new(|_, _| Ok(Value::Null))),
    );
    for name in ["propTypes", "contextTypes", "childContextTypes"] {
        let types = ObjectHandle::from(Object::new().define("something", Property::data(kind)));
        object = object.define(name, Property::data(types));
    }
    ObjectHandle::from(object)
}

/// Definition whose `label` method returns `label` and whose `increment`
/// bumps the receiver's own `count`
pub fn counter(label: &'static str) -> ObjectHandle {
    ObjectHandle::from(
        Object::new()
            .define(
                "label",
                Property::hidden(Method::new(move |_, _| Ok(Value::from(label)))),
            )
            .define(
                "increment",
                Property::hidden(Method::new(move |this, args| {
                    let step = args.first().and_then(Value::as_number).unwrap_or(1.0);
                    let count = this.get("count").as_number().unwrap_or_default() + step;
                    this.set("count", count)?;
                    Ok(Value::from(count))
                })),
            ),
    )
}

/// Shared record of lifecycle calls
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Definition with its own mount/unmount hooks that record `"<tag>:mount"`
/// and `"<tag>:unmount"` into `log`
pub fn with_lifecycle(tag: &'static str, log: &CallLog) -> ObjectHandle {
    let on_mount = Arc::clone(log);
    let on_unmount = Arc::clone(log);
    ObjectHandle::from(
        Object::new()
            .define(
                MOUNT_HOOK,
                Property::hidden(Method::new(move |_, _| {
                    on_mount.lock().push(format!("{tag}:mount"));
                    Ok(Value::Undefined)
                })),
            )
            .define(
                UNMOUNT_HOOK,
                Property::hidden(Method::new(move |_, _| {
                    on_unmount.lock().push(format!("{tag}:unmount"));
                    Ok(Value::Undefined)
                })),
            )
            .define("render", Property::hidden(Method::new(move |_, _| Ok(Value::from(tag))))),
    )
}

/// Minimal host: keeps one mounted instance per renderer and re-renders it
/// in place while the component identity stays the same
#[derive(Debug, Default)]
pub struct ShallowRenderer {
    mounted: Option<Mounted>,
    output: Value,
}

#[derive(Debug)]
struct Mounted {
    component: ObjectHandle,
    instance: ObjectHandle,
}

impl ShallowRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `component` (the prototype to instantiate against)
    pub fn render(&mut self, component: &ObjectHandle) -> Result<Value, ObjectError> {
        let same = self
            .mounted
            .as_ref()
            .is_some_and(|m| m.component.ptr_eq(component));

        if !same {
            self.unmount()?;
            let instance = ObjectHandle::with_prototype(component);
            instance.call_method(MOUNT_HOOK, &[])?;
            self.mounted = Some(Mounted {
                component: component.clone(),
                instance,
            });
        }

        let output = match &self.mounted {
            Some(m) => m.instance.call_method("render", &[])?,
            None => Value::Undefined,
        };
        self.output = output.clone();
        Ok(output)
    }

    /// Output of the last render
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// Mounted instance, if any
    pub fn instance(&self) -> Option<&ObjectHandle> {
        self.mounted.as_ref().map(|m| &m.instance)
    }

    /// Run the unmount hook of the current instance
    pub fn unmount(&mut self) -> Result<(), ObjectError> {
        if let Some(m) = self.mounted.take() {
            m.instance.call_method(UNMOUNT_HOOK, &[])?;
        }
        Ok(())
    }
}
