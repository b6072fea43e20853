//! JavaScript function objects.
//!
//! This module provides two closely related types:
//!
//! * [`SharedFunctionInfo`] — the **static** metadata about a function that
//!   is shared across all function objects created from the same source:
//!   the function's name and its formal-parameter count.
//!
//! * [`JsFunction`] — the callable payload of a function object: shared
//!   metadata paired with a host-side (Rust) callback.
//!
//! Every callable in this crate is a native callback (the [`NativeFn`]
//! type).  Accessor getters and setters are function objects carrying a
//! `JsFunction` payload; freezing a function object fixes its property
//! configuration but never disables invocation, so a frozen getter may
//! still compute and return a different value on each call.

use std::rc::Rc;

use crate::error::RimeResult;
use crate::objects::value::JsValue;

/// Shared metadata for a JavaScript function.
///
/// A single `SharedFunctionInfo` instance is created once per function and
/// is shared by every function object created from it:
///
/// * `name` — the function's declared name, or an empty string for
///   anonymous functions.
/// * `param_count` — the number of formal parameters.
#[derive(Debug, Clone)]
pub struct SharedFunctionInfo {
    name: String,
    param_count: u32,
}

impl SharedFunctionInfo {
    /// Creates a new `SharedFunctionInfo`.
    ///
    /// # Parameters
    /// * `name` — the function's source name (empty string for anonymous).
    /// * `param_count` — the number of formal parameters.
    pub fn new(name: impl Into<String>, param_count: u32) -> Self {
        Self {
            name: name.into(),
            param_count,
        }
    }

    /// Returns the function's declared name.
    ///
    /// Anonymous functions return an empty string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the formal parameter count declared in the source.
    pub fn param_count(&self) -> u32 {
        self.param_count
    }
}

/// A host-side (Rust) callback that implements a function's behaviour.
///
/// The callback receives a slice of [`JsValue`] arguments and returns a
/// [`RimeResult`]`<`[`JsValue`]`>`.  Receiver binding is not modelled:
/// callbacks see their positional arguments only.
pub type NativeFn = fn(&[JsValue]) -> RimeResult<JsValue>;

/// The callable payload of a function object.
///
/// Pairs a reference-counted [`SharedFunctionInfo`] — the static metadata
/// shared by every function object created from the same source — with the
/// native callback implementing the function's behaviour.
///
/// # Example — wrapping a native function
///
/// ```rust
/// use rime_core::objects::js_function::{JsFunction, SharedFunctionInfo};
/// use rime_core::objects::value::JsValue;
///
/// fn add(args: &[JsValue]) -> rime_core::error::RimeResult<JsValue> {
///     let a = args.first().cloned().unwrap_or(JsValue::Smi(0));
///     let b = args.get(1).cloned().unwrap_or(JsValue::Smi(0));
///     match (a, b) {
///         (JsValue::Smi(x), JsValue::Smi(y)) => Ok(JsValue::Smi(x + y)),
///         _ => Ok(JsValue::Undefined),
///     }
/// }
///
/// let f = JsFunction::new(SharedFunctionInfo::new("add", 2), add);
/// assert_eq!(f.name(), "add");
/// assert_eq!(f.param_count(), 2);
/// ```
#[derive(Clone)]
pub struct JsFunction {
    /// Shared static metadata (name, param count).
    shared: Rc<SharedFunctionInfo>,
    /// The native callback implementing this function.
    native: NativeFn,
}

impl JsFunction {
    /// Creates a function from shared metadata and a native callback.
    pub fn new(shared: SharedFunctionInfo, native: NativeFn) -> Self {
        Self {
            shared: Rc::new(shared),
            native,
        }
    }

    /// Returns the function's declared name.
    pub fn name(&self) -> &str {
        self.shared.name()
    }

    /// Returns the formal parameter count.
    pub fn param_count(&self) -> u32 {
        self.shared.param_count()
    }

    /// Returns a reference to the shared function metadata.
    pub fn shared_info(&self) -> &SharedFunctionInfo {
        &self.shared
    }

    /// Invokes the native callback with the given positional arguments.
    pub fn call(&self, args: &[JsValue]) -> RimeResult<JsValue> {
        (self.native)(args)
    }
}

// Implement Debug manually because fn pointers don't implement Debug.
impl std::fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsFunction")
            .field("shared", &self.shared)
            .field("native", &"<fn>")
            .finish()
    }
}
