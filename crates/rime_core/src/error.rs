//! Error types for the rime object model and freeze traversal.

use thiserror::Error;

use crate::objects::map::InstanceType;

/// All errors that can be produced by the rime core.
#[derive(Debug, Error)]
pub enum RimeError {
    /// A JavaScript TypeError was raised by the property model: writing a
    /// read-only property, redefining a non-configurable one, adding to a
    /// non-extensible object, calling a non-callable, or assigning through
    /// an accessor with no setter.
    #[error("TypeError: {0}")]
    TypeError(String),

    /// The freeze traversal discovered a composite value whose category is
    /// neither ordinary object nor callable.
    ///
    /// This is a defensive condition: it signals an object kind the
    /// traversal was not designed for and must abort the in-progress drain.
    #[error("unexpected object kind: {0:?}")]
    UnexpectedKind(InstanceType),

    /// An internal invariant was violated; should not occur in normal
    /// operation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenient `Result` alias for fallible object-model operations.
pub type RimeResult<T> = Result<T, RimeError>;
