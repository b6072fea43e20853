//! The hidden class ([`Map`]), instance-type tag, and property model.
//!
//! A [`Map`] records an object's [`InstanceType`] together with its
//! descriptor table: one [`PropertyDescriptor`] per own named property, in
//! definition order.  The descriptor table is the authoritative own-key
//! enumeration order for the object in **both** storage modes (fast and
//! slow), so enumeration is stable, omission-free, and duplicate-free even
//! after the property store has been normalised to a dictionary.
//!
//! Properties themselves are [`PropertySlot`]s: either a data slot holding
//! one [`JsValue`], or an accessor slot holding independent getter/setter
//! function objects, either of which may be absent.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::objects::js_object::JsObject;
use crate::objects::value::JsValue;

/// Identifies the concrete kind of a heap object.
///
/// Each variant corresponds to a distinct object shape and is stored
/// directly in the [`Map`] for O(1) lookup.  Values are intentionally left
/// with gaps to mirror the V8 numbering convention and leave room for
/// future additions.
#[repr(u16)]
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InstanceType {
    /// An ordinary object.
    JsObject = 0x0400,
    /// An array: an ordinary object with an indexed element store.
    JsArray = 0x0420,
    /// A callable function object.
    JsFunction = 0x0440,
    /// An embedder-opaque external handle.
    ///
    /// External objects carry host data the engine cannot introspect; they
    /// are neither ordinary objects nor callables.
    External = 0x0500,
}

impl InstanceType {
    /// Returns `true` for kinds whose properties follow ordinary-object
    /// semantics ([`JsObject`][InstanceType::JsObject] and
    /// [`JsArray`][InstanceType::JsArray]).
    #[inline]
    pub fn is_ordinary(self) -> bool {
        matches!(self, Self::JsObject | Self::JsArray)
    }

    /// Returns `true` for callable kinds.
    #[inline]
    pub fn is_callable(self) -> bool {
        matches!(self, Self::JsFunction)
    }
}

bitflags! {
    /// Attribute flags of an own property.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PropertyAttributes: u8 {
        /// The property's value may be reassigned.
        const WRITABLE = 1 << 0;
        /// The property appears in enumerable-only listings.
        const ENUMERABLE = 1 << 1;
        /// The property may be deleted or redefined.
        const CONFIGURABLE = 1 << 2;
    }
}

impl Default for PropertyAttributes {
    /// The default for properties created by plain assignment:
    /// `WRITABLE | ENUMERABLE | CONFIGURABLE`.
    fn default() -> Self {
        Self::WRITABLE | Self::ENUMERABLE | Self::CONFIGURABLE
    }
}

/// An own-property key: a string name or a symbol.
///
/// Symbol-keyed properties participate in storage and enumeration exactly
/// like string-keyed ones; a symbol's identity is its opaque 64-bit
/// descriptor, matching [`JsValue::Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// A string-named property.
    String(String),
    /// A symbol-keyed property, identified by its opaque descriptor.
    Symbol(u64),
}

impl PropertyKey {
    /// Creates a symbol key from an opaque symbol descriptor.
    pub fn symbol(id: u64) -> Self {
        Self::Symbol(id)
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        Self::String(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        Self::String(name)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(name) => f.write_str(name),
            Self::Symbol(id) => write!(f, "Symbol({id})"),
        }
    }
}

/// The storage slot of one own property.
#[derive(Clone)]
pub enum PropertySlot {
    /// A value slot holding one value.
    Data(JsValue),
    /// An accessor slot holding independent getter and setter function
    /// objects, either of which may be absent.
    Accessor {
        /// The getter function object, if present.
        get: Option<Rc<RefCell<JsObject>>>,
        /// The setter function object, if present.
        set: Option<Rc<RefCell<JsObject>>>,
    },
}

impl PropertySlot {
    /// Returns `true` if this is a data slot.
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Returns `true` if this is an accessor slot.
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    /// Returns the stored value of a data slot, or `None` for accessors.
    pub fn value(&self) -> Option<&JsValue> {
        match self {
            Self::Data(value) => Some(value),
            Self::Accessor { .. } => None,
        }
    }
}

// Accessor halves hold object references; a derived Debug would recurse
// through the graph, so print presence only.
impl fmt::Debug for PropertySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Self::Accessor { get, set } => f
                .debug_struct("Accessor")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .finish(),
        }
    }
}

/// A descriptor-table entry: the key and attribute flags of one own
/// property.
///
/// In fast mode the descriptor's index doubles as the index of the
/// property's slot in the object's inline store, and `attributes` is the
/// authoritative flag word.  In slow mode the dictionary entry carries the
/// authoritative flags and the descriptor contributes key identity and
/// enumeration order only.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    key: PropertyKey,
    attributes: PropertyAttributes,
}

impl PropertyDescriptor {
    /// Creates a descriptor for `key` with the given attribute flags.
    pub fn new(key: impl Into<PropertyKey>, attributes: PropertyAttributes) -> Self {
        Self {
            key: key.into(),
            attributes,
        }
    }

    /// Returns the property key.
    pub fn key(&self) -> &PropertyKey {
        &self.key
    }

    /// Returns the property attribute flags.
    pub fn attributes(&self) -> PropertyAttributes {
        self.attributes
    }

    pub(crate) fn set_attributes(&mut self, attributes: PropertyAttributes) {
        self.attributes = attributes;
    }
}

/// The hidden class (shape descriptor) of a heap object.
///
/// Records the object's [`InstanceType`] and its descriptor table.  The
/// table lists every own named key in definition order; deletions remove
/// their entry, redefinitions keep the original position.
pub struct Map {
    /// The concrete object kind described by this `Map`.
    instance_type: InstanceType,
    /// Own named properties in definition order.
    descriptors: Vec<PropertyDescriptor>,
}

impl Map {
    /// Creates a `Map` with the given instance type and no descriptors.
    pub fn new(instance_type: InstanceType) -> Self {
        Self {
            instance_type,
            descriptors: Vec::new(),
        }
    }

    /// Returns the instance type of objects described by this `Map`.
    #[inline]
    pub fn instance_type(&self) -> InstanceType {
        self.instance_type
    }

    /// Returns the descriptor table in definition order.
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    pub(crate) fn descriptors_mut(&mut self) -> &mut [PropertyDescriptor] {
        &mut self.descriptors
    }

    /// Appends a descriptor for a newly defined property.
    pub fn add_descriptor(&mut self, descriptor: PropertyDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Returns the table index of `key`, or `None` if not present.
    pub fn find_descriptor(&self, key: &PropertyKey) -> Option<usize> {
        self.descriptors.iter().position(|d| d.key() == key)
    }

    /// Removes the descriptor for `key`, preserving the relative order of
    /// the remaining entries.  Returns `true` if an entry was removed.
    pub fn remove_descriptor(&mut self, key: &PropertyKey) -> bool {
        match self.find_descriptor(key) {
            Some(index) => {
                self.descriptors.remove(index);
                true
            }
            None => false,
        }
    }
}
