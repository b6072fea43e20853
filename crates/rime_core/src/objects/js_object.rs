//! JavaScript objects with V8-style property storage.
//!
//! # Storage model
//!
//! A [`JsObject`] starts life in **fast mode**: named properties are backed
//! by a [`SmallVec`] of [`PropertySlot`]s whose indices mirror the [`Map`]'s
//! descriptor table.  When the number of named properties exceeds
//! [`MAX_FAST_PROPERTIES`], or a property is redefined or deleted, the
//! object is *normalised* into **slow (dictionary) mode**, where each entry
//! carries both its slot and its [`PropertyAttributes`] inside a
//! [`HashMap`].  The descriptor table remains the authoritative own-key
//! enumeration order in both modes.
//!
//! Properties may be value slots or accessor slots; accessor halves are
//! function objects and are invoked by `[[Get]]`/`[[Set]]`, never by
//! descriptor-level reflection ([`own_property_slot`][JsObject::own_property_slot]).
//!
//! Indexed properties (u32-keyed per ECMAScript, stored via `usize` for Vec
//! indexing) are always stored in a separate `Vec<JsValue>` elements backing
//! store, independent of the named-property mode.
//!
//! # Prototype chain
//!
//! Each `JsObject` optionally holds a reference-counted pointer to a
//! prototype object (`Rc<RefCell<JsObject>>`).  Property lookup, existence
//! tests, and write-through checks all walk the chain automatically.
//!
//! # Integrity
//!
//! An object tracks two integrity bits: `extensible` (new properties may be
//! added) and `frozen` (the terminal state established by
//! [`freeze`][JsObject::freeze]: non-extensible, every data slot
//! non-writable and non-configurable, every accessor slot
//! non-configurable).  Freezing fixes property *configuration* only — a
//! frozen function object remains callable and a frozen accessor remains
//! invokable.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::{RimeError, RimeResult};
use crate::objects::js_function::{JsFunction, NativeFn, SharedFunctionInfo};
use crate::objects::map::{
    InstanceType, Map, PropertyAttributes, PropertyDescriptor, PropertyKey, PropertySlot,
};
use crate::objects::value::JsValue;

/// Number of named-property slots stored directly in the object before the
/// property store overflows to a [`HashMap`] (slow / dictionary mode).
pub const MAX_FAST_PROPERTIES: usize = 8;

/// A named property entry in slow (dictionary-mode) storage.
///
/// Combines the property slot and its attribute flags so that the `HashMap`
/// key alone is sufficient to look up both.
#[derive(Debug, Clone)]
pub struct SlowProperty {
    slot: PropertySlot,
    attributes: PropertyAttributes,
}

impl SlowProperty {
    /// Creates a `SlowProperty` with the given slot and attribute flags.
    pub fn new(slot: PropertySlot, attributes: PropertyAttributes) -> Self {
        Self { slot, attributes }
    }

    /// Returns a reference to the stored slot.
    pub fn slot(&self) -> &PropertySlot {
        &self.slot
    }

    /// Returns the property attribute flags.
    pub fn attributes(&self) -> PropertyAttributes {
        self.attributes
    }
}

/// Named-property backing store: fast (descriptor-indexed flat array) or
/// slow (dictionary / `HashMap`).
enum NamedProperties {
    /// Fast mode: slots stored at the same index as the corresponding
    /// [`PropertyDescriptor`] in the object's [`Map`].  Up to
    /// [`MAX_FAST_PROPERTIES`] properties are held inline via [`SmallVec`].
    Fast(Box<SmallVec<[PropertySlot; MAX_FAST_PROPERTIES]>>),
    /// Slow (dictionary) mode: each entry carries both its slot and its
    /// [`PropertyAttributes`].  Entered on overflow, redefinition, or
    /// deletion.
    Slow(HashMap<PropertyKey, SlowProperty>),
}

/// A JavaScript object per ECMAScript §10.1.
///
/// One type covers every object kind in this crate; the [`InstanceType`]
/// stamped into the hidden class discriminates ordinary objects, arrays
/// (ordinary objects with an element store), callable function objects
/// (which carry a [`JsFunction`] payload), and embedder-opaque external
/// handles.
pub struct JsObject {
    /// Hidden class: instance type + descriptor table (enumeration order).
    map: Map,
    /// Backing store for named (string- or symbol-keyed) properties.
    named_properties: NamedProperties,
    /// Backing store for indexed (u32-keyed per ECMAScript) properties.
    elements: Vec<JsValue>,
    /// Prototype object, or `None` for base objects.
    prototype: Option<Rc<RefCell<JsObject>>>,
    /// Callable payload; present iff `InstanceType::JsFunction`.
    callable: Option<JsFunction>,
    /// New properties may be added.
    extensible: bool,
    /// Terminal immutable state; see [`freeze`][JsObject::freeze].
    frozen: bool,
}

impl JsObject {
    fn base(instance_type: InstanceType) -> Self {
        Self {
            map: Map::new(instance_type),
            named_properties: NamedProperties::Fast(Box::new(SmallVec::new())),
            elements: Vec::new(),
            prototype: None,
            callable: None,
            extensible: true,
            frozen: false,
        }
    }

    /// Creates an empty ordinary object with no prototype and no properties.
    pub fn new() -> Self {
        Self::base(InstanceType::JsObject)
    }

    /// Creates an empty object using `instance_type` as the hidden-class tag.
    pub fn new_with_instance_type(instance_type: InstanceType) -> Self {
        Self::base(instance_type)
    }

    /// Creates an empty ordinary object with the given prototype.
    pub fn with_prototype(prototype: Rc<RefCell<JsObject>>) -> Self {
        let mut object = Self::base(InstanceType::JsObject);
        object.prototype = Some(prototype);
        object
    }

    /// Creates an array object holding the given elements.
    pub fn new_array(elements: Vec<JsValue>) -> Self {
        let mut object = Self::base(InstanceType::JsArray);
        object.elements = elements;
        object
    }

    /// Creates a callable function object from shared metadata and a native
    /// callback.
    pub fn new_function(shared: SharedFunctionInfo, native: NativeFn) -> Self {
        let mut object = Self::base(InstanceType::JsFunction);
        object.callable = Some(JsFunction::new(shared, native));
        object
    }

    /// Creates an embedder-opaque external handle.
    ///
    /// External objects are neither ordinary objects nor callables; the
    /// freeze traversal refuses them.
    pub fn new_external() -> Self {
        Self::base(InstanceType::External)
    }

    /// Returns a reference to this object's hidden class ([`Map`]).
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Returns the instance type stamped into this object's hidden class.
    #[inline]
    pub fn instance_type(&self) -> InstanceType {
        self.map.instance_type()
    }

    /// Returns `true` if this object is in fast (descriptor-backed) mode.
    pub fn is_fast_mode(&self) -> bool {
        matches!(self.named_properties, NamedProperties::Fast(_))
    }

    /// Returns `true` if this object carries a callable payload.
    pub fn is_callable(&self) -> bool {
        self.callable.is_some()
    }

    /// Returns the callable payload, if any.
    pub fn callable(&self) -> Option<&JsFunction> {
        self.callable.as_ref()
    }

    /// Invokes this object's callable payload.
    ///
    /// Returns a `TypeError` for non-callable objects.  Freezing never
    /// disables invocation.
    pub fn call(&self, args: &[JsValue]) -> RimeResult<JsValue> {
        match &self.callable {
            Some(function) => function.call(args),
            None => Err(RimeError::TypeError("object is not callable".to_string())),
        }
    }

    /// Returns the prototype of this object, if any.
    pub fn prototype(&self) -> Option<&Rc<RefCell<JsObject>>> {
        self.prototype.as_ref()
    }

    /// ECMAScript §10.1.2 `[[SetPrototypeOf]]`.
    ///
    /// On a non-extensible object the prototype may only be "changed" to
    /// the value it already has (by identity); anything else is a
    /// `TypeError`.
    pub fn set_prototype(&mut self, prototype: Option<Rc<RefCell<JsObject>>>) -> RimeResult<()> {
        if !self.extensible {
            let unchanged = match (&self.prototype, &prototype) {
                (None, None) => true,
                (Some(current), Some(new)) => Rc::ptr_eq(current, new),
                _ => false,
            };
            if !unchanged {
                return Err(RimeError::TypeError(
                    "Cannot change the prototype of a non-extensible object".to_string(),
                ));
            }
        }
        self.prototype = prototype;
        Ok(())
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Normalises this object from fast to slow mode.
    ///
    /// Builds a `HashMap` from the current `Map` descriptors + slots and
    /// replaces `named_properties` with `NamedProperties::Slow`.  The
    /// descriptor table is retained: it stays the enumeration order.
    fn normalise_to_slow(&mut self) {
        let new_storage = if let NamedProperties::Fast(ref slots) = self.named_properties {
            let mut entries = HashMap::new();
            for (i, desc) in self.map.descriptors().iter().enumerate() {
                if let Some(slot) = slots.get(i) {
                    entries.insert(
                        desc.key().clone(),
                        SlowProperty::new(slot.clone(), desc.attributes()),
                    );
                }
            }
            Some(NamedProperties::Slow(entries))
        } else {
            None
        };
        if let Some(storage) = new_storage {
            self.named_properties = storage;
        }
    }

    /// Returns the descriptor index and attribute flags for `key` in fast
    /// mode.
    fn fast_index_and_attrs(&self, key: &PropertyKey) -> Option<(usize, PropertyAttributes)> {
        self.map
            .find_descriptor(key)
            .map(|i| (i, self.map.descriptors()[i].attributes()))
    }

    /// Returns the attribute flags of an own property, or `None` if the
    /// property does not exist on this object.
    fn own_property_attrs(&self, key: &PropertyKey) -> Option<PropertyAttributes> {
        match &self.named_properties {
            NamedProperties::Fast(_) => self.fast_index_and_attrs(key).map(|(_, a)| a),
            NamedProperties::Slow(entries) => entries.get(key).map(|e| e.attributes),
        }
    }

    /// Returns `true` if `key` exists anywhere in the prototype chain in a
    /// form that rejects assignment: a non-writable data property, or an
    /// accessor with no setter.
    fn is_readonly_in_chain(&self, key: &PropertyKey) -> bool {
        if let Some(slot) = self.own_property_slot(key) {
            return match slot {
                PropertySlot::Data(_) => !self
                    .own_property_attrs(key)
                    .is_some_and(|a| a.contains(PropertyAttributes::WRITABLE)),
                PropertySlot::Accessor { set, .. } => set.is_none(),
            };
        }
        if let Some(proto) = &self.prototype {
            return proto.borrow().is_readonly_in_chain(key);
        }
        false
    }

    // ── Own property operations ───────────────────────────────────────────────

    /// Returns the slot of an own property, or `None` if it does not exist.
    ///
    /// This is descriptor-level reflection: accessor halves are returned as
    /// function objects, never invoked.
    pub fn own_property_slot(&self, key: &PropertyKey) -> Option<PropertySlot> {
        match &self.named_properties {
            NamedProperties::Fast(slots) => self
                .fast_index_and_attrs(key)
                .and_then(|(i, _)| slots.get(i).cloned()),
            NamedProperties::Slow(entries) => entries.get(key).map(|e| e.slot.clone()),
        }
    }

    /// Returns the attribute flags of an own property.
    pub fn own_property_attributes(&self, key: &PropertyKey) -> Option<PropertyAttributes> {
        self.own_property_attrs(key)
    }

    /// Returns the value of an own data property, or `None` if the property
    /// does not exist or is an accessor.
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<JsValue> {
        self.own_property_slot(key)
            .and_then(|slot| slot.value().cloned())
    }

    /// Returns `true` if this object has an own property named `key`.
    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        match &self.named_properties {
            NamedProperties::Fast(_) => self.map.find_descriptor(key).is_some(),
            NamedProperties::Slow(entries) => entries.contains_key(key),
        }
    }

    /// Returns every own named key — non-enumerable and symbol-keyed
    /// included — in definition order.
    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        self.map
            .descriptors()
            .iter()
            .map(|d| d.key().clone())
            .collect()
    }

    // ── Prototype-chain traversal (ECMAScript §10.1) ──────────────────────────

    /// ECMAScript §10.1.8 `[[Get]]`.
    ///
    /// Returns the value of property `key` found on this object or anywhere
    /// in its prototype chain, or [`JsValue::Undefined`] if not found.
    /// Accessor properties invoke their getter; an accessor with no getter
    /// yields `undefined`.
    pub fn get_property(&self, key: &PropertyKey) -> RimeResult<JsValue> {
        if let Some(slot) = self.own_property_slot(key) {
            return match slot {
                PropertySlot::Data(value) => Ok(value),
                PropertySlot::Accessor {
                    get: Some(getter), ..
                } => getter.borrow().call(&[]),
                PropertySlot::Accessor { get: None, .. } => Ok(JsValue::Undefined),
            };
        }
        if let Some(proto) = &self.prototype {
            return proto.borrow().get_property(key);
        }
        Ok(JsValue::Undefined)
    }

    /// ECMAScript §10.1.7 `[[HasProperty]]`.
    ///
    /// Returns `true` if property `key` exists on this object or anywhere
    /// in its prototype chain.
    pub fn has_property(&self, key: &PropertyKey) -> bool {
        if self.has_own_property(key) {
            return true;
        }
        if let Some(proto) = &self.prototype {
            return proto.borrow().has_property(key);
        }
        false
    }

    /// ECMAScript §10.1.9 `[[Set]]`.
    ///
    /// Updates an existing own property or creates a new one with default
    /// attributes (`WRITABLE | ENUMERABLE | CONFIGURABLE`).  An own
    /// accessor property invokes its setter (the setter must not re-enter
    /// the receiver, which is mutably borrowed for the duration of the
    /// call).
    ///
    /// Returns [`RimeError::TypeError`] if:
    /// * the own property is a non-writable data property,
    /// * the own property is an accessor with no setter,
    /// * the property is not own but is found in the prototype chain in a
    ///   read-only form, or
    /// * the property does not exist and this object is not extensible.
    pub fn set_property(&mut self, key: impl Into<PropertyKey>, value: JsValue) -> RimeResult<()> {
        let key = key.into();

        if let Some(slot) = self.own_property_slot(&key) {
            match slot {
                PropertySlot::Accessor {
                    set: Some(setter), ..
                } => {
                    setter.borrow().call(&[value])?;
                    return Ok(());
                }
                PropertySlot::Accessor { set: None, .. } => {
                    return Err(RimeError::TypeError(format!(
                        "Cannot set property '{key}' which has only a getter"
                    )));
                }
                PropertySlot::Data(_) => {}
            }

            // Existing own data property.
            let attrs = self
                .own_property_attrs(&key)
                .expect("attributes exist for an existing own property");
            if !attrs.contains(PropertyAttributes::WRITABLE) {
                return Err(RimeError::TypeError(format!(
                    "Cannot assign to read-only property '{key}'"
                )));
            }
            match &mut self.named_properties {
                NamedProperties::Fast(slots) => {
                    let index = self
                        .map
                        .find_descriptor(&key)
                        .expect("descriptor exists for an existing own property");
                    slots[index] = PropertySlot::Data(value);
                }
                NamedProperties::Slow(entries) => {
                    if let Some(entry) = entries.get_mut(&key) {
                        entry.slot = PropertySlot::Data(value);
                    }
                }
            }
            return Ok(());
        }

        // Property does not exist on this object: check prototype chain.
        if let Some(proto) = &self.prototype
            && proto.borrow().is_readonly_in_chain(&key)
        {
            return Err(RimeError::TypeError(format!(
                "Cannot assign to read-only property '{key}' in prototype chain"
            )));
        }

        self.create_own_property(key, PropertySlot::Data(value), PropertyAttributes::default())
    }

    /// ECMAScript §10.1.6 `[[DefineOwnProperty]]` for data properties.
    ///
    /// Defines or redefines an own data property with explicit attribute
    /// flags; see [`define_accessor`][JsObject::define_accessor] for the
    /// accessor form.  Redefinition of an existing non-configurable
    /// property enforces:
    ///
    /// * `[[Configurable]]` cannot be changed from `false` to `true`.
    /// * `[[Enumerable]]` cannot be changed.
    /// * `[[Writable]]` cannot be changed from `false` to `true`.
    /// * the slot kind (data vs. accessor) cannot change.
    /// * a non-writable value cannot change.
    ///
    /// Returns [`RimeError::TypeError`] when a constraint is violated, or
    /// when defining a new property on a non-extensible object.
    pub fn define_own_property(
        &mut self,
        key: impl Into<PropertyKey>,
        value: JsValue,
        attributes: PropertyAttributes,
    ) -> RimeResult<()> {
        self.define_slot(key.into(), PropertySlot::Data(value), attributes)
    }

    /// `[[DefineOwnProperty]]` for accessor properties.
    ///
    /// Either accessor half may be absent.  Redefinition of a
    /// non-configurable accessor may not replace either half.
    pub fn define_accessor(
        &mut self,
        key: impl Into<PropertyKey>,
        get: Option<Rc<RefCell<JsObject>>>,
        set: Option<Rc<RefCell<JsObject>>>,
        attributes: PropertyAttributes,
    ) -> RimeResult<()> {
        self.define_slot(key.into(), PropertySlot::Accessor { get, set }, attributes)
    }

    fn define_slot(
        &mut self,
        key: PropertyKey,
        slot: PropertySlot,
        attributes: PropertyAttributes,
    ) -> RimeResult<()> {
        if let Some(existing_attrs) = self.own_property_attrs(&key) {
            let existing_slot = self
                .own_property_slot(&key)
                .expect("slot exists for an existing own property");

            // Property exists: validate the redefinition.
            if !existing_attrs.contains(PropertyAttributes::CONFIGURABLE) {
                if attributes.contains(PropertyAttributes::CONFIGURABLE) {
                    return Err(RimeError::TypeError(format!(
                        "Cannot redefine property '{key}': \
                         [[Configurable]] cannot change from false to true"
                    )));
                }
                if attributes.contains(PropertyAttributes::ENUMERABLE)
                    != existing_attrs.contains(PropertyAttributes::ENUMERABLE)
                {
                    return Err(RimeError::TypeError(format!(
                        "Cannot redefine property '{key}': \
                         [[Enumerable]] cannot change on a non-configurable property"
                    )));
                }
                if existing_slot.is_accessor() != slot.is_accessor() {
                    return Err(RimeError::TypeError(format!(
                        "Cannot redefine property '{key}': \
                         a non-configurable property cannot change between data and accessor"
                    )));
                }
                match (&existing_slot, &slot) {
                    (PropertySlot::Data(old), PropertySlot::Data(new)) => {
                        if !existing_attrs.contains(PropertyAttributes::WRITABLE) {
                            if attributes.contains(PropertyAttributes::WRITABLE) {
                                return Err(RimeError::TypeError(format!(
                                    "Cannot redefine property '{key}': \
                                     [[Writable]] cannot change from false to true"
                                )));
                            }
                            if old != new {
                                return Err(RimeError::TypeError(format!(
                                    "Cannot redefine property '{key}': \
                                     the value of a read-only property cannot change"
                                )));
                            }
                        }
                    }
                    (
                        PropertySlot::Accessor {
                            get: old_get,
                            set: old_set,
                        },
                        PropertySlot::Accessor {
                            get: new_get,
                            set: new_set,
                        },
                    ) => {
                        if !same_accessor_half(old_get, new_get)
                            || !same_accessor_half(old_set, new_set)
                        {
                            return Err(RimeError::TypeError(format!(
                                "Cannot redefine property '{key}': \
                                 a non-configurable accessor cannot be replaced"
                            )));
                        }
                    }
                    _ => unreachable!("slot kinds were checked above"),
                }
            }

            // Validation passed: update in slow mode (normalise if fast).
            if self.is_fast_mode() {
                self.normalise_to_slow();
            }
            if let NamedProperties::Slow(ref mut entries) = self.named_properties {
                entries.insert(key.clone(), SlowProperty::new(slot, attributes));
            }
            // Keep the descriptor table's flags in step.
            if let Some(index) = self.map.find_descriptor(&key) {
                self.map.descriptors_mut()[index].set_attributes(attributes);
            }
            Ok(())
        } else {
            self.create_own_property(key, slot, attributes)
        }
    }

    /// Inserts a property that is known not to exist yet.
    fn create_own_property(
        &mut self,
        key: PropertyKey,
        slot: PropertySlot,
        attributes: PropertyAttributes,
    ) -> RimeResult<()> {
        if !self.extensible {
            return Err(RimeError::TypeError(format!(
                "Cannot add property '{key}', object is not extensible"
            )));
        }

        let fast_len = match &self.named_properties {
            NamedProperties::Fast(slots) => Some(slots.len()),
            NamedProperties::Slow(_) => None,
        };
        match fast_len {
            Some(len) if len < MAX_FAST_PROPERTIES => {
                self.map
                    .add_descriptor(PropertyDescriptor::new(key, attributes));
                if let NamedProperties::Fast(ref mut slots) = self.named_properties {
                    slots.push(slot);
                }
            }
            Some(_) => {
                // Exceeded fast-mode capacity: normalise then add.
                self.normalise_to_slow();
                self.map
                    .add_descriptor(PropertyDescriptor::new(key.clone(), attributes));
                if let NamedProperties::Slow(ref mut entries) = self.named_properties {
                    entries.insert(key, SlowProperty::new(slot, attributes));
                }
            }
            None => {
                self.map
                    .add_descriptor(PropertyDescriptor::new(key.clone(), attributes));
                if let NamedProperties::Slow(ref mut entries) = self.named_properties {
                    entries.insert(key, SlowProperty::new(slot, attributes));
                }
            }
        }
        Ok(())
    }

    /// Deletes an own property (ECMAScript §10.1.10 `[[Delete]]`).
    ///
    /// Returns `Ok(true)` if the property was deleted or did not exist.
    /// Returns `Ok(false)` if the property is non-configurable and
    /// therefore cannot be deleted.
    pub fn delete_own_property(&mut self, key: impl Into<PropertyKey>) -> RimeResult<bool> {
        let key = key.into();
        match self.own_property_attrs(&key) {
            None => Ok(true),
            Some(attrs) if !attrs.contains(PropertyAttributes::CONFIGURABLE) => Ok(false),
            Some(_) => {
                if self.is_fast_mode() {
                    self.normalise_to_slow();
                }
                if let NamedProperties::Slow(ref mut entries) = self.named_properties {
                    entries.remove(&key);
                }
                self.map.remove_descriptor(&key);
                Ok(true)
            }
        }
    }

    // ── Indexed element operations ────────────────────────────────────────────

    /// Returns the element at `index`, or [`JsValue::Undefined`] if the
    /// index is out of bounds or the slot has not been set.
    pub fn get_element(&self, index: usize) -> JsValue {
        self.elements
            .get(index)
            .cloned()
            .unwrap_or(JsValue::Undefined)
    }

    /// Sets the element at `index`.
    ///
    /// If `index` is beyond the current length of the backing store, the
    /// store is extended with [`JsValue::Undefined`] hole entries — subject
    /// to the extensibility check.
    ///
    /// Returns [`RimeError::TypeError`] if the object is frozen, or if the
    /// write would grow the store on a non-extensible object.
    pub fn set_element(&mut self, index: usize, value: JsValue) -> RimeResult<()> {
        if self.frozen {
            return Err(RimeError::TypeError(format!(
                "Cannot assign to element {index} of a frozen object"
            )));
        }
        if index >= self.elements.len() {
            if !self.extensible {
                return Err(RimeError::TypeError(format!(
                    "Cannot add element {index}, object is not extensible"
                )));
            }
            self.elements.resize(index + 1, JsValue::Undefined);
        }
        self.elements[index] = value;
        Ok(())
    }

    /// Returns `true` if the element at `index` is within bounds and is not
    /// [`JsValue::Undefined`].
    ///
    /// # Note
    /// [`JsValue::Undefined`] is used for both out-of-bounds access and
    /// explicitly-stored `undefined` values, so those two cases are
    /// indistinguishable via this predicate.
    pub fn has_element(&self, index: usize) -> bool {
        self.elements
            .get(index)
            .map(|v| !v.is_undefined())
            .unwrap_or(false)
    }

    /// Removes the element at `index` by replacing it with
    /// [`JsValue::Undefined`].
    ///
    /// Returns `true` if the element existed and was removed; `false` for
    /// out-of-bounds indices, already-`undefined` slots, and frozen
    /// objects.
    pub fn delete_element(&mut self, index: usize) -> bool {
        if self.frozen {
            return false;
        }
        if index < self.elements.len() && !self.elements[index].is_undefined() {
            self.elements[index] = JsValue::Undefined;
            true
        } else {
            false
        }
    }

    /// Returns the number of element slots in the backing store (including
    /// `undefined` holes created by sparse assignments).
    pub fn elements_length(&self) -> usize {
        self.elements.len()
    }

    /// Returns the element backing store as a slice.
    pub fn elements(&self) -> &[JsValue] {
        &self.elements
    }

    // ── Integrity operations ──────────────────────────────────────────────────

    /// ECMAScript §10.1.4 `[[PreventExtensions]]`: no new properties may be
    /// added from now on.  Irreversible.
    pub fn prevent_extensions(&mut self) {
        self.extensible = false;
    }

    /// Returns `true` if new properties may still be added.
    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    /// Applies the single-object immutability transform (the per-entity
    /// step of `Object.freeze`).
    ///
    /// * blocks extension,
    /// * clears `WRITABLE` and `CONFIGURABLE` on every data slot,
    /// * clears `CONFIGURABLE` on every accessor slot (accessors remain
    ///   invokable),
    /// * fixes the element store against writes and deletes.
    ///
    /// Idempotent; freezing an already-frozen object changes nothing.
    pub fn freeze(&mut self) {
        let Self {
            map,
            named_properties,
            ..
        } = self;
        for (index, descriptor) in map.descriptors_mut().iter_mut().enumerate() {
            let is_accessor = match &*named_properties {
                NamedProperties::Fast(slots) => {
                    slots.get(index).is_some_and(PropertySlot::is_accessor)
                }
                NamedProperties::Slow(entries) => entries
                    .get(descriptor.key())
                    .is_some_and(|e| e.slot.is_accessor()),
            };
            let mut attrs = descriptor.attributes();
            attrs.remove(PropertyAttributes::CONFIGURABLE);
            if !is_accessor {
                attrs.remove(PropertyAttributes::WRITABLE);
            }
            descriptor.set_attributes(attrs);
        }
        if let NamedProperties::Slow(entries) = &mut *named_properties {
            for entry in entries.values_mut() {
                entry.attributes.remove(PropertyAttributes::CONFIGURABLE);
                if entry.slot.is_data() {
                    entry.attributes.remove(PropertyAttributes::WRITABLE);
                }
            }
        }
        self.extensible = false;
        self.frozen = true;
    }

    /// Returns `true` if this object has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

impl Default for JsObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity comparison of one accessor half.
fn same_accessor_half(
    old: &Option<Rc<RefCell<JsObject>>>,
    new: &Option<Rc<RefCell<JsObject>>>,
) -> bool {
    match (old, new) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::js_function::SharedFunctionInfo;

    fn k(name: &str) -> PropertyKey {
        PropertyKey::from(name)
    }

    fn forty_two(_args: &[JsValue]) -> RimeResult<JsValue> {
        Ok(JsValue::Smi(42))
    }

    fn swallow(_args: &[JsValue]) -> RimeResult<JsValue> {
        Ok(JsValue::Undefined)
    }

    fn function_object(name: &str, native: NativeFn) -> Rc<RefCell<JsObject>> {
        Rc::new(RefCell::new(JsObject::new_function(
            SharedFunctionInfo::new(name, 0),
            native,
        )))
    }

    // ── Property CRUD ─────────────────────────────────────────────────────────

    #[test]
    fn test_set_and_get_own_property() {
        let mut obj = JsObject::new();
        obj.set_property("x", JsValue::Smi(42)).unwrap();
        assert_eq!(obj.get_own_property(&k("x")), Some(JsValue::Smi(42)));
    }

    #[test]
    fn test_get_missing_own_property_returns_none() {
        let obj = JsObject::new();
        assert_eq!(obj.get_own_property(&k("missing")), None);
    }

    #[test]
    fn test_get_missing_property_returns_undefined() {
        let obj = JsObject::new();
        assert_eq!(obj.get_property(&k("missing")).unwrap(), JsValue::Undefined);
    }

    #[test]
    fn test_update_existing_property() {
        let mut obj = JsObject::new();
        obj.set_property("x", JsValue::Smi(1)).unwrap();
        obj.set_property("x", JsValue::Smi(2)).unwrap();
        assert_eq!(obj.get_own_property(&k("x")), Some(JsValue::Smi(2)));
    }

    #[test]
    fn test_delete_own_property() {
        let mut obj = JsObject::new();
        obj.set_property("x", JsValue::Smi(99)).unwrap();
        assert!(obj.has_own_property(&k("x")));
        assert!(obj.delete_own_property("x").unwrap());
        assert!(!obj.has_own_property(&k("x")));
    }

    #[test]
    fn test_delete_nonexistent_property_returns_true() {
        let mut obj = JsObject::new();
        assert!(obj.delete_own_property("ghost").unwrap());
    }

    #[test]
    fn test_symbol_keyed_property() {
        let mut obj = JsObject::new();
        obj.set_property(PropertyKey::symbol(7), JsValue::Smi(1))
            .unwrap();
        assert!(obj.has_own_property(&PropertyKey::symbol(7)));
        assert_eq!(
            obj.get_own_property(&PropertyKey::symbol(7)),
            Some(JsValue::Smi(1))
        );
        assert!(!obj.has_own_property(&k("7")));
    }

    // ── Key enumeration ───────────────────────────────────────────────────────

    #[test]
    fn test_own_property_keys_in_definition_order() {
        let mut obj = JsObject::new();
        obj.set_property("b", JsValue::Smi(1)).unwrap();
        obj.set_property(PropertyKey::symbol(1), JsValue::Smi(2))
            .unwrap();
        obj.set_property("a", JsValue::Smi(3)).unwrap();
        assert_eq!(
            obj.own_property_keys(),
            vec![k("b"), PropertyKey::symbol(1), k("a")]
        );
    }

    #[test]
    fn test_own_property_keys_include_non_enumerable() {
        let mut obj = JsObject::new();
        obj.define_own_property("hidden", JsValue::Smi(1), PropertyAttributes::WRITABLE)
            .unwrap();
        assert_eq!(obj.own_property_keys(), vec![k("hidden")]);
    }

    #[test]
    fn test_own_property_keys_stable_across_normalisation() {
        let mut obj = JsObject::new();
        for i in 0..=MAX_FAST_PROPERTIES {
            obj.set_property(format!("p{i}"), JsValue::Smi(i as i32))
                .unwrap();
        }
        assert!(!obj.is_fast_mode());
        let keys = obj.own_property_keys();
        assert_eq!(keys.len(), MAX_FAST_PROPERTIES + 1);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(*key, k(&format!("p{i}")));
        }
    }

    #[test]
    fn test_deleted_key_leaves_enumeration() {
        let mut obj = JsObject::new();
        obj.set_property("a", JsValue::Smi(1)).unwrap();
        obj.set_property("b", JsValue::Smi(2)).unwrap();
        obj.delete_own_property("a").unwrap();
        assert_eq!(obj.own_property_keys(), vec![k("b")]);
    }

    // ── Prototype chain ───────────────────────────────────────────────────────

    #[test]
    fn test_get_property_traverses_prototype_chain() {
        let proto = Rc::new(RefCell::new(JsObject::new()));
        proto
            .borrow_mut()
            .set_property("inherited", JsValue::Smi(7))
            .unwrap();
        let child = JsObject::with_prototype(Rc::clone(&proto));
        assert_eq!(
            child.get_property(&k("inherited")).unwrap(),
            JsValue::Smi(7)
        );
    }

    #[test]
    fn test_own_property_shadows_prototype() {
        let proto = Rc::new(RefCell::new(JsObject::new()));
        proto
            .borrow_mut()
            .set_property("x", JsValue::Smi(1))
            .unwrap();
        let mut child = JsObject::with_prototype(Rc::clone(&proto));
        child.set_property("x", JsValue::Smi(99)).unwrap();
        assert_eq!(child.get_property(&k("x")).unwrap(), JsValue::Smi(99));
        assert_eq!(
            proto.borrow().get_property(&k("x")).unwrap(),
            JsValue::Smi(1)
        );
    }

    #[test]
    fn test_has_property_traverses_chain() {
        let proto = Rc::new(RefCell::new(JsObject::new()));
        proto
            .borrow_mut()
            .set_property("y", JsValue::Boolean(true))
            .unwrap();
        let child = JsObject::with_prototype(Rc::clone(&proto));
        assert!(!child.has_own_property(&k("y")));
        assert!(child.has_property(&k("y")));
    }

    #[test]
    fn test_multi_level_prototype_chain() {
        let grandparent = Rc::new(RefCell::new(JsObject::new()));
        grandparent
            .borrow_mut()
            .set_property("gp", JsValue::Smi(100))
            .unwrap();
        let parent = Rc::new(RefCell::new(JsObject::with_prototype(Rc::clone(
            &grandparent,
        ))));
        let child = JsObject::with_prototype(Rc::clone(&parent));
        assert_eq!(child.get_property(&k("gp")).unwrap(), JsValue::Smi(100));
    }

    #[test]
    fn test_write_through_readonly_chain_is_type_error() {
        let proto = Rc::new(RefCell::new(JsObject::new()));
        proto
            .borrow_mut()
            .define_own_property("ro", JsValue::Smi(1), PropertyAttributes::ENUMERABLE)
            .unwrap();
        let mut child = JsObject::with_prototype(Rc::clone(&proto));
        let err = child.set_property("ro", JsValue::Smi(2)).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    // ── Map transitions ───────────────────────────────────────────────────────

    #[test]
    fn test_fast_to_slow_transition_on_overflow() {
        let mut obj = JsObject::new();
        for i in 0..MAX_FAST_PROPERTIES {
            obj.set_property(format!("p{i}"), JsValue::Smi(i as i32))
                .unwrap();
        }
        assert!(obj.is_fast_mode(), "should still be fast at capacity");
        obj.set_property("overflow", JsValue::Smi(99)).unwrap();
        assert!(
            !obj.is_fast_mode(),
            "should be slow after exceeding MAX_FAST_PROPERTIES"
        );
        assert_eq!(obj.get_property(&k("overflow")).unwrap(), JsValue::Smi(99));
    }

    #[test]
    fn test_slow_mode_properties_are_accessible() {
        let mut obj = JsObject::new();
        for i in 0..=MAX_FAST_PROPERTIES {
            obj.set_property(format!("p{i}"), JsValue::Smi(i as i32))
                .unwrap();
        }
        assert!(!obj.is_fast_mode());
        assert_eq!(obj.get_property(&k("p0")).unwrap(), JsValue::Smi(0));
        assert_eq!(obj.get_property(&k("p7")).unwrap(), JsValue::Smi(7));
    }

    #[test]
    fn test_update_slow_mode_property() {
        let mut obj = JsObject::new();
        for i in 0..=MAX_FAST_PROPERTIES {
            obj.set_property(format!("p{i}"), JsValue::Smi(i as i32))
                .unwrap();
        }
        assert!(!obj.is_fast_mode());
        obj.set_property("p0", JsValue::Smi(999)).unwrap();
        assert_eq!(obj.get_property(&k("p0")).unwrap(), JsValue::Smi(999));
    }

    // ── Non-writable / non-configurable ──────────────────────────────────────

    #[test]
    fn test_write_to_readonly_property_is_type_error() {
        let mut obj = JsObject::new();
        obj.define_own_property(
            "ro",
            JsValue::Smi(1),
            PropertyAttributes::ENUMERABLE | PropertyAttributes::CONFIGURABLE,
        )
        .unwrap();
        let err = obj.set_property("ro", JsValue::Smi(2)).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    #[test]
    fn test_define_non_configurable_cannot_become_configurable() {
        let mut obj = JsObject::new();
        obj.define_own_property(
            "locked",
            JsValue::Smi(1),
            PropertyAttributes::WRITABLE | PropertyAttributes::ENUMERABLE,
        )
        .unwrap();
        let err = obj
            .define_own_property("locked", JsValue::Smi(1), PropertyAttributes::default())
            .unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    #[test]
    fn test_define_non_configurable_enumerable_cannot_change() {
        let mut obj = JsObject::new();
        obj.define_own_property("p", JsValue::Smi(0), PropertyAttributes::WRITABLE)
            .unwrap();
        let err = obj
            .define_own_property(
                "p",
                JsValue::Smi(0),
                PropertyAttributes::WRITABLE | PropertyAttributes::ENUMERABLE,
            )
            .unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    #[test]
    fn test_define_non_configurable_writable_false_to_true_rejected() {
        let mut obj = JsObject::new();
        obj.define_own_property("nw", JsValue::Smi(0), PropertyAttributes::empty())
            .unwrap();
        let err = obj
            .define_own_property("nw", JsValue::Smi(0), PropertyAttributes::WRITABLE)
            .unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    #[test]
    fn test_define_readonly_value_cannot_change() {
        let mut obj = JsObject::new();
        obj.define_own_property("v", JsValue::Smi(1), PropertyAttributes::empty())
            .unwrap();
        let err = obj
            .define_own_property("v", JsValue::Smi(2), PropertyAttributes::empty())
            .unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
        // Redefining with the identical value is a no-op, not an error.
        obj.define_own_property("v", JsValue::Smi(1), PropertyAttributes::empty())
            .unwrap();
    }

    #[test]
    fn test_define_writable_true_to_false_allowed() {
        let mut obj = JsObject::new();
        obj.define_own_property(
            "p",
            JsValue::Smi(1),
            PropertyAttributes::WRITABLE | PropertyAttributes::CONFIGURABLE,
        )
        .unwrap();
        obj.define_own_property("p", JsValue::Smi(1), PropertyAttributes::CONFIGURABLE)
            .unwrap();
        let err = obj.set_property("p", JsValue::Smi(2)).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    #[test]
    fn test_delete_non_configurable_property_returns_false() {
        let mut obj = JsObject::new();
        obj.define_own_property("nc", JsValue::Smi(0), PropertyAttributes::empty())
            .unwrap();
        assert!(!obj.delete_own_property("nc").unwrap());
        assert!(obj.has_own_property(&k("nc")));
    }

    // ── Accessor properties ───────────────────────────────────────────────────

    #[test]
    fn test_get_through_accessor_invokes_getter() {
        let mut obj = JsObject::new();
        obj.define_accessor(
            "computed",
            Some(function_object("get_computed", forty_two)),
            None,
            PropertyAttributes::default(),
        )
        .unwrap();
        assert_eq!(obj.get_property(&k("computed")).unwrap(), JsValue::Smi(42));
    }

    #[test]
    fn test_get_accessor_without_getter_is_undefined() {
        let mut obj = JsObject::new();
        obj.define_accessor(
            "wo",
            None,
            Some(function_object("set_wo", swallow)),
            PropertyAttributes::default(),
        )
        .unwrap();
        assert_eq!(obj.get_property(&k("wo")).unwrap(), JsValue::Undefined);
    }

    #[test]
    fn test_set_through_accessor_without_setter_is_type_error() {
        let mut obj = JsObject::new();
        obj.define_accessor(
            "ro",
            Some(function_object("get_ro", forty_two)),
            None,
            PropertyAttributes::default(),
        )
        .unwrap();
        let err = obj.set_property("ro", JsValue::Smi(1)).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    #[test]
    fn test_set_through_accessor_invokes_setter() {
        let mut obj = JsObject::new();
        obj.define_accessor(
            "sink",
            None,
            Some(function_object("set_sink", swallow)),
            PropertyAttributes::default(),
        )
        .unwrap();
        obj.set_property("sink", JsValue::Smi(5)).unwrap();
        // The slot stays an accessor; nothing was stored.
        assert!(
            obj.own_property_slot(&k("sink"))
                .is_some_and(|s| s.is_accessor())
        );
    }

    #[test]
    fn test_own_property_slot_does_not_invoke_getter() {
        let mut obj = JsObject::new();
        let getter = function_object("get_x", forty_two);
        obj.define_accessor(
            "x",
            Some(Rc::clone(&getter)),
            None,
            PropertyAttributes::default(),
        )
        .unwrap();
        match obj.own_property_slot(&k("x")) {
            Some(PropertySlot::Accessor { get: Some(g), set }) => {
                assert!(Rc::ptr_eq(&g, &getter));
                assert!(set.is_none());
            }
            other => panic!("expected accessor slot, got {other:?}"),
        }
    }

    #[test]
    fn test_non_configurable_accessor_cannot_be_replaced() {
        let mut obj = JsObject::new();
        let getter = function_object("get_x", forty_two);
        obj.define_accessor(
            "x",
            Some(Rc::clone(&getter)),
            None,
            PropertyAttributes::ENUMERABLE,
        )
        .unwrap();
        let err = obj
            .define_accessor(
                "x",
                Some(function_object("get_x2", forty_two)),
                None,
                PropertyAttributes::ENUMERABLE,
            )
            .unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
        // Re-defining with the identical halves is a no-op, not an error.
        obj.define_accessor("x", Some(getter), None, PropertyAttributes::ENUMERABLE)
            .unwrap();
    }

    // ── Extensibility ─────────────────────────────────────────────────────────

    #[test]
    fn test_prevent_extensions_blocks_new_properties() {
        let mut obj = JsObject::new();
        obj.set_property("existing", JsValue::Smi(1)).unwrap();
        obj.prevent_extensions();
        assert!(!obj.is_extensible());
        let err = obj.set_property("fresh", JsValue::Smi(2)).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
        // Existing writable properties can still change.
        obj.set_property("existing", JsValue::Smi(3)).unwrap();
    }

    #[test]
    fn test_non_extensible_prototype_is_pinned() {
        let proto_a = Rc::new(RefCell::new(JsObject::new()));
        let proto_b = Rc::new(RefCell::new(JsObject::new()));
        let mut obj = JsObject::with_prototype(Rc::clone(&proto_a));
        obj.prevent_extensions();
        // Same prototype: allowed.
        obj.set_prototype(Some(Rc::clone(&proto_a))).unwrap();
        // Different prototype: rejected.
        let err = obj.set_prototype(Some(proto_b)).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
        let err = obj.set_prototype(None).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    // ── Freeze transform ──────────────────────────────────────────────────────

    #[test]
    fn test_freeze_blocks_writes_adds_and_deletes() {
        let mut obj = JsObject::new();
        obj.set_property("x", JsValue::Smi(1)).unwrap();
        obj.freeze();
        assert!(obj.is_frozen());
        assert!(!obj.is_extensible());
        assert!(matches!(
            obj.set_property("x", JsValue::Smi(2)),
            Err(RimeError::TypeError(_))
        ));
        assert!(matches!(
            obj.set_property("fresh", JsValue::Smi(2)),
            Err(RimeError::TypeError(_))
        ));
        assert!(!obj.delete_own_property("x").unwrap());
        assert_eq!(obj.get_own_property(&k("x")), Some(JsValue::Smi(1)));
    }

    #[test]
    fn test_freeze_clears_attributes_in_slow_mode() {
        let mut obj = JsObject::new();
        for i in 0..=MAX_FAST_PROPERTIES {
            obj.set_property(format!("p{i}"), JsValue::Smi(i as i32))
                .unwrap();
        }
        assert!(!obj.is_fast_mode());
        obj.freeze();
        for key in obj.own_property_keys() {
            let attrs = obj.own_property_attributes(&key).unwrap();
            assert!(!attrs.contains(PropertyAttributes::WRITABLE));
            assert!(!attrs.contains(PropertyAttributes::CONFIGURABLE));
        }
    }

    #[test]
    fn test_freeze_keeps_accessor_invokable() {
        let mut obj = JsObject::new();
        obj.define_accessor(
            "live",
            Some(function_object("get_live", forty_two)),
            None,
            PropertyAttributes::default(),
        )
        .unwrap();
        obj.freeze();
        let attrs = obj.own_property_attributes(&k("live")).unwrap();
        assert!(!attrs.contains(PropertyAttributes::CONFIGURABLE));
        assert_eq!(obj.get_property(&k("live")).unwrap(), JsValue::Smi(42));
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let mut obj = JsObject::new();
        obj.set_property("x", JsValue::Smi(1)).unwrap();
        obj.freeze();
        obj.freeze();
        assert!(obj.is_frozen());
        assert_eq!(obj.get_own_property(&k("x")), Some(JsValue::Smi(1)));
    }

    #[test]
    fn test_frozen_function_still_callable() {
        let mut f = JsObject::new_function(SharedFunctionInfo::new("f", 0), forty_two);
        f.freeze();
        assert_eq!(f.call(&[]).unwrap(), JsValue::Smi(42));
    }

    // ── Indexed element operations ────────────────────────────────────────────

    #[test]
    fn test_set_and_get_element() {
        let mut obj = JsObject::new();
        obj.set_element(0, JsValue::Smi(10)).unwrap();
        obj.set_element(1, JsValue::Smi(20)).unwrap();
        assert_eq!(obj.get_element(0), JsValue::Smi(10));
        assert_eq!(obj.get_element(1), JsValue::Smi(20));
    }

    #[test]
    fn test_get_element_out_of_bounds_returns_undefined() {
        let obj = JsObject::new();
        assert_eq!(obj.get_element(100), JsValue::Undefined);
    }

    #[test]
    fn test_set_element_beyond_length_extends_with_holes() {
        let mut obj = JsObject::new();
        obj.set_element(5, JsValue::Smi(42)).unwrap();
        assert_eq!(obj.elements_length(), 6);
        assert_eq!(obj.get_element(0), JsValue::Undefined);
        assert_eq!(obj.get_element(5), JsValue::Smi(42));
    }

    #[test]
    fn test_delete_element() {
        let mut obj = JsObject::new();
        obj.set_element(0, JsValue::Smi(5)).unwrap();
        assert!(obj.has_element(0));
        assert!(obj.delete_element(0));
        assert!(!obj.has_element(0));
    }

    #[test]
    fn test_frozen_elements_reject_writes_and_deletes() {
        let mut obj = JsObject::new_array(vec![JsValue::Smi(1), JsValue::Smi(2)]);
        obj.freeze();
        assert!(matches!(
            obj.set_element(0, JsValue::Smi(9)),
            Err(RimeError::TypeError(_))
        ));
        assert!(!obj.delete_element(0));
        assert_eq!(obj.get_element(0), JsValue::Smi(1));
    }

    #[test]
    fn test_non_extensible_elements_cannot_grow() {
        let mut obj = JsObject::new_array(vec![JsValue::Smi(1)]);
        obj.prevent_extensions();
        // In-bounds write is fine while not frozen.
        obj.set_element(0, JsValue::Smi(2)).unwrap();
        let err = obj.set_element(5, JsValue::Smi(3)).unwrap_err();
        assert!(matches!(err, RimeError::TypeError(_)));
    }

    // ── Constructors / kinds ──────────────────────────────────────────────────

    #[test]
    fn test_new_object_is_fast_extensible_unfrozen() {
        let obj = JsObject::new();
        assert!(obj.is_fast_mode());
        assert!(obj.is_extensible());
        assert!(!obj.is_frozen());
        assert_eq!(obj.instance_type(), InstanceType::JsObject);
    }

    #[test]
    fn test_array_constructor_tags_and_stores() {
        let arr = JsObject::new_array(vec![JsValue::Smi(1), JsValue::Smi(2), JsValue::Smi(3)]);
        assert_eq!(arr.instance_type(), InstanceType::JsArray);
        assert_eq!(arr.elements_length(), 3);
        assert!(arr.instance_type().is_ordinary());
    }

    #[test]
    fn test_function_constructor_is_callable() {
        let f = JsObject::new_function(SharedFunctionInfo::new("f", 0), forty_two);
        assert_eq!(f.instance_type(), InstanceType::JsFunction);
        assert!(f.is_callable());
        assert_eq!(f.call(&[]).unwrap(), JsValue::Smi(42));
    }

    #[test]
    fn test_plain_object_is_not_callable() {
        let obj = JsObject::new();
        assert!(!obj.is_callable());
        assert!(matches!(obj.call(&[]), Err(RimeError::TypeError(_))));
    }

    #[test]
    fn test_external_is_neither_ordinary_nor_callable() {
        let ext = JsObject::new_external();
        assert_eq!(ext.instance_type(), InstanceType::External);
        assert!(!ext.instance_type().is_ordinary());
        assert!(!ext.is_callable());
    }
}
