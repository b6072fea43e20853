//! Transitive deep freeze of object graphs.
//!
//! [`deep_freeze`] makes a root value and every object transitively
//! reachable from it — through own properties (named and indexed),
//! accessor getter/setter functions, and prototype links — permanently
//! immutable, exactly once per object, even when invoked repeatedly or
//! re-entrantly on overlapping graphs.  This is the crate's security
//! primitive: a frozen graph is a read-only trust boundary that nested
//! code can observe but not tamper with.
//!
//! Two pieces of state drive the traversal:
//!
//! * a [`FreezeRegistry`] — the durable record of every object this
//!   algorithm has already frozen.  Consulting it makes repeated calls
//!   cheap no-ops and keeps the traversal from revisiting work.  Entries
//!   are weak: registration never keeps an otherwise-unreachable object
//!   alive.
//! * a per-invocation worklist — the queue of objects discovered but not
//!   yet frozen.  Objects found *during* the drain (children of a frozen
//!   object, prototype links) join the same queue and are processed in
//!   the same pass: the drain is a fixed-point computation over a growing
//!   queue, not an iteration over a snapshot.
//!
//! Errors are fail-fast.  A caller that receives one must assume the
//! graph is in an unspecified, possibly partially-frozen state; objects
//! frozen before the error remain durably recorded.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use crate::error::{RimeError, RimeResult};
use crate::objects::js_object::JsObject;
use crate::objects::map::PropertySlot;
use crate::objects::value::JsValue;

thread_local! {
    /// The default registry behind [`deep_freeze`].  Object graphs are
    /// `Rc`-based and therefore thread-confined, so per-thread state is
    /// the whole view any caller on this thread can observe.
    static REGISTRY: RefCell<FreezeRegistry> = RefCell::new(FreezeRegistry::new());
}

/// Dead weak entries are swept once the registry grows past this many
/// entries, and thereafter whenever it doubles again.
const MIN_PRUNE_THRESHOLD: usize = 64;

/// The identity of a heap object: its allocation address.
///
/// Addresses are only compared while a strong reference pins the
/// allocation, or together with a [`Weak`] upgrade that proves the
/// original entrant is still alive — either rules out confusion with a
/// recycled address.
fn identity(object: &Rc<RefCell<JsObject>>) -> usize {
    Rc::as_ptr(object) as usize
}

/// Weak-membership record of every object frozen by this algorithm.
///
/// Supports exactly two operations: insert (internal to the traversal)
/// and membership test.  Entries are never removed by callers and the
/// contents cannot be enumerated.  Each entry holds only a [`Weak`]
/// handle, so registration does not keep an otherwise-unreachable object
/// alive; dead entries are pruned opportunistically as the registry
/// grows.
pub struct FreezeRegistry {
    entries: HashMap<usize, Weak<RefCell<JsObject>>>,
    prune_at: usize,
}

impl FreezeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            prune_at: MIN_PRUNE_THRESHOLD,
        }
    }

    /// Returns `true` if `object` has been frozen by this algorithm.
    ///
    /// The stored weak handle must upgrade to the same allocation; a stale
    /// entry whose address has been recycled by a later allocation never
    /// reports a false positive.
    pub fn contains(&self, object: &Rc<RefCell<JsObject>>) -> bool {
        self.entries
            .get(&identity(object))
            .is_some_and(|weak| weak.upgrade().is_some_and(|live| Rc::ptr_eq(&live, object)))
    }

    /// Records `object` as frozen.
    fn record(&mut self, object: &Rc<RefCell<JsObject>>) {
        if self.entries.len() >= self.prune_at {
            self.entries.retain(|_, weak| weak.strong_count() > 0);
            self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_THRESHOLD);
        }
        self.entries.insert(identity(object), Rc::downgrade(object));
    }
}

impl Default for FreezeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The discovery worklist of one top-level invocation.
///
/// `queue` holds a strong reference to every object ever enqueued, so all
/// addresses in `seen` stay pinned (and therefore unique) until the drain
/// completes.  `seen` is never shrunk during the invocation: an object is
/// enqueued at most once per call, which is what bounds the traversal on
/// cyclic graphs.
struct Worklist {
    queue: Vec<Rc<RefCell<JsObject>>>,
    seen: HashSet<usize>,
}

impl Worklist {
    fn new() -> Self {
        Self {
            queue: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn contains(&self, object: &Rc<RefCell<JsObject>>) -> bool {
        self.seen.contains(&identity(object))
    }

    fn push(&mut self, object: Rc<RefCell<JsObject>>) {
        self.seen.insert(identity(&object));
        self.queue.push(object);
    }
}

/// Queues `candidate` for freezing, subject to filtering.
///
/// * Primitives cannot be frozen and are never queued.
/// * A composite whose kind is neither ordinary object nor callable is
///   refused with [`RimeError::UnexpectedKind`] — the environment holds a
///   value category this traversal was not designed for, and silently
///   skipping it would leave a mutable hole in the frozen graph.
/// * An object already frozen, or already enqueued during this
///   invocation, is skipped; this check is what terminates the traversal
///   on cycles and on diamond-shaped sharing.
fn discover(
    registry: &FreezeRegistry,
    worklist: &mut Worklist,
    candidate: &JsValue,
) -> RimeResult<()> {
    let Some(object) = candidate.as_object() else {
        return Ok(());
    };
    let instance_type = object.borrow().instance_type();
    if !instance_type.is_ordinary() && !instance_type.is_callable() {
        return Err(RimeError::UnexpectedKind(instance_type));
    }
    if registry.contains(object) || worklist.contains(object) {
        return Ok(());
    }
    worklist.push(Rc::clone(object));
    Ok(())
}

/// Freezes one object and discovers its children.
///
/// Every own property is enumerated — non-enumerable and symbol-keyed
/// included, plus the indexed element store.  Value slots discover their
/// value; accessor slots discover their getter and setter independently
/// (absent halves are skipped, accessors are never invoked).  The object
/// is then made immutable and recorded — recording strictly after the
/// transform, so a failed freeze is never mistaken for a completed one.
fn freeze_one(
    registry: &mut FreezeRegistry,
    worklist: &mut Worklist,
    object: &Rc<RefCell<JsObject>>,
) -> RimeResult<()> {
    {
        let guard = object.borrow();
        for key in guard.own_property_keys() {
            match guard.own_property_slot(&key) {
                Some(PropertySlot::Data(value)) => discover(registry, worklist, &value)?,
                Some(PropertySlot::Accessor { get, set }) => {
                    if let Some(getter) = get {
                        discover(registry, worklist, &JsValue::Object(getter))?;
                    }
                    if let Some(setter) = set {
                        discover(registry, worklist, &JsValue::Object(setter))?;
                    }
                }
                None => {}
            }
        }
        for element in guard.elements() {
            discover(registry, worklist, element)?;
        }
    }
    object.borrow_mut().freeze();
    registry.record(object);
    Ok(())
}

/// Freezes `root` and its transitive closure against `registry`.
///
/// Identical to [`deep_freeze`] but with explicit registry state, for
/// embedders that scope frozen-ness to something narrower than the
/// thread (and for tests).
pub fn deep_freeze_with(registry: &mut FreezeRegistry, root: &JsValue) -> RimeResult<()> {
    if let Some(object) = root.as_object()
        && registry.contains(object)
    {
        return Ok(());
    }

    let mut worklist = Worklist::new();
    discover(registry, &mut worklist, root)?;

    // Fixed-point drain: freeze_one and the prototype step push onto the
    // same queue this loop is consuming.
    let mut cursor = 0;
    while cursor < worklist.queue.len() {
        let object = Rc::clone(&worklist.queue[cursor]);
        cursor += 1;
        freeze_one(registry, &mut worklist, &object)?;
        let prototype = object.borrow().prototype().cloned();
        if let Some(prototype) = prototype {
            discover(registry, &mut worklist, &JsValue::Object(prototype))?;
        }
    }
    Ok(())
}

/// Makes `root` and everything transitively reachable from it permanently
/// immutable.
///
/// Reachability follows own properties (named and indexed), accessor
/// getter/setter functions, and prototype links.  Primitive roots are
/// no-ops.  Calling this twice on the same root is observationally
/// identical to calling it once; the second call performs no freeze
/// transforms.
///
/// # Errors
///
/// [`RimeError::UnexpectedKind`] if the reachable graph contains an
/// object that is neither an ordinary object nor a callable (an
/// [`External`][crate::objects::map::InstanceType::External] handle).
/// The error aborts the drain; already-frozen objects stay frozen and
/// recorded.
pub fn deep_freeze(root: &JsValue) -> RimeResult<()> {
    REGISTRY.with(|registry| deep_freeze_with(&mut registry.borrow_mut(), root))
}
