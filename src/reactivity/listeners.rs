// ============================================================================
// revar - Listener Registry and Invalidation Propagation
// Per-cell change-listener set and the weak back-reference listener that
// carries invalidation from a dependency to its dependents
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::core::types::{AnyVar, ChangeListener, same_listener};

// =============================================================================
// LISTENER SET
// =============================================================================

/// Insertion-ordered registry of change listeners for one cell.
///
/// Delivery order is registration order. Listeners added or removed while a
/// notification pass is running take effect on the next pass: `notify`
/// snapshots the registry before iterating, so a listener may freely remove
/// itself (or add others) from inside its own callback.
///
/// A panic in a listener aborts delivery to the remaining listeners of that
/// pass and propagates to the caller.
pub struct ListenerSet {
    entries: RefCell<Vec<Rc<dyn ChangeListener>>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::with_capacity(4)),
        }
    }

    /// Add a listener. No-op if the same handle is already registered.
    pub fn add(&self, listener: Rc<dyn ChangeListener>) {
        let mut entries = self.entries.borrow_mut();
        if !entries.iter().any(|l| same_listener(l, &listener)) {
            entries.push(listener);
        }
    }

    /// Remove a listener by pointer identity. No-op if absent.
    pub fn remove(&self, listener: &Rc<dyn ChangeListener>) {
        self.entries
            .borrow_mut()
            .retain(|l| !same_listener(l, listener));
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Fire every registered listener with `source`, then sweep out any that
    /// report themselves retired.
    pub fn notify(&self, source: &dyn AnyVar) {
        // Snapshot first so listeners can mutate the registry mid-pass.
        let snapshot: Vec<Rc<dyn ChangeListener>> = self.entries.borrow().clone();

        let mut any_retired = false;
        for listener in &snapshot {
            listener.on_change(source);
            if listener.should_retire() {
                any_retired = true;
            }
        }

        if any_retired {
            self.entries.borrow_mut().retain(|l| !l.should_retire());
        }
    }
}

impl Default for ListenerSet {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// INVALIDATION LISTENER (weak back-reference)
// =============================================================================

/// The internal listener a dependent cell registers on each of its
/// dependencies.
///
/// Holds only a weak reference to the dependent, so a cell with no other
/// owner stays collectible even while subscribed to a long-lived dependency.
/// Once the dependent is gone the listener marks itself retired; the
/// dependency's registry sweeps it on a later notification pass.
pub(crate) struct InvalListener {
    dependent: Weak<dyn AnyVar>,
    dependent_gone: Cell<bool>,
}

impl InvalListener {
    pub(crate) fn new(dependent: Weak<dyn AnyVar>) -> Self {
        Self {
            dependent,
            dependent_gone: Cell::new(false),
        }
    }
}

impl ChangeListener for InvalListener {
    fn on_change(&self, _source: &dyn AnyVar) {
        if self.dependent_gone.get() {
            return;
        }
        match self.dependent.upgrade() {
            Some(dependent) => dependent.invalidate(),
            None => self.dependent_gone.set(true),
        }
    }

    fn should_retire(&self) -> bool {
        self.dependent_gone.get()
    }
}

// =============================================================================
// CLOSURE AND ONE-TIME LISTENERS
// =============================================================================

struct FnListener<F: Fn(&dyn AnyVar)> {
    callback: F,
}

impl<F: Fn(&dyn AnyVar)> ChangeListener for FnListener<F> {
    fn on_change(&self, source: &dyn AnyVar) {
        (self.callback)(source);
    }
}

/// Wrap a closure into a listener handle.
///
/// Keep the returned `Rc` if you intend to remove the listener later.
pub fn listener<F>(callback: F) -> Rc<dyn ChangeListener>
where
    F: Fn(&dyn AnyVar) + 'static,
{
    Rc::new(FnListener { callback })
}

/// A listener that fires at most once. After its first delivery it retires
/// itself and is swept from the registry on a later pass.
pub struct OneTimeListener {
    inner: Rc<dyn ChangeListener>,
    fired: Cell<bool>,
}

impl OneTimeListener {
    pub fn new(inner: Rc<dyn ChangeListener>) -> Rc<Self> {
        Rc::new(Self {
            inner,
            fired: Cell::new(false),
        })
    }

    /// Convenience constructor from a closure.
    pub fn of<F>(callback: F) -> Rc<Self>
    where
        F: Fn(&dyn AnyVar) + 'static,
    {
        Self::new(listener(callback))
    }
}

impl ChangeListener for OneTimeListener {
    fn on_change(&self, source: &dyn AnyVar) {
        if !self.fired.get() {
            self.fired.set(true);
            self.inner.on_change(source);
        }
    }

    fn should_retire(&self) -> bool {
        self.fired.get()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::var::Var;
    use crate::core::types::ReadVar;

    fn source_cell() -> Rc<dyn AnyVar> {
        // Any cell will do as a notification source.
        Var::new(0).as_dep()
    }

    #[test]
    fn add_is_idempotent() {
        let set = ListenerSet::new();
        let l = listener(|_| {});

        set.add(l.clone());
        set.add(l.clone());

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_absent_listener_is_noop() {
        let set = ListenerSet::new();
        let l = listener(|_| {});

        set.remove(&l);
        assert!(set.is_empty());
    }

    #[test]
    fn notify_fires_in_insertion_order() {
        let set = ListenerSet::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            set.add(listener(move |_| order.borrow_mut().push(tag)));
        }

        set.notify(&*source_cell());
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn one_time_listener_fires_once_then_is_swept() {
        let set = ListenerSet::new();
        let count = Rc::new(Cell::new(0));
        let one_shot = OneTimeListener::of({
            let count = count.clone();
            move |_| count.set(count.get() + 1)
        });

        set.add(one_shot);
        let source = source_cell();

        set.notify(&*source);
        assert_eq!(count.get(), 1);
        assert!(set.is_empty());

        set.notify(&*source);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn listener_can_remove_itself_mid_pass() {
        // Self-removal takes effect next pass and must not disturb delivery
        // to the other listeners of the current pass.
        let set = Rc::new(ListenerSet::new());
        let count = Rc::new(Cell::new(0));
        let tail_count = Rc::new(Cell::new(0));

        let handle: Rc<RefCell<Option<Rc<dyn ChangeListener>>>> = Rc::new(RefCell::new(None));
        let self_removing = listener({
            let set = set.clone();
            let count = count.clone();
            let handle = handle.clone();
            move |_| {
                count.set(count.get() + 1);
                if let Some(me) = handle.borrow().as_ref() {
                    set.remove(me);
                }
            }
        });
        *handle.borrow_mut() = Some(self_removing.clone());

        set.add(self_removing);
        set.add(listener({
            let tail_count = tail_count.clone();
            move |_| tail_count.set(tail_count.get() + 1)
        }));

        let source = source_cell();
        set.notify(&*source);
        assert_eq!(count.get(), 1);
        assert_eq!(tail_count.get(), 1);

        set.notify(&*source);
        assert_eq!(count.get(), 1, "removed listener must not fire again");
        assert_eq!(tail_count.get(), 2);
    }

    #[test]
    fn panicking_listener_aborts_the_rest_of_the_pass() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let set = ListenerSet::new();
        let tail_fired = Rc::new(Cell::new(0));

        let bomb = listener(|_| panic!("listener failure"));
        set.add(bomb.clone());
        set.add(listener({
            let tail_fired = tail_fired.clone();
            move |_| tail_fired.set(tail_fired.get() + 1)
        }));

        let source = source_cell();
        let outcome = catch_unwind(AssertUnwindSafe(|| set.notify(&*source)));
        assert!(outcome.is_err());
        assert_eq!(
            tail_fired.get(),
            0,
            "delivery stops at the panicking listener"
        );

        // The registry is untouched and usable after the unwind.
        assert_eq!(set.len(), 2);
        set.remove(&bomb);
        set.notify(&*source);
        assert_eq!(tail_fired.get(), 1);
    }

    #[test]
    fn inval_listener_retires_after_dependent_is_dropped() {
        let dependent = Var::new(0);
        let weak = {
            let rc: Rc<dyn AnyVar> = dependent.as_dep();
            Rc::downgrade(&rc)
        };
        let inval = Rc::new(InvalListener::new(weak));

        assert!(!inval.should_retire());

        drop(dependent);
        inval.on_change(&*source_cell());
        assert!(inval.should_retire());
    }
}
