// ============================================================================
// revar - The Reactive Cell
// Mutable, lazily-recomputed value holder with three binding modes
// ============================================================================
//
// A Var is a handle over Rc<VarInner<T>>. The inner carries the binding, the
// cached value, the dirty flag, the current dependency subscriptions, and the
// listener registry. Invalidation is pushed eagerly through listeners;
// recomputation is pulled lazily on the next get(). That split is what makes
// diamond-shaped graphs recompute their sink at most once per change.
// ============================================================================

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::core::context::VarContext;
use crate::core::types::{AnyVar, ChangeListener, EqualsFn, ReadVar, default_equals};
use crate::reactivity::listeners::{InvalListener, ListenerSet, listener};

/// A pure computation binding: reads its inputs through the context.
pub type ComputeFn<T> = dyn Fn(&mut VarContext) -> T;

/// A side-effecting computation binding: updates the previous item in place,
/// avoiding a fresh allocation per recomputation.
pub type SideEffectingFn<T> = dyn Fn(&mut VarContext, &mut T);

// =============================================================================
// BINDING
// =============================================================================

/// The rule that determines a cell's value. Exactly one is active at a time;
/// installing a new binding clears the dirty state, the dependency
/// subscriptions, and the cached value first.
enum Binding<T> {
    /// Plain value; stored in the cell's cache slot.
    Const,

    /// Pure function of other cells, re-run from scratch on every
    /// recomputation so conditional dependencies resolve correctly.
    Compute(Rc<ComputeFn<T>>),

    /// Keeps a working item that the computation updates in place. The slot
    /// is `None` only while the item is checked out for a recomputation
    /// pass; it is restored when the pass ends, including by panic.
    SideEffecting {
        item: Option<T>,
        func: Rc<SideEffectingFn<T>>,
    },

    /// Directly mirrors another cell; the one dependency edge is installed
    /// at bind time and never rebuilt.
    Mirror(Box<dyn ReadVar<T>>),
}

// =============================================================================
// VAR INNER
// =============================================================================

/// The data behind a [`Var`] handle.
struct VarInner<T: 'static> {
    binding: RefCell<Binding<T>>,

    /// Cached result of the last recomputation (or the constant value).
    value: RefCell<Option<T>>,

    /// When false, `value` is consistent with the binding's inputs as of the
    /// last recomputation.
    invalidated: Cell<bool>,

    /// Cells this one currently subscribes to. Torn down and rebuilt on
    /// every recomputation of a Compute/SideEffecting binding.
    dependencies: RefCell<Vec<Rc<dyn AnyVar>>>,

    listeners: ListenerSet,

    /// The single weak back-reference listener this cell registers on each
    /// of its dependencies. Installed right after construction.
    inval_listener: RefCell<Option<Rc<dyn ChangeListener>>>,

    /// Used by `set` to suppress redundant notifications.
    equals: EqualsFn<T>,
}

impl<T: 'static> VarInner<T> {
    fn invalidation_listener(&self) -> Rc<dyn ChangeListener> {
        self.inval_listener
            .borrow()
            .clone()
            .expect("invalidation listener is installed at construction")
    }

    /// Unsubscribe from all dependencies and wipe the cached state. Callers
    /// install the new binding and notify afterwards.
    fn reset_state(&self) {
        let old = std::mem::take(&mut *self.dependencies.borrow_mut());
        if !old.is_empty() {
            let listener = self.invalidation_listener();
            for dep in &old {
                dep.remove_listener(&listener);
            }
        }
        self.invalidated.set(true);
        *self.value.borrow_mut() = None;
    }

    /// Swap the dependency set for the one recorded during the recompute
    /// that just finished. Edges are always torn down and re-subscribed,
    /// even for dependencies present in both sets.
    fn replace_dependencies(&self, new_deps: Vec<Rc<dyn AnyVar>>) {
        let listener = self.invalidation_listener();
        let old = std::mem::replace(&mut *self.dependencies.borrow_mut(), new_deps);
        for dep in &old {
            dep.remove_listener(&listener);
        }
        for dep in self.dependencies.borrow().iter() {
            dep.add_listener(listener.clone());
        }
    }

    fn set(&self, item: T) {
        let suppress = {
            let binding = self.binding.borrow();
            matches!(&*binding, Binding::Const)
                && self
                    .value
                    .borrow()
                    .as_ref()
                    .is_some_and(|current| (self.equals)(current, &item))
        };
        if suppress {
            return;
        }

        self.reset_state();
        *self.binding.borrow_mut() = Binding::Const;
        *self.value.borrow_mut() = Some(item);
        self.listeners.notify(self);
    }

    fn get_or_compute(&self) -> T
    where
        T: Clone,
    {
        {
            let binding = self.binding.borrow();
            match &*binding {
                Binding::Const => {
                    self.invalidated.set(false);
                    return self
                        .value
                        .borrow()
                        .clone()
                        .expect("constant cell holds a value");
                }
                Binding::Compute(_) | Binding::Mirror(_) if !self.invalidated.get() => {
                    return self
                        .value
                        .borrow()
                        .clone()
                        .expect("clean cell holds a cached value");
                }
                Binding::SideEffecting { item, .. } if !self.invalidated.get() => {
                    return item
                        .as_ref()
                        .expect("clean side-effecting cell holds its item")
                        .clone();
                }
                Binding::Mirror(source) => {
                    let result = source.get();
                    *self.value.borrow_mut() = Some(result.clone());
                    self.invalidated.set(false);
                    return result;
                }
                _ => {}
            }
        }

        // Stale Compute: clone the closure out so the binding isn't borrowed
        // while user code runs. A panic here propagates to the caller with
        // the cell still invalidated and its old subscriptions intact, so a
        // later get() retries.
        let compute = {
            let binding = self.binding.borrow();
            match &*binding {
                Binding::Compute(func) => Some(func.clone()),
                _ => None,
            }
        };
        if let Some(func) = compute {
            let mut ctx = VarContext::new();
            let result = func(&mut ctx);
            self.replace_dependencies(ctx.into_dependencies());
            *self.value.borrow_mut() = Some(result.clone());
            self.invalidated.set(false);
            return result;
        }

        // Stale SideEffecting: check the item and the computation out of the
        // binding so neither RefCell is borrowed while user code runs. The
        // slot guard restores the item when the pass ends, even on panic, so
        // a later get() retries with the seed intact. A side-effecting cell
        // that reads itself mid-pass finds the slot empty and panics with a
        // clear message instead of a borrow error.
        let (item, func) = {
            let mut binding = self.binding.borrow_mut();
            match &mut *binding {
                Binding::SideEffecting { item, func } => (
                    item.take()
                        .expect("side-effecting cell read during its own recomputation"),
                    func.clone(),
                ),
                _ => unreachable!("binding kind changed during recomputation"),
            }
        };
        let mut slot = SideEffectingSlot {
            inner: self,
            item: Some(item),
        };
        let mut ctx = VarContext::new();
        func(
            &mut ctx,
            slot.item.as_mut().expect("slot holds the item for this pass"),
        );
        let result = slot
            .item
            .as_ref()
            .expect("slot holds the item for this pass")
            .clone();
        drop(slot);
        self.replace_dependencies(ctx.into_dependencies());
        self.invalidated.set(false);
        result
    }
}

/// Returns a checked-out side-effecting item to its binding slot when the
/// recomputation pass ends, whether it finished or unwound. If the binding
/// was replaced mid-pass, the stale item is simply dropped.
struct SideEffectingSlot<'a, T: 'static> {
    inner: &'a VarInner<T>,
    item: Option<T>,
}

impl<T: 'static> Drop for SideEffectingSlot<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            if let Binding::SideEffecting { item: slot, .. } = &mut *self.inner.binding.borrow_mut()
            {
                *slot = Some(item);
            }
        }
    }
}

impl<T: 'static> AnyVar for VarInner<T> {
    fn invalidate(&self) {
        if !self.invalidated.get() {
            self.invalidated.set(true);
            self.listeners.notify(self);
        }
    }

    fn add_listener(&self, listener: Rc<dyn ChangeListener>) {
        self.listeners.add(listener);
    }

    fn remove_listener(&self, listener: &Rc<dyn ChangeListener>) {
        self.listeners.remove(listener);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// VAR<T> - The public handle
// =============================================================================

/// A mutable reactive cell.
///
/// A `Var` holds a value determined by its current binding: a constant
/// (installed by [`set`](Var::set)), a pure computation over other cells
/// (installed by [`bind`](Var::bind)), or a side-effecting computation that
/// reuses its previous item (installed by
/// [`side_effecting`](Var::side_effecting)).
///
/// Reads are pull-based and cached: [`get`](Var::get) recomputes only when
/// the cell has been invalidated since the last read. Invalidation is
/// push-based: when a dependency changes, this cell is marked stale and its
/// own listeners fire, without any eager recomputation.
///
/// Cloning the handle is cheap and aliases the same cell. All access is
/// single-threaded.
///
/// # Example
///
/// ```
/// use revar::{var, Var};
///
/// let celsius = var(20.0f64);
/// let fahrenheit = Var::computed({
///     let celsius = celsius.clone();
///     move |ctx| ctx.read(&celsius) * 9.0 / 5.0 + 32.0
/// });
///
/// assert_eq!(fahrenheit.get(), 68.0);
/// celsius.set(100.0);
/// assert_eq!(fahrenheit.get(), 212.0);
/// ```
pub struct Var<T: 'static> {
    inner: Rc<VarInner<T>>,
}

impl<T: 'static> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Var<T> {
    fn from_parts(binding: Binding<T>, value: Option<T>, equals: EqualsFn<T>) -> Self {
        let inner = Rc::new(VarInner {
            binding: RefCell::new(binding),
            value: RefCell::new(value),
            invalidated: Cell::new(true),
            dependencies: RefCell::new(Vec::new()),
            listeners: ListenerSet::new(),
            inval_listener: RefCell::new(None),
            equals,
        });

        // The weak back-reference listener needs the Rc to exist first.
        let weak = {
            let rc: Rc<dyn AnyVar> = inner.clone();
            Rc::downgrade(&rc)
        };
        *inner.inval_listener.borrow_mut() = Some(Rc::new(InvalListener::new(weak)));

        Self { inner }
    }

    /// Create a cell holding a constant value.
    pub fn new(item: T) -> Self
    where
        T: PartialEq,
    {
        Self::new_with_equals(item, default_equals)
    }

    /// Create a constant cell with a custom equality function, used by
    /// [`set`](Var::set) to suppress redundant notifications.
    pub fn new_with_equals(item: T, equals: EqualsFn<T>) -> Self {
        Self::from_parts(Binding::Const, Some(item), equals)
    }

    /// Create a cell bound to a computation. The computation does not run
    /// until the first [`get`](Var::get).
    pub fn computed<F>(computation: F) -> Self
    where
        T: PartialEq,
        F: Fn(&mut VarContext) -> T + 'static,
    {
        Self::from_parts(
            Binding::Compute(Rc::new(computation)),
            None,
            default_equals,
        )
    }

    /// Like [`computed`](Var::computed) but with a custom equality function
    /// (for value types without a usable `PartialEq`).
    pub fn computed_with_equals<F>(computation: F, equals: EqualsFn<T>) -> Self
    where
        F: Fn(&mut VarContext) -> T + 'static,
    {
        Self::from_parts(Binding::Compute(Rc::new(computation)), None, equals)
    }

    /// Create a cell bound to a computation and evaluate it immediately, so
    /// its dependencies register now rather than on the first read.
    pub fn eager<F>(computation: F) -> Self
    where
        T: Clone + PartialEq,
        F: Fn(&mut VarContext) -> T + 'static,
    {
        let cell = Self::computed(computation);
        cell.get();
        cell
    }

    /// Create a cell with a side-effecting binding seeded with `item`.
    pub fn new_side_effecting<F>(item: T, func: F) -> Self
    where
        T: PartialEq,
        F: Fn(&mut VarContext, &mut T) + 'static,
    {
        Self::from_parts(
            Binding::SideEffecting {
                item: Some(item),
                func: Rc::new(func),
            },
            None,
            default_equals,
        )
    }

    /// Get (and compute if necessary) the value represented by this cell.
    ///
    /// Synchronous; a panic in the binding computation propagates to the
    /// caller and leaves the cell invalidated, so the next `get` retries.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.get_or_compute()
    }

    /// Install a constant binding with `item`.
    ///
    /// No-op (including listener notification) when the cell is already
    /// constant and holds an equal value.
    pub fn set(&self, item: T) {
        self.inner.set(item);
    }

    /// Install a pure computation binding. The cell is invalidated
    /// immediately and listeners are notified once to announce the rebind;
    /// the computation itself runs on the next [`get`](Var::get).
    pub fn bind<F>(&self, computation: F)
    where
        F: Fn(&mut VarContext) -> T + 'static,
    {
        self.inner.reset_state();
        *self.inner.binding.borrow_mut() = Binding::Compute(Rc::new(computation));
        self.inner.listeners.notify(&*self.inner);
    }

    /// [`bind`](Var::bind), then [`get`](Var::get) immediately so the
    /// dependencies register now. Returns the computed value.
    pub fn eager_bind<F>(&self, computation: F) -> T
    where
        T: Clone,
        F: Fn(&mut VarContext) -> T + 'static,
    {
        self.bind(computation);
        self.get()
    }

    /// Bind this cell to mirror another cell's value. Guarantees the only
    /// dependency is `source`, skipping per-recompute dependency tracking.
    pub fn bind_var<V>(&self, source: V)
    where
        V: ReadVar<T> + 'static,
    {
        let dep = source.as_dep();
        self.inner.reset_state();
        *self.inner.binding.borrow_mut() = Binding::Mirror(Box::new(source));
        self.inner.replace_dependencies(vec![dep]);
        self.inner.listeners.notify(&*self.inner);
    }

    /// Install a side-effecting binding seeded with `item`. On each
    /// recomputation the function receives the previous item by `&mut` and
    /// updates it in place, so no fresh value is allocated per pass.
    pub fn side_effecting<F>(&self, item: T, func: F)
    where
        F: Fn(&mut VarContext, &mut T) + 'static,
    {
        self.inner.reset_state();
        *self.inner.binding.borrow_mut() = Binding::SideEffecting {
            item: Some(item),
            func: Rc::new(func),
        };
        self.inner.listeners.notify(&*self.inner);
    }

    /// Install a side-effecting binding seeded with the cell's current
    /// value from [`get`](Var::get).
    pub fn side_effecting_retain<F>(&self, func: F)
    where
        T: Clone,
        F: Fn(&mut VarContext, &mut T) + 'static,
    {
        let current = self.get();
        self.side_effecting(current, func);
    }

    /// Force the cell stale without changing its binding: the next
    /// [`get`](Var::get) recomputes even though no dependency changed.
    /// Notifies listeners unless the cell was already invalidated.
    pub fn invalidate(&self) {
        self.inner.invalidate();
    }

    /// Add a change listener. Adding an already-present handle is a no-op.
    pub fn add_listener(&self, listener: Rc<dyn ChangeListener>) {
        self.inner.add_listener(listener);
    }

    /// Add a closure listener, returning the handle needed to remove it.
    pub fn add_listener_fn<F>(&self, callback: F) -> Rc<dyn ChangeListener>
    where
        F: Fn(&dyn AnyVar) + 'static,
    {
        let handle = listener(callback);
        self.inner.add_listener(handle.clone());
        handle
    }

    /// Add a change listener and fire it immediately.
    pub fn add_listener_and_fire(&self, listener: Rc<dyn ChangeListener>) {
        self.inner.add_listener(listener.clone());
        listener.on_change(&*self.inner);
    }

    /// Remove a listener by pointer identity. Removing an absent handle is a
    /// no-op.
    pub fn remove_listener(&self, listener: &Rc<dyn ChangeListener>) {
        self.inner.remove_listener(listener);
    }

    /// Number of registered listeners, including internal invalidation
    /// listeners from dependent cells that have not been swept yet.
    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }
}

impl<T: Clone + 'static> ReadVar<T> for Var<T> {
    fn get(&self) -> T {
        self.inner.get_or_compute()
    }

    fn as_dep(&self) -> Rc<dyn AnyVar> {
        self.inner.clone()
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var").field("value", &self.get()).finish()
    }
}

// =============================================================================
// CREATION FUNCTIONS
// =============================================================================

/// Create a reactive cell holding a constant value.
///
/// # Example
///
/// ```
/// use revar::var;
///
/// let count = var(0);
/// count.set(42);
/// assert_eq!(count.get(), 42);
/// ```
pub fn var<T>(item: T) -> Var<T>
where
    T: PartialEq + 'static,
{
    Var::new(item)
}

/// Create a reactive cell bound to a computation.
///
/// # Example
///
/// ```
/// use revar::{computed, var};
///
/// let base = var(2);
/// let squared = computed({
///     let base = base.clone();
///     move |ctx| {
///         let b = ctx.read(&base);
///         b * b
///     }
/// });
/// assert_eq!(squared.get(), 4);
/// ```
pub fn computed<T, F>(computation: F) -> Var<T>
where
    T: PartialEq + 'static,
    F: Fn(&mut VarContext) -> T + 'static,
{
    Var::computed(computation)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn set_stores_a_value() {
        let v = var(0);
        v.set(7);
        assert_eq!(v.get(), 7);
    }

    #[test]
    fn bind_calls_the_computation_lazily() {
        let ran = Rc::new(Cell::new(false));
        let v = var(String::new());

        v.bind({
            let ran = ran.clone();
            move |_ctx| {
                ran.set(true);
                String::from("hello")
            }
        });
        assert!(!ran.get(), "binding must not run before the first get");

        assert_eq!(v.get(), "hello");
        assert!(ran.get());
    }

    #[test]
    fn get_is_idempotent_without_invalidation() {
        let runs = Rc::new(Cell::new(0));
        let dep = var(1);
        let v = Var::computed({
            let dep = dep.clone();
            let runs = runs.clone();
            move |ctx| {
                runs.set(runs.get() + 1);
                ctx.read(&dep) * 2
            }
        });

        assert_eq!(v.get(), 2);
        assert_eq!(v.get(), 2);
        assert_eq!(runs.get(), 1);

        dep.set(3);
        assert_eq!(runs.get(), 1, "invalidation alone must not recompute");
        assert_eq!(v.get(), 6);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn side_effecting_receives_the_previous_item() {
        let dep = var(10);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let v = Var::new_side_effecting(100, {
            let dep = dep.clone();
            let seen = seen.clone();
            move |ctx, item: &mut i32| {
                seen.borrow_mut().push(*item);
                *item += ctx.read(&dep);
            }
        });

        assert_eq!(v.get(), 110);
        dep.set(1);
        assert_eq!(v.get(), 111);
        assert_eq!(*seen.borrow(), vec![100, 110]);
    }

    #[test]
    fn side_effecting_retain_seeds_from_current_value() {
        let v = var(5);
        v.side_effecting_retain(|_ctx, item| *item *= 2);
        assert_eq!(v.get(), 10);
    }

    #[test]
    fn set_equal_value_on_constant_cell_is_a_noop() {
        let v = var(42);
        let fires = Rc::new(Cell::new(0));
        v.add_listener_fn({
            let fires = fires.clone();
            move |_| fires.set(fires.get() + 1)
        });

        v.set(42);
        assert_eq!(fires.get(), 0);

        v.set(43);
        assert_eq!(fires.get(), 1);

        v.set(43);
        assert_eq!(fires.get(), 1);
    }

    #[test]
    fn set_equal_value_over_a_computed_binding_still_notifies() {
        // Only Const-over-Const is suppressed; replacing a computation with
        // a constant is a real rebind.
        let v: Var<i32> = Var::computed(|_ctx| 5);
        assert_eq!(v.get(), 5);

        let fires = Rc::new(Cell::new(0));
        v.add_listener_fn({
            let fires = fires.clone();
            move |_| fires.set(fires.get() + 1)
        });

        v.set(5);
        assert_eq!(fires.get(), 1);
    }

    #[test]
    fn rebind_notifies_listeners_once() {
        let v = var(1);
        let fires = Rc::new(Cell::new(0));
        v.add_listener_fn({
            let fires = fires.clone();
            move |_| fires.set(fires.get() + 1)
        });

        v.bind(|_ctx| 2);
        assert_eq!(fires.get(), 1);

        // The deferred recomputation must not notify again.
        assert_eq!(v.get(), 2);
        assert_eq!(fires.get(), 1);
    }

    #[test]
    fn invalidate_notifies_once_until_revalidated() {
        let v = var(1);
        v.bind(|_ctx| 3);
        v.get();

        let fires = Rc::new(Cell::new(0));
        v.add_listener_fn({
            let fires = fires.clone();
            move |_| fires.set(fires.get() + 1)
        });

        v.invalidate();
        v.invalidate();
        assert_eq!(fires.get(), 1);

        v.get();
        v.invalidate();
        assert_eq!(fires.get(), 2);
    }

    #[test]
    fn eager_bind_registers_dependencies_immediately() {
        let dep = var(1);
        let v = var(0);

        let result = v.eager_bind({
            let dep = dep.clone();
            move |ctx| ctx.read(&dep) + 1
        });
        assert_eq!(result, 2);
        assert_eq!(dep.listener_count(), 1);
    }

    #[test]
    fn eager_constructor_computes_immediately() {
        let runs = Rc::new(Cell::new(0));
        let _v = Var::eager({
            let runs = runs.clone();
            move |_ctx| {
                runs.set(runs.get() + 1);
                0
            }
        });
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn bind_var_mirrors_the_source() {
        let source = var(String::from("a"));
        let mirror = var(String::new());

        mirror.bind_var(source.clone());
        assert_eq!(mirror.get(), "a");

        source.set(String::from("b"));
        assert_eq!(mirror.get(), "b");
    }

    #[test]
    fn bind_var_has_exactly_one_dependency() {
        let source = var(1);
        let mirror = var(0);

        mirror.bind_var(source.clone());
        assert_eq!(source.listener_count(), 1);

        // Repeated reads never rebuild the single edge.
        mirror.get();
        mirror.get();
        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn panicking_computation_leaves_the_cell_retryable() {
        let should_fail = Rc::new(Cell::new(true));
        let v: Var<i32> = Var::computed({
            let should_fail = should_fail.clone();
            move |_ctx| {
                if should_fail.get() {
                    panic!("binding failure");
                }
                9
            }
        });

        let outcome = catch_unwind(AssertUnwindSafe(|| v.get()));
        assert!(outcome.is_err());

        should_fail.set(false);
        assert_eq!(v.get(), 9, "next get() must retry the computation");
    }

    #[test]
    fn panicking_side_effecting_computation_keeps_its_seed() {
        let should_fail = Rc::new(Cell::new(true));
        let v = Var::new_side_effecting(5, {
            let should_fail = should_fail.clone();
            move |_ctx, item: &mut i32| {
                if should_fail.get() {
                    panic!("side effect failure");
                }
                *item += 1;
            }
        });

        let outcome = catch_unwind(AssertUnwindSafe(|| v.get()));
        assert!(outcome.is_err());

        should_fail.set(false);
        assert_eq!(v.get(), 6, "the item survives a failed pass");
    }

    #[test]
    #[should_panic(expected = "side-effecting cell read during its own recomputation")]
    fn side_effecting_cell_reading_itself_panics_clearly() {
        let v = var(0);
        let inner_handle = v.clone();
        v.side_effecting(1, move |_ctx, _item| {
            inner_handle.get();
        });

        v.get();
    }

    #[test]
    fn add_listener_is_idempotent_and_remove_works() {
        let v = var(0);
        let count = Rc::new(Cell::new(0));
        let handle = listener({
            let count = count.clone();
            move |_| count.set(count.get() + 1)
        });

        v.add_listener(handle.clone());
        v.add_listener(handle.clone());
        assert_eq!(v.listener_count(), 1);

        v.set(1);
        assert_eq!(count.get(), 1);

        v.remove_listener(&handle);
        v.set(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn add_listener_and_fire_fires_immediately() {
        let v = var(0);
        let count = Rc::new(Cell::new(0));
        let handle = listener({
            let count = count.clone();
            move |_| count.set(count.get() + 1)
        });

        v.add_listener_and_fire(handle);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn rebind_drops_old_dependency_subscriptions() {
        let dep = var(1);
        let v = var(0);

        v.eager_bind({
            let dep = dep.clone();
            move |ctx| ctx.read(&dep)
        });
        assert_eq!(dep.listener_count(), 1);

        v.set(99);
        assert_eq!(dep.listener_count(), 0);

        // A change to the old dependency no longer disturbs the cell.
        dep.set(5);
        assert_eq!(v.get(), 99);
    }

    #[test]
    fn custom_equality_controls_set_suppression() {
        use crate::reactivity::equality::never_equals;

        let v = Var::new_with_equals(vec![1, 2], never_equals);
        let fires = Rc::new(Cell::new(0));
        v.add_listener_fn({
            let fires = fires.clone();
            move |_| fires.set(fires.get() + 1)
        });

        v.set(vec![1, 2]);
        assert_eq!(fires.get(), 1, "never_equals forces notification");
    }

    #[test]
    fn debug_prints_the_value() {
        let v = var(42);
        let s = format!("{v:?}");
        assert!(s.contains("Var"));
        assert!(s.contains("42"));
    }
}
