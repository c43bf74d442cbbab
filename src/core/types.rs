// ============================================================================
// revar - Type Definitions
// Type-erased traits for the reactive dependency graph
// ============================================================================

use std::any::Any;
use std::rc::Rc;

// =============================================================================
// TYPE-ERASED TRAITS
// =============================================================================
//
// Dependency edges don't need to know the value type T: marking a cell stale
// and managing its listener registry are type-free operations. Only reading
// a value needs T.
//
// So the graph stores:
// - Vec<Rc<dyn AnyVar>> for a cell's dependencies
// - Rc<dyn ChangeListener> entries in each cell's listener registry
//
// The concrete Var<T>, ConstVar<T> and specialized vars hold the values and
// expose the typed read surface through ReadVar<T>.
// =============================================================================

/// A callback registered on a cell, invoked when the cell changes or is
/// invalidated.
///
/// Listener identity is `Rc` pointer identity: the same `Rc` handle that was
/// added must be used to remove it.
pub trait ChangeListener {
    /// Called with the cell that changed.
    fn on_change(&self, source: &dyn AnyVar);

    /// Whether this listener is spent and should be removed from the
    /// registry. Checked after each notification pass; retired listeners are
    /// swept out on a best-effort basis.
    fn should_retire(&self) -> bool {
        false
    }
}

/// Type-erased cell surface used for dependency edges.
///
/// Implemented by the cell internals behind `Var<T>` and `ConstVar<T>`.
/// A dependent cell holds its dependencies as `Rc<dyn AnyVar>` so that cells
/// of different value types can appear in the same dependency set.
pub trait AnyVar: Any {
    /// Mark this cell's contents out of date and notify listeners.
    ///
    /// Does nothing if the cell is already invalidated, which is what stops
    /// diamond-shaped graphs from double-notifying their sink.
    fn invalidate(&self);

    /// Add a listener. Adding an already-present listener is a no-op.
    fn add_listener(&self, listener: Rc<dyn ChangeListener>);

    /// Remove a listener by pointer identity. Removing an absent listener is
    /// a no-op.
    fn remove_listener(&self, listener: &Rc<dyn ChangeListener>);

    /// Number of currently registered listeners (including not-yet-swept
    /// retired ones).
    fn listener_count(&self) -> usize;

    /// Upcast to Any for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Typed read surface of a reactive cell.
///
/// `get` returns the current value, recomputing first if the cell is stale.
/// It does NOT record a dependency; dependency tracking happens through
/// [`VarContext::read`](crate::core::context::VarContext::read), which calls
/// `as_dep` to obtain the type-erased edge handle.
pub trait ReadVar<T> {
    /// Get (and compute if necessary) the value represented by this cell.
    fn get(&self) -> T;

    /// The type-erased handle used for dependency edges.
    fn as_dep(&self) -> Rc<dyn AnyVar>;
}

// =============================================================================
// EQUALITY
// =============================================================================

/// Equality function type for comparing cell values.
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Default equality using PartialEq.
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Compare two listener handles by pointer identity.
pub(crate) fn same_listener(a: &Rc<dyn ChangeListener>, b: &Rc<dyn ChangeListener>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Compare two dependency handles by pointer identity.
pub(crate) fn same_var(a: &Rc<dyn AnyVar>, b: &Rc<dyn AnyVar>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

// =============================================================================
// TESTS
// =============================================================================
