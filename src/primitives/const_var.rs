// ============================================================================
// revar - Constant Cell
// Immutable read-only cell that never invalidates and never notifies
// ============================================================================

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::core::types::{AnyVar, ChangeListener, ReadVar};

/// An immutable cell.
///
/// `ConstVar` can participate in computations like any other cell, but it
/// never changes and never notifies. Listener registration is accepted and
/// discarded, so a dependent that tracks it pays nothing: the subscription
/// edge simply does not exist.
pub struct ConstVar<T: 'static> {
    inner: Rc<ConstInner<T>>,
}

struct ConstInner<T> {
    value: T,
}

impl<T: 'static> ConstVar<T> {
    pub fn new(item: T) -> Self {
        Self {
            inner: Rc::new(ConstInner { value: item }),
        }
    }

    /// Borrow the value without cloning.
    pub fn value(&self) -> &T {
        &self.inner.value
    }
}

impl<T: 'static> Clone for ConstVar<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> AnyVar for ConstInner<T> {
    fn invalidate(&self) {}

    fn add_listener(&self, _listener: Rc<dyn ChangeListener>) {
        // A constant never fires, so holding the listener would only pin it.
    }

    fn remove_listener(&self, _listener: &Rc<dyn ChangeListener>) {}

    fn listener_count(&self) -> usize {
        0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Clone + 'static> ReadVar<T> for ConstVar<T> {
    fn get(&self) -> T {
        self.inner.value.clone()
    }

    fn as_dep(&self) -> Rc<dyn AnyVar> {
        self.inner.clone()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for ConstVar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstVar")
            .field("value", &self.inner.value)
            .finish()
    }
}

/// Create an immutable cell.
///
/// # Example
///
/// ```
/// use revar::{computed, const_var};
///
/// let tax_rate = const_var(0.2f64);
/// let gross = computed({
///     let tax_rate = tax_rate.clone();
///     move |ctx| 100.0 * (1.0 + ctx.read(&tax_rate))
/// });
/// assert_eq!(gross.get(), 120.0);
/// ```
pub fn const_var<T: 'static>(item: T) -> ConstVar<T> {
    ConstVar::new(item)
}
