// ============================================================================
// revar - Dependency-Tracking Context
// Short-lived recorder of the cells read during one recomputation pass
// ============================================================================

use std::rc::Rc;

use super::types::{AnyVar, ReadVar, same_var};

/// Records which cells a binding computation reads.
///
/// A `VarContext` is created at the start of a recomputation, lent `&mut` to
/// the binding closure, and consumed when the recompute finishes: the set of
/// dependencies it accumulated becomes the cell's new dependency set. It can
/// never outlive the pass that created it.
///
/// # Example
///
/// ```
/// use revar::{var, Var};
///
/// let width = var(10);
/// let height = var(4);
/// let area = Var::computed({
///     let (width, height) = (width.clone(), height.clone());
///     move |ctx| ctx.read(&width) * ctx.read(&height)
/// });
/// assert_eq!(area.get(), 40);
/// ```
pub struct VarContext {
    dependencies: Vec<Rc<dyn AnyVar>>,
}

impl VarContext {
    pub(crate) fn new() -> Self {
        Self {
            dependencies: Vec::with_capacity(2),
        }
    }

    /// Read a cell's value and record it as a dependency of the computation
    /// this context belongs to.
    ///
    /// Reading the same cell more than once in a pass records it once;
    /// recording order is the order of first read.
    pub fn read<T>(&mut self, var: &dyn ReadVar<T>) -> T {
        self.track(var.as_dep());
        var.get()
    }

    /// Number of distinct dependencies recorded so far.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    fn track(&mut self, dep: Rc<dyn AnyVar>) {
        if !self.dependencies.iter().any(|d| same_var(d, &dep)) {
            self.dependencies.push(dep);
        }
    }

    pub(crate) fn into_dependencies(self) -> Vec<Rc<dyn AnyVar>> {
        self.dependencies
    }
}

// =============================================================================
// TESTS
// =============================================================================
