// ============================================================================
// revar - Reactive Variable Cells for Rust
// ============================================================================
//
// Lazily-recomputed, automatically-invalidated value cells.
//
// A cell holds a value determined by its binding: a plain constant, a pure
// computation over other cells, or a side-effecting computation that reuses
// its previous result. Reading a cell inside a computation registers a
// dependency edge; changing a cell pushes invalidation (not values) through
// those edges, and stale cells recompute lazily on their next read. Deferring
// recomputation to read time is what keeps diamond-shaped graphs glitch-free:
// no dependent ever observes a half-propagated state, and each change
// recomputes each dependent at most once.
//
// The graph is single-threaded. Cells are cheap cloneable handles over
// Rc-backed state; dependency edges hold only weak back-references, so
// dropping every handle to a dependent cell frees it even while its
// dependencies live on.
// ============================================================================

pub mod core;
pub mod event;
pub mod primitives;
pub mod reactivity;

#[macro_use]
mod macros;

// Re-export core items at crate root for ergonomic access
pub use crate::core::context::VarContext;
pub use crate::core::types::{AnyVar, ChangeListener, EqualsFn, ReadVar, default_equals};

// Re-export the cell types and creation functions
pub use crate::primitives::const_var::{ConstVar, const_var};
pub use crate::primitives::specialized::{BoolVar, CharVar, DoubleVar, FloatVar, IntVar, LongVar};
pub use crate::primitives::var::{ComputeFn, SideEffectingFn, Var, computed, var};

// Re-export listener adapters and equality functions
pub use crate::reactivity::equality::{
    always_equals, equals, never_equals, safe_equals_f32, safe_equals_f64, safe_not_equal_f32,
    safe_not_equal_f64,
};
pub use crate::reactivity::listeners::{OneTimeListener, listener};

// Re-export the event bus and its bridge into the cell graph
pub use crate::event::bridge::{EventVar, once_into_var};
pub use crate::event::bus::{EventBus, EventListener, handler, one_time};

// =============================================================================
// TESTS
// =============================================================================
