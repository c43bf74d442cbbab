// ============================================================================
// revar - Specialized Primitive Cells
// Concrete wrappers over Var<T> for the primitive value types, with the
// equality strategy and arithmetic helpers appropriate to each
// ============================================================================

use std::fmt;
use std::rc::Rc;

use crate::core::context::VarContext;
use crate::core::types::{AnyVar, ChangeListener, ReadVar};
use crate::primitives::var::Var;
use crate::reactivity::equality::{equals, safe_equals_f32, safe_equals_f64};

/// Generates a concrete cell type wrapping `Var<$ty>` with the full mutation
/// and listener surface, pinned to the given equality function.
macro_rules! specialized_var {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $equals:expr) => {
        $(#[$meta])*
        pub struct $name {
            cell: Var<$ty>,
        }

        impl $name {
            pub fn new(item: $ty) -> Self {
                Self {
                    cell: Var::new_with_equals(item, $equals),
                }
            }

            /// Create a cell bound to a computation, evaluated lazily.
            pub fn computed<F>(computation: F) -> Self
            where
                F: Fn(&mut VarContext) -> $ty + 'static,
            {
                Self {
                    cell: Var::computed_with_equals(computation, $equals),
                }
            }

            pub fn get(&self) -> $ty {
                self.cell.get()
            }

            pub fn set(&self, item: $ty) {
                self.cell.set(item);
            }

            pub fn bind<F>(&self, computation: F)
            where
                F: Fn(&mut VarContext) -> $ty + 'static,
            {
                self.cell.bind(computation);
            }

            pub fn eager_bind<F>(&self, computation: F) -> $ty
            where
                F: Fn(&mut VarContext) -> $ty + 'static,
            {
                self.cell.eager_bind(computation)
            }

            pub fn bind_var<V>(&self, source: V)
            where
                V: ReadVar<$ty> + 'static,
            {
                self.cell.bind_var(source);
            }

            pub fn side_effecting<F>(&self, item: $ty, func: F)
            where
                F: Fn(&mut VarContext, &mut $ty) + 'static,
            {
                self.cell.side_effecting(item, func);
            }

            pub fn invalidate(&self) {
                self.cell.invalidate();
            }

            pub fn add_listener(&self, listener: Rc<dyn ChangeListener>) {
                self.cell.add_listener(listener);
            }

            pub fn add_listener_fn<F>(&self, callback: F) -> Rc<dyn ChangeListener>
            where
                F: Fn(&dyn AnyVar) + 'static,
            {
                self.cell.add_listener_fn(callback)
            }

            pub fn remove_listener(&self, listener: &Rc<dyn ChangeListener>) {
                self.cell.remove_listener(listener);
            }

            pub fn listener_count(&self) -> usize {
                self.cell.listener_count()
            }

            /// The underlying generic cell, for APIs that take `Var<T>`.
            pub fn as_var(&self) -> &Var<$ty> {
                &self.cell
            }
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                Self {
                    cell: self.cell.clone(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(<$ty>::default())
            }
        }

        impl ReadVar<$ty> for $name {
            fn get(&self) -> $ty {
                self.cell.get()
            }

            fn as_dep(&self) -> Rc<dyn AnyVar> {
                self.cell.as_dep()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("value", &self.get())
                    .finish()
            }
        }
    };
}

/// Increment/decrement helpers for the integer cells. Arithmetic wraps on
/// overflow in release mode like plain integer arithmetic does.
macro_rules! integer_helpers {
    ($name:ident, $ty:ty) => {
        impl $name {
            pub fn increment_and_get(&self) -> $ty {
                let next = self.get() + 1;
                self.set(next);
                next
            }

            pub fn get_and_increment(&self) -> $ty {
                let current = self.get();
                self.set(current + 1);
                current
            }

            pub fn decrement_and_get(&self) -> $ty {
                let next = self.get() - 1;
                self.set(next);
                next
            }

            pub fn get_and_decrement(&self) -> $ty {
                let current = self.get();
                self.set(current - 1);
                current
            }
        }
    };
}

macro_rules! negate_helper {
    ($name:ident, $ty:ty) => {
        impl $name {
            /// Negate the current value and return the result.
            pub fn negate(&self) -> $ty {
                let next = -self.get();
                self.set(next);
                next
            }
        }
    };
}

specialized_var!(
    /// An `i32` cell with strict equality.
    IntVar,
    i32,
    equals
);

specialized_var!(
    /// An `i64` cell with strict equality.
    LongVar,
    i64,
    equals
);

specialized_var!(
    /// An `f32` cell with NaN-safe equality: setting NaN over NaN does not
    /// notify.
    FloatVar,
    f32,
    safe_equals_f32
);

specialized_var!(
    /// An `f64` cell with NaN-safe equality: setting NaN over NaN does not
    /// notify.
    DoubleVar,
    f64,
    safe_equals_f64
);

specialized_var!(
    /// A `bool` cell.
    BoolVar,
    bool,
    equals
);

specialized_var!(
    /// A `char` cell.
    CharVar,
    char,
    equals
);

integer_helpers!(IntVar, i32);
integer_helpers!(LongVar, i64);

negate_helper!(IntVar, i32);
negate_helper!(LongVar, i64);
negate_helper!(FloatVar, f32);
negate_helper!(DoubleVar, f64);

impl BoolVar {
    /// Invert the current value and return the result.
    pub fn invert(&self) -> bool {
        let next = !self.get();
        self.set(next);
        next
    }
}
