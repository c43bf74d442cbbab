// ============================================================================
// revar - Ergonomic Macros
// ============================================================================

/// Helper macro to clone variables into a move closure.
///
/// This reduces the boilerplate of manually cloning `Rc` or `Var` handles
/// before moving them into a binding computation.
///
/// # Usage
///
/// ```rust
/// use revar::{cloned, computed, var};
///
/// let a = var(1);
/// let b = var(2);
///
/// let sum = computed(cloned!(a, b => move |ctx| ctx.read(&a) + ctx.read(&b)));
/// assert_eq!(sum.get(), 3);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}

/// Create a computed cell with automatic variable capturing.
///
/// Wraps `computed(cloned!(... => move |ctx| ...))`.
///
/// # Usage
///
/// ```rust
/// use revar::{computed, var};
/// let a = var(1);
/// let b = var(2);
///
/// // Clean syntax: list captures => |ctx| expression
/// let sum = revar::computed!(a, b => |ctx| ctx.read(&a) + ctx.read(&b));
/// assert_eq!(sum.get(), 3);
///
/// a.set(10);
/// assert_eq!(sum.get(), 12);
/// ```
#[macro_export]
macro_rules! computed {
    // Case 1: With captured handles
    ($($deps:ident),+ => |$ctx:ident| $body:expr) => {
        $crate::computed($crate::cloned!($($deps),+ => move |$ctx: &mut $crate::VarContext| $body))
    };
    // Case 2: No captures (just the computation)
    (|$ctx:ident| $body:expr) => {
        $crate::computed(move |$ctx: &mut $crate::VarContext| $body)
    };
}

#[cfg(test)]
mod tests {
    use crate::var;

    #[test]
    fn cloned_leaves_the_originals_usable() {
        let a = var(1);
        let closure = cloned!(a => move || a.get());

        a.set(2);
        assert_eq!(closure(), 2);
        assert_eq!(a.get(), 2);
    }

    #[test]
    fn computed_macro_tracks_captures() {
        let width = var(3);
        let height = var(4);
        let area = computed!(width, height => |ctx| ctx.read(&width) * ctx.read(&height));

        assert_eq!(area.get(), 12);

        width.set(10);
        assert_eq!(area.get(), 40);
    }

    #[test]
    fn computed_macro_without_captures() {
        let constant = computed!(|_ctx| 99);
        assert_eq!(constant.get(), 99);
    }
}
