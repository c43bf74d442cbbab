// ============================================================================
// revar - Equality Functions
// Comparison strategies used by set() to suppress redundant notifications
// ============================================================================

// =============================================================================
// STRICT EQUALITY (Default)
// =============================================================================

/// Strict equality using PartialEq. This is the default for `Var::new`.
///
/// # Example
/// ```
/// use revar::reactivity::equality::equals;
///
/// assert!(equals(&42, &42));
/// assert!(!equals(&42, &43));
/// ```
pub fn equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Treat every pair of values as different: every `set` notifies, even with
/// an equal value. Useful for types without a meaningful PartialEq, or when
/// a value is mutated in place and updates must always propagate.
pub fn never_equals<T>(_: &T, _: &T) -> bool {
    false
}

/// Treat every pair of values as equal: `set` never replaces the value on a
/// constant cell. Mostly useful in tests.
pub fn always_equals<T>(_: &T, _: &T) -> bool {
    true
}

// =============================================================================
// SAFE FLOAT EQUALITY (Handles NaN)
// =============================================================================

/// Not-equal check for f64 treating NaN == NaN as true (unlike IEEE 754), so
/// repeatedly setting NaN does not notify every time.
///
/// # Example
/// ```
/// use revar::reactivity::equality::safe_not_equal_f64;
///
/// assert!(safe_not_equal_f64(&1.0, &2.0));
/// assert!(!safe_not_equal_f64(&1.0, &1.0));
/// assert!(!safe_not_equal_f64(&f64::NAN, &f64::NAN));
/// assert!(safe_not_equal_f64(&f64::NAN, &1.0));
/// ```
pub fn safe_not_equal_f64(a: &f64, b: &f64) -> bool {
    if a.is_nan() {
        return !b.is_nan();
    }
    a != b
}

/// NaN-safe equality for f64. Used by `DoubleVar`.
pub fn safe_equals_f64(a: &f64, b: &f64) -> bool {
    !safe_not_equal_f64(a, b)
}

/// Not-equal check for f32 treating NaN == NaN as true.
pub fn safe_not_equal_f32(a: &f32, b: &f32) -> bool {
    if a.is_nan() {
        return !b.is_nan();
    }
    a != b
}

/// NaN-safe equality for f32. Used by `FloatVar`.
pub fn safe_equals_f32(a: &f32, b: &f32) -> bool {
    !safe_not_equal_f32(a, b)
}

// =============================================================================
// TESTS
// =============================================================================
