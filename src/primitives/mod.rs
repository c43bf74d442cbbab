// ============================================================================
// revar - Primitives Module
// The cell types: generic Var, immutable ConstVar, and the specialized
// primitive wrappers
// ============================================================================

pub mod const_var;
pub mod specialized;
pub mod var;
