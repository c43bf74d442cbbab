// ============================================================================
// revar - Core Module
// Type-erased graph traits and the dependency-tracking context
// ============================================================================

pub mod context;
pub mod types;
