// ============================================================================
// revar - Reactivity Module
// Listener registries, invalidation propagation, and equality strategies
// ============================================================================

pub mod equality;
pub mod listeners;
