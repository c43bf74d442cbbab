// ============================================================================
// revar - Event Module
// Typed event bus and the bridge into the cell graph
// ============================================================================

pub mod bridge;
pub mod bus;
