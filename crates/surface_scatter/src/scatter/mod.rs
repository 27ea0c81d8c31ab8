//! Scatter pipeline: request configuration, spacing, replication, events,
//! and the rejection-sampling runner.
pub mod events;
pub mod replicate;
pub mod request;
pub mod runner;
pub mod spacing;

/// Default attempt budget multiplier: a run gives up after
/// `count * DEFAULT_ATTEMPTS_MULTIPLIER` candidate draws.
pub const DEFAULT_ATTEMPTS_MULTIPLIER: usize = 40;
