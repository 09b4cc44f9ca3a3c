pub mod pipeline;
pub mod signals;

pub use pipeline::{RefreshScheduler, Snapshot, SnapshotEngine, TickDecision};
