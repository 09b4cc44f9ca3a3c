pub mod scheduler;
pub mod snapshot;

pub use scheduler::{RefreshScheduler, TickDecision};
pub use snapshot::{
    format_score, format_signed_pct, AbsentReason, Snapshot, SnapshotEngine, TimeframeReading,
};
