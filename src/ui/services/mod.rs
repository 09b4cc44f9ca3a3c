pub mod snapshot_runner;

pub use snapshot_runner::{SnapshotResult, SnapshotRunner};
