pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;
pub mod ui;

pub use engines::{Snapshot, SnapshotEngine};
pub use error::{ConfluenceError, Result};
