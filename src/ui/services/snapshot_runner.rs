use crate::engines::{Snapshot, SnapshotEngine};
use chrono::Local;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Result from a snapshot cycle
pub type SnapshotResult = Result<Snapshot, String>;

/// One refresh cycle running off the UI thread.
pub struct SnapshotRunner {
    market: String,
    handle: Option<JoinHandle<SnapshotResult>>,
}

impl SnapshotRunner {
    pub fn start(engine: Arc<SnapshotEngine>, market: String) -> Result<Self, String> {
        let thread_market = market.clone();
        let handle = thread::Builder::new()
            .name("snapshot".to_string())
            .spawn(move || {
                engine
                    .compute_snapshot(&thread_market, Local::now())
                    .map_err(|e| e.to_string())
            })
            .map_err(|e| format!("Failed to spawn snapshot thread: {}", e))?;

        Ok(Self {
            market,
            handle: Some(handle),
        })
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    /// Check if the cycle is complete and take its result
    pub fn try_get_result(&mut self) -> Option<SnapshotResult> {
        let handle = self.handle.take()?;
        if handle.is_finished() {
            match handle.join() {
                Ok(result) => Some(result),
                Err(_) => Some(Err("Snapshot thread panicked".to_string())),
            }
        } else {
            // Not finished yet, put handle back
            self.handle = Some(handle);
            None
        }
    }
}
