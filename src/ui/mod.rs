mod app;
mod panels;
mod services;
mod state;
mod widgets;

pub use app::ConfluenceApp;
pub use services::{SnapshotResult, SnapshotRunner};
pub use state::AppState;
