use crate::engines::Snapshot;

/// Central application state for the UI
pub struct AppState {
    // Selection
    pub markets: Vec<String>,
    pub selected_market: String,

    // Execution State
    pub is_running: bool,
    pub status_message: String,
    pub last_error: Option<String>,
    pub coalesced_ticks: u64,

    // Results
    pub snapshot: Option<Snapshot>,

    // Display
    pub source_name: String,
    pub refresh_interval_secs: u64,
}

impl AppState {
    pub fn new(markets: Vec<String>, selected_market: String) -> Self {
        Self {
            markets,
            selected_market,
            is_running: false,
            status_message: "Waiting for first refresh".to_string(),
            last_error: None,
            coalesced_ticks: 0,
            snapshot: None,
            source_name: String::new(),
            refresh_interval_secs: 60,
        }
    }

    /// The snapshot on screen belongs to a market other than the selected one.
    pub fn is_stale(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.market.display_name != self.selected_market)
    }
}
