use super::panels::{LeftPanel, MainPanel, PanelAction, RightPanel};
use super::services::{SnapshotResult, SnapshotRunner};
use super::state::AppState;
use crate::config::AppConfig;
use crate::engines::{RefreshScheduler, SnapshotEngine, TickDecision};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often to check on a running cycle.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct ConfluenceApp {
    state: AppState,
    engine: Arc<SnapshotEngine>,
    scheduler: RefreshScheduler,
    runner: Option<SnapshotRunner>,
    left_panel: LeftPanel,
    main_panel: MainPanel,
    right_panel: RightPanel,
}

impl ConfluenceApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, engine: Arc<SnapshotEngine>, config: &AppConfig) -> Self {
        let markets = engine.catalog().names().into_iter().map(String::from).collect();
        let mut state = AppState::new(markets, config.dashboard.default_market.clone());
        state.source_name = engine.source_name().to_string();
        state.refresh_interval_secs = config.dashboard.refresh_interval_secs;

        Self {
            state,
            engine,
            scheduler: RefreshScheduler::new(config.dashboard.refresh_interval()),
            runner: None,
            left_panel: LeftPanel::new(),
            main_panel: MainPanel::new(),
            right_panel: RightPanel::new(),
        }
    }

    fn collect_result(&mut self) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };
        let Some(result) = runner.try_get_result() else {
            return;
        };
        let market = runner.market().to_string();
        self.runner = None;
        self.state.is_running = false;
        self.apply_result(&market, result);
    }

    fn apply_result(&mut self, market: &str, result: SnapshotResult) {
        match result {
            Ok(snapshot) => {
                self.state.status_message = format!("{} updated", market);
                self.state.last_error = None;
                self.state.snapshot = Some(snapshot);
            }
            Err(e) => {
                log::error!("Refresh for {} failed: {}", market, e);
                self.state.status_message = format!("{} refresh failed", market);
                self.state.last_error = Some(e);
            }
        }
        if market != self.state.selected_market {
            // selection moved on while this cycle ran
            self.scheduler.request_now();
        }
    }

    fn start_cycle(&mut self) {
        let market = self.state.selected_market.clone();
        match SnapshotRunner::start(Arc::clone(&self.engine), market.clone()) {
            Ok(runner) => {
                self.runner = Some(runner);
                self.state.is_running = true;
                self.state.status_message = format!("Refreshing {}...", market);
            }
            Err(e) => {
                log::error!("{}", e);
                self.state.last_error = Some(e);
            }
        }
    }

    fn drive_scheduler(&mut self, ctx: &egui::Context) {
        match self.scheduler.poll(Instant::now(), self.runner.is_some()) {
            TickDecision::Fire => self.start_cycle(),
            TickDecision::Wait(remaining) => ctx.request_repaint_after(remaining),
            TickDecision::Coalesced => {
                self.state.coalesced_ticks = self.scheduler.coalesced_ticks();
            }
        }
        if self.runner.is_some() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}

impl eframe::App for ConfluenceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_result();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Confluence Summary");
        });

        let mut action = None;
        egui::SidePanel::left("left_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                action = self.left_panel.show(ui, &mut self.state);
            });

        egui::SidePanel::right("right_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.right_panel.show(ui, &self.state);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.main_panel.show(ui, &self.state);
            });
        });

        match action {
            Some(PanelAction::MarketChanged) => {
                log::info!("Market changed to {}", self.state.selected_market);
                self.scheduler.request_now();
            }
            Some(PanelAction::RefreshRequested) => self.scheduler.request_now(),
            None => {}
        }
        self.drive_scheduler(ctx);
    }
}
