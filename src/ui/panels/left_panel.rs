use crate::ui::state::AppState;

/// User requests raised by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    MarketChanged,
    RefreshRequested,
}

pub struct LeftPanel;

impl LeftPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) -> Option<PanelAction> {
        let mut action = None;

        ui.heading("Market");
        ui.separator();

        let previous = state.selected_market.clone();
        egui::ComboBox::from_id_salt("market_selector")
            .selected_text(state.selected_market.as_str())
            .show_ui(ui, |ui| {
                for name in &state.markets {
                    ui.selectable_value(&mut state.selected_market, name.clone(), name.as_str());
                }
            });
        if state.selected_market != previous {
            action = Some(PanelAction::MarketChanged);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let button = ui.add_enabled(!state.is_running, egui::Button::new("Refresh now"));
            if button.clicked() {
                action = Some(PanelAction::RefreshRequested);
            }
            if state.is_running {
                ui.spinner();
            }
        });

        ui.separator();
        Self::show_status(ui, state);

        action
    }

    fn show_status(ui: &mut egui::Ui, state: &AppState) {
        ui.label(format!("Source: {}", state.source_name));
        ui.label(format!("Auto-refresh: every {}s", state.refresh_interval_secs));
        if state.coalesced_ticks > 0 {
            ui.label(format!("Skipped ticks: {}", state.coalesced_ticks));
        }
        ui.label(state.status_message.as_str());

        if let Some(error) = &state.last_error {
            ui.colored_label(egui::Color32::LIGHT_RED, error.as_str());
        }
    }
}
