use crate::engines::pipeline::format_signed_pct;
use crate::ui::state::AppState;

pub struct RightPanel;

impl RightPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState) {
        ui.heading("Timeframe Details");
        ui.separator();

        let Some(snapshot) = &state.snapshot else {
            ui.label("Details appear after the first refresh");
            return;
        };

        egui::Grid::new("timeframe_grid")
            .num_columns(4)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("TF");
                ui.strong("Interval");
                ui.strong("Bars");
                ui.strong("vs EMA");
                ui.end_row();

                for reading in &snapshot.timeframes {
                    ui.label(reading.label.as_str());
                    ui.label(format!("{} / {}", reading.interval, reading.period));
                    ui.label(reading.bars.to_string());
                    match (&reading.deviation, &reading.absent_reason) {
                        (Some(value), _) => {
                            ui.label(format_signed_pct(Some(*value)));
                        }
                        (None, Some(reason)) => {
                            ui.label("N/A").on_hover_text(reason.to_string());
                        }
                        (None, None) => {
                            ui.label("N/A");
                        }
                    }
                    ui.end_row();
                }
            });

        ui.separator();
        ui.collapsing("Previous Day Levels", |ui| match &snapshot.bias_levels {
            Some(levels) => {
                ui.label(format!("PDH: {:.2}", levels.prev_high));
                ui.label(format!("PDL: {:.2}", levels.prev_low));
                ui.label(format!("Close: {:.2}", levels.current_close));
            }
            None => {
                ui.label("Not enough daily bars");
            }
        });
    }
}
