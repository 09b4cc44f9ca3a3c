use crate::engines::pipeline::{format_score, format_signed_pct};
use crate::types::MarketBias;
use crate::ui::state::AppState;
use crate::ui::widgets::{MetricBox, ValueBox};
use egui::{Color32, RichText};

const SCORE_COLOR: Color32 = Color32::from_rgb(0x00, 0xff, 0x00);

pub struct MainPanel;

impl MainPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState) {
        let Some(snapshot) = &state.snapshot else {
            ui.centered_and_justified(|ui| {
                ui.label("No data yet");
            });
            return;
        };

        ui.label(
            RichText::new(format!(
                "Last Updated: {}",
                snapshot.timestamp.format("%Y-%m-%d %H:%M:%S")
            ))
            .strong(),
        );
        if state.is_stale() {
            ui.label(RichText::new(format!("Showing {} while loading", snapshot.market.display_name)).weak());
        }

        ui.add_space(8.0);
        ui.heading(format!("EMA Bias / Timeframes (vs {} EMA)", snapshot.ema_span));
        ui.columns(4, |columns| {
            MetricBox::show(&mut columns[0], "Weekly", &format_signed_pct(snapshot.weekly_deviation));
            MetricBox::show(&mut columns[1], "Daily", &format_signed_pct(snapshot.daily_deviation));
            MetricBox::show(&mut columns[2], "4H", &format_signed_pct(snapshot.four_hour_deviation));
            MetricBox::show(
                &mut columns[3],
                "2H,1H,30M,15M",
                &format_signed_pct(snapshot.intraday_average),
            );
        });

        ui.add_space(8.0);
        ui.heading("Market Bias");
        ValueBox::show(ui, &snapshot.market_bias.to_string(), bias_color(snapshot.market_bias));

        ui.add_space(8.0);
        ui.heading("Total Overall Score");
        ValueBox::show(ui, &format_score(snapshot.confluence_score), SCORE_COLOR);

        ui.add_space(8.0);
        ui.columns(2, |columns| {
            columns[0].heading("Session Context");
            ValueBox::show(&mut columns[0], &snapshot.session.to_string(), Color32::WHITE);
            columns[1].heading("Trade Bias / Suggestion");
            ValueBox::show(&mut columns[1], &snapshot.trade_suggestion.to_string(), Color32::WHITE);
        });
    }
}

fn bias_color(bias: MarketBias) -> Color32 {
    match bias {
        MarketBias::Bullish => Color32::from_rgb(0xad, 0xd8, 0xe6),
        MarketBias::Bearish => Color32::from_rgb(0xc3, 0x9b, 0xd3),
        MarketBias::Ranging => Color32::from_rgb(0xff, 0xa5, 0x00),
        MarketBias::Unknown => Color32::WHITE,
    }
}
