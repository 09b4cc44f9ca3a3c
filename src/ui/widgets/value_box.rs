use egui::{Color32, RichText};

const BOX_BACKGROUND: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);

/// Dark rounded box with one centred, bold value.
pub struct ValueBox;

impl ValueBox {
    pub fn show(ui: &mut egui::Ui, text: &str, color: Color32) {
        egui::Frame::new()
            .fill(BOX_BACKGROUND)
            .inner_margin(egui::Margin::same(15))
            .corner_radius(5.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(text).strong().size(18.0).color(color));
                });
            });
    }
}

/// Label on top, large value underneath.
pub struct MetricBox;

impl MetricBox {
    pub fn show(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(label).weak());
            ui.label(RichText::new(value).strong().size(24.0));
        });
    }
}
