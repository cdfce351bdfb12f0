//! Settings screen: usage statistics, data export and reset, premium info

use crate::premium::{lifetime_products, PremiumFeature};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct SettingsPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.card(ui, "Usage", |panel, ui| panel.show_statistics(ui));
                self.card(ui, "Data", |panel, ui| panel.show_data_actions(ui));
                self.card(ui, "Premium", |panel, ui| panel.show_premium(ui));
            });
    }

    fn card(&mut self, ui: &mut egui::Ui, title: &str, add: impl FnOnce(&mut Self, &mut egui::Ui)) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).strong().color(self.theme.text_primary));
                ui.separator();
                add(self, ui);
            });
        ui.add_space(self.theme.spacing_sm);
    }

    fn show_statistics(&mut self, ui: &mut egui::Ui) {
        let stats = self.state.store.usage_statistics();
        egui::Grid::new("usage_stats")
            .num_columns(2)
            .spacing([20.0, 4.0])
            .show(ui, |ui| {
                self.stat_row(ui, "History entries", stats.history_count);
                self.stat_row(ui, "Custom templates", stats.custom_template_count);
                self.stat_row(ui, "Favorites", stats.favorite_count);
                self.stat_row(
                    ui,
                    "Background images",
                    self.state.store.list_background_images().len(),
                );
            });
    }

    fn stat_row(&self, ui: &mut egui::Ui, label: &str, value: usize) {
        ui.label(RichText::new(label).color(self.theme.text_secondary));
        ui.label(
            RichText::new(value.to_string())
                .family(egui::FontFamily::Monospace)
                .color(self.theme.text_primary),
        );
        ui.end_row();
    }

    fn show_data_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let can_export = self.state.gate.can_use(PremiumFeature::ExportFeatures);
            if ui
                .add_enabled(can_export, egui::Button::new("Copy export"))
                .on_hover_text("Copy history, templates and favorites as JSON")
                .clicked()
            {
                if let Some(json) = self.state.store.export_user_data() {
                    ui.ctx().copy_text(json);
                    self.state.status = Some("Export copied to clipboard".to_string());
                }
            }

            let reset = egui::Button::new(RichText::new("Reset all data").color(self.theme.danger));
            if ui.add(reset).clicked() {
                self.state.reset_all_data();
            }
        });
        ui.label(
            RichText::new(format!("Data folder: {}", self.state.config.data_dir.display()))
                .small()
                .color(self.theme.text_muted),
        );
    }

    fn show_premium(&mut self, ui: &mut egui::Ui) {
        let status = self.state.gate.status();
        ui.label(RichText::new(status.description()).color(self.theme.text_secondary));
        ui.add_space(self.theme.spacing_sm);

        for feature in PremiumFeature::ALL {
            let unlocked = self.state.gate.can_use(feature);
            ui.horizontal(|ui| {
                ui.label(feature.icon());
                ui.label(RichText::new(feature.display_name()).color(self.theme.text_primary));
                ui.label(
                    RichText::new(feature.description())
                        .small()
                        .color(self.theme.text_muted),
                );
                if !unlocked {
                    ui.label(RichText::new("🔒").color(self.theme.text_muted));
                }
            });
        }

        if !status.is_active() {
            for product in lifetime_products() {
                ui.add_space(self.theme.spacing_sm);
                ui.label(
                    RichText::new(format!("{}  {}", product.display_name, product.price))
                        .strong()
                        .color(self.theme.primary),
                );
                ui.label(
                    RichText::new(&product.description)
                        .small()
                        .color(self.theme.text_muted),
                );
            }
        }
    }
}
