//! History screen
//!
//! Newest first, with keyword search. Tapping "Use" loads the entry back
//! into the editor.

use crate::models::BannerHistory;
use crate::ui::state::AppState;
use crate::ui::theme::{to_color32, Theme};
use egui::{self, RichText, WidgetInfo, WidgetType};
use uuid::Uuid;

enum HistoryAction {
    Apply(Uuid),
    Delete(Uuid),
    ClearAll,
}

pub struct HistoryList<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> HistoryList<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.state.history_search)
                    .hint_text("Search history")
                    .desired_width(240.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let enabled = !self.state.store.history().is_empty();
                if ui
                    .add_enabled(enabled, egui::Button::new("Clear all"))
                    .clicked()
                {
                    action = Some(HistoryAction::ClearAll);
                }
            });
        });
        ui.add_space(self.theme.spacing_sm);

        let entries = self.state.store.search_history(&self.state.history_search);
        if entries.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                let message = if self.state.store.history().is_empty() {
                    "Banners you show will appear here"
                } else {
                    "No matching banners"
                };
                ui.label(RichText::new(message).color(self.theme.text_muted));
            });
        } else {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for entry in entries {
                        if let Some(a) = self.show_entry(ui, entry) {
                            action = Some(a);
                        }
                        ui.add_space(self.theme.spacing_sm);
                    }
                });
        }

        match action {
            Some(HistoryAction::Apply(id)) => {
                self.state.apply_history(id);
            }
            Some(HistoryAction::Delete(id)) => self.state.store.delete_history(id),
            Some(HistoryAction::ClearAll) => self.state.store.clear_all_history(),
            None => {}
        }
    }

    fn show_entry(&self, ui: &mut egui::Ui, entry: &BannerHistory) -> Option<HistoryAction> {
        let mut action = None;
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    // preview chip in the banner's own colors
                    egui::Frame::none()
                        .fill(to_color32(entry.style.background_color))
                        .rounding(self.theme.button_rounding)
                        .inner_margin(egui::vec2(8.0, 4.0))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(truncate(&entry.text, 24))
                                    .color(to_color32(entry.style.text_color)),
                            );
                        });

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(entry.style.animation_type.display_name())
                                .small()
                                .color(self.theme.text_secondary),
                        );
                        ui.label(
                            RichText::new(
                                entry
                                    .timestamp
                                    .with_timezone(&chrono::Local)
                                    .format("%Y-%m-%d %H:%M")
                                    .to_string(),
                            )
                            .small()
                            .color(self.theme.text_muted),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = ui.button(RichText::new("🗑").color(self.theme.danger));
                        delete.widget_info(|| {
                            WidgetInfo::labeled(
                                WidgetType::Button,
                                true,
                                format!("Delete {}", entry.text),
                            )
                        });
                        if delete.clicked() {
                            action = Some(HistoryAction::Delete(entry.id));
                        }

                        let apply = ui.button("Use");
                        apply.widget_info(|| {
                            WidgetInfo::labeled(WidgetType::Button, true, format!("Use {}", entry.text))
                        });
                        if apply.clicked() {
                            action = Some(HistoryAction::Apply(entry.id));
                        }
                    });
                });
            });
        action
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max_chars).collect();
        short.push('…');
        short
    }
}
