//! Templates screen
//!
//! Category tabs, keyword search and a favorites filter over the built-in
//! and custom templates.

use crate::models::{BannerTemplate, TemplateCategory};
use crate::ui::state::AppState;
use crate::ui::theme::{to_color32, Theme};
use egui::{self, RichText, WidgetInfo, WidgetType};
use uuid::Uuid;

enum TemplateAction {
    Apply(Uuid),
    ToggleFavorite(Uuid),
    Delete(Uuid),
}

pub struct TemplateGrid<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> TemplateGrid<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        show_template_filters(self.state, ui);
        ui.add_space(self.theme.spacing_sm);

        let mut action = None;
        let catalog = self.state.store.catalog();
        let mut templates =
            catalog.filter(self.state.selected_category, &self.state.template_search);
        if self.state.favorites_only {
            templates.retain(|t| catalog.is_favorite(t.id));
        }

        if templates.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label(RichText::new("No templates found").color(self.theme.text_muted));
            });
        } else {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for template in templates {
                        let favorite = catalog.is_favorite(template.id);
                        if let Some(a) = self.show_card(ui, template, favorite) {
                            action = Some(a);
                        }
                        ui.add_space(self.theme.spacing_sm);
                    }
                });
        }

        match action {
            Some(TemplateAction::Apply(id)) => {
                self.state.apply_template(id);
            }
            Some(TemplateAction::ToggleFavorite(id)) => {
                self.state.store.toggle_favorite(id);
            }
            Some(TemplateAction::Delete(id)) => self.state.delete_template(id),
            None => {}
        }
    }

    fn show_card(
        &self,
        ui: &mut egui::Ui,
        template: &BannerTemplate,
        favorite: bool,
    ) -> Option<TemplateAction> {
        let mut action = None;
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    egui::Frame::none()
                        .fill(to_color32(template.style.background_color))
                        .rounding(self.theme.button_rounding)
                        .inner_margin(egui::vec2(8.0, 4.0))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(&template.style.text)
                                    .color(to_color32(template.style.text_color)),
                            );
                        });

                    ui.vertical(|ui| {
                        ui.label(RichText::new(&template.name).color(self.theme.text_primary));
                        ui.label(
                            RichText::new(format!(
                                "{} {} · {}",
                                template.category.icon(),
                                template.category.display_name(),
                                template.style.animation_type.display_name()
                            ))
                            .small()
                            .color(self.theme.text_muted),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if !template.is_built_in {
                            let delete = ui.button(RichText::new("🗑").color(self.theme.danger));
                            delete.widget_info(|| {
                                WidgetInfo::labeled(
                                    WidgetType::Button,
                                    true,
                                    format!("Delete {}", template.name),
                                )
                            });
                            if delete.clicked() {
                                action = Some(TemplateAction::Delete(template.id));
                            }
                        }

                        let (star, color) = if favorite {
                            ("★", self.theme.favorite)
                        } else {
                            ("☆", self.theme.text_muted)
                        };
                        let toggle = ui.button(RichText::new(star).color(color));
                        toggle.widget_info(|| {
                            WidgetInfo::selected(
                                WidgetType::Checkbox,
                                true,
                                favorite,
                                format!("Favorite {}", template.name),
                            )
                        });
                        if toggle.clicked() {
                            action = Some(TemplateAction::ToggleFavorite(template.id));
                        }

                        let apply = ui.button("Use");
                        apply.widget_info(|| {
                            WidgetInfo::labeled(
                                WidgetType::Button,
                                true,
                                format!("Use {}", template.name),
                            )
                        });
                        if apply.clicked() {
                            action = Some(TemplateAction::Apply(template.id));
                        }
                    });
                });
            });
        action
    }
}

/// Category tabs, search field and favorites toggle
pub fn show_template_filters(state: &mut AppState, ui: &mut egui::Ui) {
    ui.horizontal_wrapped(|ui| {
        for category in TemplateCategory::ALL {
            ui.selectable_value(
                &mut state.selected_category,
                category,
                format!("{} {}", category.icon(), category.display_name()),
            );
        }
    });
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.template_search)
                .hint_text("Search templates")
                .desired_width(240.0),
        );
        ui.checkbox(&mut state.favorites_only, "Favorites only");
    });
}
