//! Compose screen: text input and style controls
//!
//! Edits `AppState::draft` in place; nothing is persisted until the banner
//! is shown or saved as a template.

use crate::models::{AnimationType, BackgroundType, FontStyle, Rgba, TemplateCategory, MAX_TEXT_CHARS};
use crate::premium::PremiumFeature;
use crate::ui::app::screen_size;
use crate::ui::components::banner_view::EguiTextMeasure;
use crate::ui::state::AppState;
use crate::ui::theme::{from_color32, to_color32, Theme};
use egui::{self, Color32, RichText};
use std::path::PathBuf;

pub struct StyleForm<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> StyleForm<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.show_text_input(ui);
                ui.add_space(self.theme.spacing);
                self.section(ui, "Text", |form, ui| form.show_text_controls(ui));
                self.section(ui, "Background", |form, ui| form.show_background_controls(ui));
                self.section(ui, "Animation", |form, ui| form.show_animation_controls(ui));
                self.section(ui, "Save as template", |form, ui| form.show_template_controls(ui));
            });
    }

    fn section(&mut self, ui: &mut egui::Ui, title: &str, add: impl FnOnce(&mut Self, &mut egui::Ui)) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).strong().color(self.theme.text_primary));
                ui.add_space(self.theme.spacing_sm);
                add(self, ui);
            });
        ui.add_space(self.theme.spacing_sm);
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.state.draft.text)
                .hint_text("What do you want to say?")
                .char_limit(MAX_TEXT_CHARS)
                .desired_rows(2)
                .desired_width(f32::INFINITY)
                .font(egui::TextStyle::Heading),
        );
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Banner text")
        });

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!(
                    "{}/{}",
                    self.state.draft.text.chars().count(),
                    MAX_TEXT_CHARS
                ))
                .small()
                .color(self.theme.text_muted),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let show = egui::Button::new(RichText::new("Show banner").strong())
                    .fill(self.theme.primary)
                    .rounding(self.theme.button_rounding);
                if ui.add(show).clicked() {
                    let ctx = ui.ctx().clone();
                    let measure = EguiTextMeasure::new(&ctx);
                    self.state.show_banner(screen_size(&ctx), &measure);
                }
                if ui.button("Reset").on_hover_text("Back to the default style").clicked() {
                    self.state.reset_draft();
                }
            });
        });
    }

    fn show_text_controls(&mut self, ui: &mut egui::Ui) {
        let limits = self.state.config.style_limits();
        let custom_fonts = self.state.gate.can_use(PremiumFeature::CustomFonts);
        let draft = &mut self.state.draft;

        egui::Grid::new("text_controls")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                ui.label("Size");
                ui.add(egui::Slider::new(
                    &mut draft.font_size,
                    limits.min_font_size..=limits.max_font_size,
                ));
                ui.end_row();

                ui.label("Color");
                color_row(ui, &mut draft.text_color);
                ui.end_row();

                ui.label("Bold");
                ui.checkbox(&mut draft.is_bold, "");
                ui.end_row();

                ui.label("Style");
                ui.horizontal(|ui| {
                    for style in FontStyle::ALL {
                        let enabled = custom_fonts || style == FontStyle::Normal;
                        ui.add_enabled_ui(enabled, |ui| {
                            ui.selectable_value(&mut draft.font_style, style, style.display_name())
                                .on_hover_text(style.description());
                        });
                    }
                });
                ui.end_row();
            });
    }

    fn show_background_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for kind in BackgroundType::ALL {
                ui.selectable_value(
                    &mut self.state.draft.background_type,
                    kind,
                    kind.display_name(),
                );
            }
        });

        match self.state.draft.background_type {
            BackgroundType::Color => {
                ui.horizontal(|ui| {
                    ui.label("Color");
                    color_row(ui, &mut self.state.draft.background_color);
                });
            }
            BackgroundType::Image => self.show_image_controls(ui),
        }
    }

    fn show_image_controls(&mut self, ui: &mut egui::Ui) {
        if let Some(path) = self.state.draft.background_image_path.clone() {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&path).small().color(self.theme.text_secondary));
                if !self.state.store.background_image_exists(&path) {
                    ui.label(RichText::new("missing").small().color(self.theme.danger));
                }
                if ui.small_button("Remove").clicked() {
                    self.state.clear_background_image();
                }
            });
            ui.add(
                egui::Slider::new(&mut self.state.draft.background_image_opacity, 0.0..=1.0)
                    .text("Opacity"),
            );
        }

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.state.image_path_input)
                    .hint_text("Path to a picture")
                    .desired_width(240.0),
            );
            let can_import = !self.state.image_path_input.trim().is_empty();
            if ui.add_enabled(can_import, egui::Button::new("Import")).clicked() {
                let path = PathBuf::from(self.state.image_path_input.trim());
                if self.state.import_background_from_path(&path) {
                    self.state.image_path_input.clear();
                }
            }
        });
        ui.label(
            RichText::new("Tip: drop an image file onto the window")
                .small()
                .color(self.theme.text_muted),
        );
    }

    fn show_animation_controls(&mut self, ui: &mut egui::Ui) {
        let advanced = self.state.gate.can_use(PremiumFeature::AdvancedAnimations);
        let limits = self.state.config.style_limits();
        let draft = &mut self.state.draft;

        ui.horizontal_wrapped(|ui| {
            for kind in AnimationType::ALL {
                let enabled = advanced || !kind.is_animated() || kind == AnimationType::Scroll;
                ui.add_enabled_ui(enabled, |ui| {
                    ui.selectable_value(&mut draft.animation_type, kind, kind.display_name())
                        .on_hover_text(kind.description());
                });
            }
        });

        if draft.animation_type.is_animated() {
            ui.add(
                egui::Slider::new(
                    &mut draft.animation_speed,
                    limits.min_animation_speed..=limits.max_animation_speed,
                )
                .text("Speed")
                .suffix("×"),
            );
        }
    }

    fn show_template_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.state.new_template_name)
                    .hint_text("Template name")
                    .desired_width(180.0),
            );

            egui::ComboBox::from_id_salt("new_template_category")
                .selected_text(self.state.new_template_category.display_name())
                .show_ui(ui, |ui| {
                    for category in TemplateCategory::ALL.into_iter().skip(1) {
                        ui.selectable_value(
                            &mut self.state.new_template_category,
                            category,
                            format!("{} {}", category.icon(), category.display_name()),
                        );
                    }
                });

            if ui.button("Save").clicked() {
                self.state.save_draft_as_template();
            }
        });
    }
}

/// Preset swatches plus a free color picker
fn color_row(ui: &mut egui::Ui, color: &mut Rgba) {
    ui.horizontal(|ui| {
        for preset in Rgba::spectrum().into_iter().chain([Rgba::WHITE, Rgba::BLACK]) {
            let swatch = to_color32(preset);
            let selected = *color == preset;
            let (rect, response) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::click());
            ui.painter().rect_filled(rect, 4.0, swatch);
            if selected {
                ui.painter()
                    .rect_stroke(rect, 4.0, egui::Stroke::new(2.0, Color32::WHITE));
            }
            if response.clicked() {
                *color = preset;
            }
        }

        let mut picked = to_color32(*color);
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut picked,
            egui::color_picker::Alpha::OnlyBlend,
        )
        .changed()
        {
            *color = from_color32(picked);
        }
    });
}
