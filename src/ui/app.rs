//! Main application struct and eframe integration
//!
//! This module contains the BannerApp that implements eframe::App. While a
//! banner is showing the whole window becomes the banner surface; otherwise
//! the editor screens are shown.

use crate::animation::ScreenSize;
use crate::ui::components::{BannerView, HistoryList, SettingsPanel, StyleForm, TemplateGrid};
use crate::ui::state::{AppState, Screen};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, TopBottomPanel};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Main iBanner application
pub struct BannerApp {
    state: AppState,
    theme: Theme,
    last_frame_time: Instant,
    /// Texture for the background image of the showing banner, keyed by path
    background: Option<(String, egui::TextureHandle)>,
    fullscreen: bool,
}

impl BannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            state,
            theme,
            last_frame_time: Instant::now(),
            background: None,
            fullscreen: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("iBanner")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.add_space(self.theme.spacing);

                    for screen in Screen::ALL {
                        ui.selectable_value(&mut self.state.screen, screen, screen.title());
                    }
                });
            });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        if self.state.status.is_none() && self.state.last_error.is_none() {
            return;
        }
        TopBottomPanel::bottom("status")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(error) = &self.state.last_error {
                        ui.label(RichText::new(error).color(self.theme.danger));
                    } else if let Some(status) = &self.state.status {
                        ui.label(RichText::new(status).color(self.theme.text_secondary));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            self.state.status = None;
                            self.state.last_error = None;
                        }
                    });
                });
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| match self.state.screen {
                Screen::Compose => StyleForm::new(&mut self.state, &self.theme).show(ui),
                Screen::History => HistoryList::new(&mut self.state, &self.theme).show(ui),
                Screen::Templates => TemplateGrid::new(&mut self.state, &self.theme).show(ui),
                Screen::Settings => SettingsPanel::new(&mut self.state, &self.theme).show(ui),
            });
    }

    fn show_banner(&mut self, ctx: &egui::Context) {
        let Some(style) = self.state.display.clone() else {
            return;
        };
        self.sync_background(ctx);

        let frame = self.state.engine.frame();
        let texture = self.background.as_ref().map(|(_, t)| t);

        CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.interact(
                    rect,
                    egui::Id::new("banner_surface"),
                    egui::Sense::click_and_drag(),
                );
                BannerView::new(&style, &frame)
                    .background(texture)
                    .paint(ui.painter(), rect);

                if response.double_clicked() {
                    self.state.dismiss_banner();
                } else if response.dragged() {
                    self.state.drag_banner(response.drag_delta().y);
                } else if response.drag_stopped() {
                    self.state.release_drag();
                }
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.dismiss_banner();
        }
    }

    /// Upload the banner's background image once per path
    fn sync_background(&mut self, ctx: &egui::Context) {
        let wanted = self
            .state
            .display
            .as_ref()
            .filter(|s| s.uses_background_image())
            .and_then(|s| s.background_image_path.clone());

        let Some(path) = wanted else {
            self.background = None;
            return;
        };
        if matches!(&self.background, Some((loaded, _)) if *loaded == path) {
            return;
        }

        self.background = match self.state.store.load_background_image(&path) {
            Some(image) => {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width as usize, image.height as usize],
                    &image.rgba,
                );
                debug!("Uploaded background texture for {}", path);
                Some((
                    path,
                    ctx.load_texture("banner_background", color_image, egui::TextureOptions::LINEAR),
                ))
            }
            None => {
                warn!("Background image {} unavailable, using color", path);
                None
            }
        };
    }

    /// Image files dropped on the window become the draft background
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(bytes) = file.bytes {
                self.state.import_background_image(&bytes);
            } else if let Some(path) = file.path {
                self.state.import_background_from_path(&path);
            }
        }
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, fullscreen: bool) {
        if self.fullscreen != fullscreen {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
            self.fullscreen = fullscreen;
        }
    }
}

impl eframe::App for BannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;

        self.state.poll_events();
        self.state.tick(delta.min(Duration::from_millis(250)));

        if self.state.is_displaying() {
            self.set_fullscreen(ctx, true);
            self.show_banner(ctx);
            if self.state.engine.needs_repaint() {
                ctx.request_repaint();
            }
        } else {
            self.set_fullscreen(ctx, false);
            self.background = None;
            self.handle_dropped_files(ctx);
            self.show_header(ctx);
            self.show_status_bar(ctx);
            self.show_content(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.dismiss_banner();
        self.state.store.save_last_style(&self.state.draft);
    }
}

/// Surface size of the current window
pub fn screen_size(ctx: &egui::Context) -> ScreenSize {
    let size = ctx.screen_rect().size();
    ScreenSize::new(size.x, size.y)
}
