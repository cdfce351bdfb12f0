//! Full-screen banner surface
//!
//! Paints one `AnimationFrame` for a style: background color or image, the
//! gradient overlay, the text run (centered, scrolling, typed or flashed)
//! and the font-style effects.

use crate::animation::{AnimationFrame, TextMeasure};
use crate::models::{AnimationType, BannerStyle, FontStyle, Rgba};
use crate::ui::theme::to_color32;
use egui::{self, pos2, vec2, Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape};

/// Horizontal padding kept around centered text
const TEXT_MARGIN: f32 = 20.0;
/// Opacity of the spectrum overlay
const GRADIENT_ALPHA: f64 = 0.8;
/// Flash copies are drawn smaller than the main text
const FLASH_SCALE: f32 = 0.8;

/// Text measurement backed by the egui font atlas
pub struct EguiTextMeasure<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiTextMeasure<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for EguiTextMeasure<'_> {
    fn text_width(&self, text: &str, font_size: f32, bold: bool) -> f32 {
        let width = self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(
                    text.to_string(),
                    FontId::proportional(font_size),
                    Color32::WHITE,
                )
                .size()
                .x
        });
        // faux bold is a second pass shifted by one point
        if bold {
            width + 1.0
        } else {
            width
        }
    }
}

pub struct BannerView<'a> {
    style: &'a BannerStyle,
    frame: &'a AnimationFrame,
    background: Option<&'a egui::TextureHandle>,
}

impl<'a> BannerView<'a> {
    pub fn new(style: &'a BannerStyle, frame: &'a AnimationFrame) -> Self {
        Self {
            style,
            frame,
            background: None,
        }
    }

    pub fn background(mut self, texture: Option<&'a egui::TextureHandle>) -> Self {
        self.background = texture;
        self
    }

    /// Paint into `rect`
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let painter = painter.with_clip_rect(rect);
        painter.rect_filled(rect, 0.0, to_color32(self.style.background_color));

        if self.style.uses_background_image() {
            if let Some(texture) = self.background {
                paint_cover_image(&painter, rect, texture, self.style.background_image_opacity);
            }
        }

        if let Some(offset) = self.frame.gradient_offset_x {
            paint_gradient(&painter, rect, offset);
        }

        let font = FontId::proportional(self.style.font_size * self.frame.scale as f32);
        let color = to_color32(self.style.text_color.with_opacity(self.frame.opacity));

        if self.frame.draw_main_text {
            let text = self
                .frame
                .revealed_text
                .as_deref()
                .unwrap_or(&self.style.text);
            if self.frame.animation_type == AnimationType::Scroll {
                self.paint_scroll(&painter, rect, text, &font, color);
            } else {
                let wrap = (rect.width() - TEXT_MARGIN * 2.0).max(1.0);
                self.paint_text(&painter, text, &font, color, rect.center(), Some(wrap));
            }
        }

        for spot in &self.frame.flashes {
            if spot.opacity <= 0.0 {
                continue;
            }
            let size = flash_font_size(self.style.font_size, spot.opacity);
            let flash_font = FontId::proportional(size);
            let color = to_color32(self.style.text_color.with_opacity(spot.opacity));
            let center = pos2(rect.left() + spot.x, rect.top() + spot.y);
            self.paint_text(&painter, &self.style.text, &flash_font, color, center, None);
        }
    }

    /// Two copies, half a screen apart, so the loop never shows a gap
    fn paint_scroll(&self, painter: &Painter, rect: Rect, text: &str, font: &FontId, color: Color32) {
        let width = painter
            .layout_no_wrap(text.to_string(), font.clone(), color)
            .size()
            .x;
        let y = rect.center().y;
        let first = rect.left() + self.frame.text_offset_x;
        for x in [first, first + width + rect.width() * 0.5] {
            let anchor = pos2(x + width / 2.0, y);
            self.paint_text(painter, text, font, color, anchor, None);
        }
    }

    fn paint_text(
        &self,
        painter: &Painter,
        text: &str,
        font: &FontId,
        color: Color32,
        center: Pos2,
        wrap: Option<f32>,
    ) {
        if text.is_empty() || color.a() == 0 {
            return;
        }
        let draw = |color: Color32, offset: egui::Vec2| {
            let galley = match wrap {
                Some(width) => painter.layout(
                    text.to_string(),
                    font.clone(),
                    color,
                    width,
                ),
                None => painter.layout_no_wrap(text.to_string(), font.clone(), color),
            };
            let min = Align2::CENTER_CENTER
                .anchor_size(center + offset, galley.size())
                .min;
            painter.galley(min, galley, color);
        };

        let alpha = color.a() as f32 / 255.0;
        match self.style.font_style {
            FontStyle::Normal => {}
            FontStyle::Artistic => {
                draw(Color32::BLACK.gamma_multiply(0.3 * alpha), vec2(2.0, 2.0));
            }
            FontStyle::Neon => {
                for radius in [4.0_f32, 2.0] {
                    for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
                        draw(color.gamma_multiply(0.35), vec2(dx * radius, dy * radius));
                    }
                }
            }
        }

        draw(color, egui::Vec2::ZERO);
        if self.style.is_bold {
            draw(color, vec2(1.0, 0.0));
        }
        if self.style.font_style == FontStyle::Neon {
            draw(Color32::WHITE.gamma_multiply(0.5 * alpha), egui::Vec2::ZERO);
        }
    }
}

/// Scale to fill, cropping the overflow evenly on both sides
fn paint_cover_image(painter: &Painter, rect: Rect, texture: &egui::TextureHandle, opacity: f64) {
    let size = texture.size_vec2();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let scale = (rect.width() / size.x).max(rect.height() / size.y);
    let shown = vec2(
        (rect.width() / (size.x * scale)).min(1.0),
        (rect.height() / (size.y * scale)).min(1.0),
    );
    let uv = Rect::from_min_size(pos2((1.0 - shown.x) / 2.0, (1.0 - shown.y) / 2.0), shown);
    let tint = Color32::WHITE.gamma_multiply(opacity.clamp(0.0, 1.0) as f32);
    painter.image(texture.id(), rect, uv, tint);
}

/// Flash copies grow in and shrink out with their opacity
fn flash_font_size(font_size: f32, opacity: f64) -> f32 {
    font_size * FLASH_SCALE * opacity.clamp(0.0, 1.0) as f32
}

/// Spectrum band one screen wide, repeated once to the right
fn paint_gradient(painter: &Painter, rect: Rect, offset: f32) {
    let stops = Rgba::spectrum();
    let segments = (stops.len() - 1) as u32;

    for copy in 0..2 {
        let x0 = rect.left() + offset + copy as f32 * rect.width();
        let mut mesh = Mesh::default();
        for (i, stop) in stops.iter().enumerate() {
            let x = x0 + rect.width() * i as f32 / segments as f32;
            let color = to_color32(stop.with_opacity(GRADIENT_ALPHA));
            mesh.colored_vertex(pos2(x, rect.top()), color);
            mesh.colored_vertex(pos2(x, rect.bottom()), color);
        }
        for i in 0..segments {
            let a = i * 2;
            mesh.add_triangle(a, a + 1, a + 2);
            mesh.add_triangle(a + 1, a + 3, a + 2);
        }
        painter.add(Shape::mesh(mesh));
    }
}
