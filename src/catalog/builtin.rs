//! Built-in template table
//!
//! Regenerated on every launch and never persisted. Ids are derived from the
//! table position so favorites of built-ins survive restarts.

use crate::models::{AnimationType, BannerStyle, BannerTemplate, Rgba, TemplateCategory};
use uuid::Uuid;

struct BuiltInSpec {
    name: &'static str,
    text: &'static str,
    font_size: f32,
    text_color: Rgba,
    background_color: Rgba,
    animation: AnimationType,
    speed: f64,
    category: TemplateCategory,
}

const BUILT_INS: [BuiltInSpec; 8] = [
    BuiltInSpec {
        name: "Concert Cheer",
        text: "❤️ I Love You ❤️",
        font_size: 56.0,
        text_color: Rgba::WHITE,
        background_color: Rgba::RED,
        animation: AnimationType::Blink,
        speed: 1.5,
        category: TemplateCategory::Support,
    },
    BuiltInSpec {
        name: "Fan Support",
        text: "🌟 Go Go Go 🌟",
        font_size: 48.0,
        text_color: Rgba::YELLOW,
        background_color: Rgba::PURPLE,
        animation: AnimationType::Breathing,
        speed: 1.0,
        category: TemplateCategory::Support,
    },
    BuiltInSpec {
        name: "Happy Birthday",
        text: "🎂 Happy Birthday 🎂",
        font_size: 52.0,
        text_color: Rgba::WHITE,
        background_color: Rgba::PINK,
        animation: AnimationType::Gradient,
        speed: 1.2,
        category: TemplateCategory::Celebration,
    },
    BuiltInSpec {
        name: "Party Time",
        text: "🎉 Party Time 🎉",
        font_size: 50.0,
        text_color: Rgba::WHITE,
        background_color: Rgba::ORANGE,
        animation: AnimationType::Scroll,
        speed: 1.0,
        category: TemplateCategory::Party,
    },
    BuiltInSpec {
        name: "Airport Pickup",
        text: "✈️ Pickup ✈️",
        font_size: 60.0,
        text_color: Rgba::BLACK,
        background_color: Rgba::WHITE,
        animation: AnimationType::None,
        speed: 1.0,
        category: TemplateCategory::Transport,
    },
    BuiltInSpec {
        name: "Designated Driver",
        text: "🚗 Driver 🚗",
        font_size: 54.0,
        text_color: Rgba::WHITE,
        background_color: Rgba::BLUE,
        animation: AnimationType::Breathing,
        speed: 0.8,
        category: TemplateCategory::Transport,
    },
    BuiltInSpec {
        name: "Thank You",
        text: "🙏 Thank You 🙏",
        font_size: 58.0,
        text_color: Rgba::WHITE,
        background_color: Rgba::GREEN,
        animation: AnimationType::None,
        speed: 1.0,
        category: TemplateCategory::Communication,
    },
    BuiltInSpec {
        name: "Please Wait",
        text: "⏰ Please Wait ⏰",
        font_size: 50.0,
        text_color: Rgba::BLACK,
        background_color: Rgba::YELLOW,
        animation: AnimationType::Blink,
        speed: 1.0,
        category: TemplateCategory::Communication,
    },
];

fn built_in_id(index: usize) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("ibanner.builtin.{index}").as_bytes(),
    )
}

/// The fixed list of built-in templates, in display order
pub fn builtin_templates() -> Vec<BannerTemplate> {
    BUILT_INS
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let style = BannerStyle::new(entry.text)
                .with_font_size(entry.font_size)
                .with_colors(entry.text_color, entry.background_color)
                .with_animation(entry.animation, entry.speed)
                .with_bold(true);
            BannerTemplate::built_in(built_in_id(index), entry.name, style, entry.category)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtins_are_stable_across_calls() {
        let first = builtin_templates();
        let second = builtin_templates();
        assert_eq!(first.len(), 8);
        let ids: Vec<_> = first.iter().map(|t| t.id).collect();
        let again: Vec<_> = second.iter().map(|t| t.id).collect();
        assert_eq!(ids, again);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 8);
    }

    #[test]
    fn test_builtins_cover_expected_categories() {
        let categories: HashSet<_> = builtin_templates().iter().map(|t| t.category).collect();
        for c in [
            TemplateCategory::Support,
            TemplateCategory::Celebration,
            TemplateCategory::Party,
            TemplateCategory::Transport,
            TemplateCategory::Communication,
        ] {
            assert!(categories.contains(&c), "missing {:?}", c);
        }
        assert!(builtin_templates().iter().all(|t| t.is_built_in));
    }
}
