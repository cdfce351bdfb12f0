use super::style::BannerStyle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template grouping shown as tabs in the library
///
/// `All` is a filter value only; no template is stored with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateCategory {
    All,
    Support,
    Party,
    Transport,
    Celebration,
    Communication,
    Custom,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 7] = [
        TemplateCategory::All,
        TemplateCategory::Support,
        TemplateCategory::Party,
        TemplateCategory::Transport,
        TemplateCategory::Celebration,
        TemplateCategory::Communication,
        TemplateCategory::Custom,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateCategory::All => "All",
            TemplateCategory::Support => "Support",
            TemplateCategory::Party => "Party",
            TemplateCategory::Transport => "Transport",
            TemplateCategory::Celebration => "Celebration",
            TemplateCategory::Communication => "Communication",
            TemplateCategory::Custom => "Custom",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TemplateCategory::All => "▦",
            TemplateCategory::Support => "❤",
            TemplateCategory::Party => "🎉",
            TemplateCategory::Transport => "🚗",
            TemplateCategory::Celebration => "🎁",
            TemplateCategory::Communication => "💬",
            TemplateCategory::Custom => "⭐",
        }
    }
}

/// A named, reusable banner preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerTemplate {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    pub style: BannerStyle,
    pub category: TemplateCategory,
    pub is_built_in: bool,
}

impl BannerTemplate {
    /// A user-created template; `All` is stored as `Custom`
    pub fn custom(name: impl Into<String>, style: BannerStyle, category: TemplateCategory) -> Self {
        let category = match category {
            TemplateCategory::All => TemplateCategory::Custom,
            other => other,
        };
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            text: style.text.clone(),
            style,
            category,
            is_built_in: false,
        }
    }

    /// A built-in template with a caller-provided stable id
    pub fn built_in(
        id: Uuid,
        name: impl Into<String>,
        style: BannerStyle,
        category: TemplateCategory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            text: style.text.clone(),
            style,
            category,
            is_built_in: true,
        }
    }

    /// Case-insensitive match against name, text and category name
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.style.text.to_lowercase().contains(&needle)
            || self.category.display_name().to_lowercase().contains(&needle)
    }
}
