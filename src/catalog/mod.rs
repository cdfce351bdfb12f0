//! Read-only query surface over built-in and custom templates

mod builtin;

pub use builtin::builtin_templates;

use crate::models::{BannerTemplate, TemplateCategory};
use std::collections::HashSet;
use uuid::Uuid;

/// A borrowed view of the template library
///
/// Obtained from [`crate::storage::BannerStore::catalog`]; built-ins always
/// come first, in table order, followed by custom templates in creation order.
#[derive(Debug, Clone, Copy)]
pub struct TemplateCatalog<'a> {
    built_in: &'a [BannerTemplate],
    custom: &'a [BannerTemplate],
    favorites: &'a HashSet<Uuid>,
}

impl<'a> TemplateCatalog<'a> {
    pub fn new(
        built_in: &'a [BannerTemplate],
        custom: &'a [BannerTemplate],
        favorites: &'a HashSet<Uuid>,
    ) -> Self {
        Self {
            built_in,
            custom,
            favorites,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &'a BannerTemplate> {
        self.built_in.iter().chain(self.custom.iter())
    }

    pub fn get_all(&self) -> Vec<&'a BannerTemplate> {
        self.iter().collect()
    }

    /// `TemplateCategory::All` returns everything
    pub fn get_by_category(&self, category: TemplateCategory) -> Vec<&'a BannerTemplate> {
        if category == TemplateCategory::All {
            return self.get_all();
        }
        self.iter().filter(|t| t.category == category).collect()
    }

    pub fn get_favorites(&self) -> Vec<&'a BannerTemplate> {
        let favorites = self.favorites;
        self.iter().filter(|t| favorites.contains(&t.id)).collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&'a BannerTemplate> {
        self.iter().find(|t| t.id == id)
    }

    pub fn is_favorite(&self, id: Uuid) -> bool {
        self.favorites.contains(&id)
    }

    /// An empty keyword returns everything
    pub fn search(&self, keyword: &str) -> Vec<&'a BannerTemplate> {
        if keyword.is_empty() {
            return self.get_all();
        }
        self.iter().filter(|t| t.matches(keyword)).collect()
    }

    /// Category filter followed by keyword search, as the library screen applies them
    pub fn filter(&self, category: TemplateCategory, keyword: &str) -> Vec<&'a BannerTemplate> {
        self.get_by_category(category)
            .into_iter()
            .filter(|t| keyword.is_empty() || t.matches(keyword))
            .collect()
    }
}
