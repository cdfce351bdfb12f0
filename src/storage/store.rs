//! Persistence store for history, custom templates and favorites
//!
//! The store is the single in-memory source of truth once loaded. Every
//! mutation re-serializes the affected collection and overwrites its blob
//! synchronously. Write failures are logged and swallowed: in-memory state
//! stays authoritative even when the disk does not cooperate.

use super::images::{DecodedImage, ImageAssets, ImageCodec, JpegCodec};
use super::kv::{FileKvStore, KeyValueStore};
use crate::catalog::{builtin_templates, TemplateCatalog};
use crate::config::AppConfig;
use crate::models::{BannerHistory, BannerStyle, BannerTemplate, TemplateCategory};
use crate::{BannerError, Result};
use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Blob keys in the key-value store
pub mod keys {
    pub const HISTORY_LIST: &str = "iBanner_HistoryList";
    pub const CUSTOM_TEMPLATES: &str = "iBanner_CustomTemplates";
    pub const FAVORITE_TEMPLATE_IDS: &str = "iBanner_FavoriteTemplateIds";
    pub const LAST_USED_STYLE: &str = "LastUsedStyle";
}

pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Change notifications delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    HistoryChanged,
    TemplatesChanged,
    FavoritesChanged,
    /// Everything was wiped by `reset_all_data`
    Reset,
}

/// Counts shown on the settings screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStatistics {
    pub history_count: usize,
    pub custom_template_count: usize,
    pub favorite_count: usize,
}

pub struct BannerStore {
    kv: Arc<dyn KeyValueStore>,
    images: ImageAssets,
    max_history: usize,
    history: Vec<BannerHistory>,
    built_in: Vec<BannerTemplate>,
    custom: Vec<BannerTemplate>,
    favorites: HashSet<Uuid>,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl BannerStore {
    /// Create the store and load every persisted collection
    ///
    /// Never fails: unreadable blobs load as empty collections.
    pub fn open(
        kv: Arc<dyn KeyValueStore>,
        data_dir: impl Into<PathBuf>,
        images_folder: impl Into<String>,
        codec: Box<dyn ImageCodec>,
        max_history: usize,
    ) -> Self {
        let images = ImageAssets::new(data_dir, images_folder, codec);
        if let Err(e) = images.ensure_directory() {
            error!("Failed to create images directory {:?}: {}", images.directory(), e);
        }

        let mut store = Self {
            kv,
            images,
            max_history: max_history.max(1),
            history: Vec::new(),
            built_in: builtin_templates(),
            custom: Vec::new(),
            favorites: HashSet::new(),
            subscribers: Vec::new(),
        };
        store.load_all();
        store
    }

    /// File-backed store laid out under `config.data_dir`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let kv = FileKvStore::open(config.store_dir())?;
        Ok(Self::open(
            Arc::new(kv),
            config.data_dir.clone(),
            config.images_folder.clone(),
            Box::new(JpegCodec::new(config.jpeg_quality)),
            config.max_history_count,
        ))
    }

    /// Reload all three collections from the key-value store
    ///
    /// Each collection loads independently; a corrupt blob resets only that
    /// collection to empty.
    pub fn load_all(&mut self) {
        self.history = self.load_collection::<Vec<BannerHistory>>(keys::HISTORY_LIST);
        self.normalize_history();

        self.custom = self.load_collection::<Vec<BannerTemplate>>(keys::CUSTOM_TEMPLATES);
        // built-in flags never come from disk
        self.custom.retain(|t| !t.is_built_in);

        let ids = self.load_collection::<Vec<Uuid>>(keys::FAVORITE_TEMPLATE_IDS);
        self.favorites = ids.into_iter().collect();

        info!(
            "Loaded {} history entries, {} custom templates, {} favorites",
            self.history.len(),
            self.custom.len(),
            self.favorites.len()
        );
    }

    fn load_collection<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.read_blob::<T>(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!("Failed to load {}, starting empty: {}", key, e);
                T::default()
            }
        }
    }

    fn read_blob<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_blob<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.kv.set(key, &bytes)
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.write_blob(key, value) {
            error!("Failed to save {}: {}", key, e);
        }
    }

    fn save_history(&self) {
        self.persist(keys::HISTORY_LIST, &self.history);
    }

    fn save_custom_templates(&self) {
        self.persist(keys::CUSTOM_TEMPLATES, &self.custom);
    }

    fn save_favorites(&self) {
        let mut ids: Vec<Uuid> = self.favorites.iter().copied().collect();
        ids.sort();
        self.persist(keys::FAVORITE_TEMPLATE_IDS, &ids);
    }

    // ----- notifications -----

    /// Register for change notifications
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: StoreEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    // ----- history -----

    pub fn history(&self) -> &[BannerHistory] {
        &self.history
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Record a displayed banner
    pub fn add_history(&mut self, style: &BannerStyle) {
        self.add_history_at(style, Utc::now());
    }

    /// Record a displayed banner with an explicit timestamp
    ///
    /// An entry with the same text has its timestamp refreshed instead of
    /// being duplicated. The list is kept newest-first and capped at
    /// `max_history`, dropping the oldest.
    pub fn add_history_at(&mut self, style: &BannerStyle, timestamp: DateTime<Utc>) {
        if let Some(existing) = self
            .history
            .iter_mut()
            .find(|h| h.style.text == style.text)
        {
            existing.timestamp = timestamp;
            debug!("Refreshed history entry {}", existing.id);
        } else {
            self.history
                .insert(0, BannerHistory::at(style.clone(), timestamp));
        }

        self.normalize_history();

        self.save_history();
        self.notify(StoreEvent::HistoryChanged);
    }

    /// Newest first, one entry per text, at most `max_history`
    fn normalize_history(&mut self) {
        self.history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut seen = HashSet::new();
        self.history.retain(|h| seen.insert(h.style.text.clone()));
        self.history.truncate(self.max_history);
    }

    pub fn delete_history(&mut self, id: Uuid) {
        let before = self.history.len();
        self.history.retain(|h| h.id != id);
        if self.history.len() == before {
            debug!("No history entry {}", id);
        }
        self.save_history();
        self.notify(StoreEvent::HistoryChanged);
    }

    pub fn clear_all_history(&mut self) {
        self.history.clear();
        self.save_history();
        self.notify(StoreEvent::HistoryChanged);
    }

    /// Case-insensitive text search; an empty keyword returns everything
    pub fn search_history(&self, keyword: &str) -> Vec<&BannerHistory> {
        if keyword.is_empty() {
            return self.history.iter().collect();
        }
        let needle = keyword.to_lowercase();
        self.history
            .iter()
            .filter(|h| h.style.text.to_lowercase().contains(&needle))
            .collect()
    }

    // ----- templates -----

    pub fn catalog(&self) -> TemplateCatalog<'_> {
        TemplateCatalog::new(&self.built_in, &self.custom, &self.favorites)
    }

    pub fn custom_templates(&self) -> &[BannerTemplate] {
        &self.custom
    }

    pub fn built_in_templates(&self) -> &[BannerTemplate] {
        &self.built_in
    }

    /// Append a user template and return its id
    pub fn add_custom_template(
        &mut self,
        name: &str,
        style: &BannerStyle,
        category: TemplateCategory,
    ) -> Uuid {
        let template = BannerTemplate::custom(name, style.clone(), category);
        let id = template.id;
        self.custom.push(template);
        self.save_custom_templates();
        self.notify(StoreEvent::TemplatesChanged);
        info!("Added custom template {} ({})", name, id);
        id
    }

    /// Delete a custom template and drop it from favorites
    ///
    /// Built-in templates are rejected with a `Validation` error and nothing
    /// changes.
    pub fn delete_custom_template(&mut self, id: Uuid) -> Result<()> {
        if self.built_in.iter().any(|t| t.id == id) {
            debug!("Refusing to delete built-in template {}", id);
            return Err(BannerError::Validation(
                "built-in templates cannot be deleted".to_string(),
            ));
        }
        let Some(index) = self.custom.iter().position(|t| t.id == id) else {
            return Err(BannerError::NotFound(format!("template {id}")));
        };

        self.custom.remove(index);
        let was_favorite = self.favorites.remove(&id);

        self.save_custom_templates();
        self.save_favorites();
        self.notify(StoreEvent::TemplatesChanged);
        if was_favorite {
            self.notify(StoreEvent::FavoritesChanged);
        }
        Ok(())
    }

    // ----- favorites -----

    pub fn favorites(&self) -> &HashSet<Uuid> {
        &self.favorites
    }

    pub fn is_favorite(&self, id: Uuid) -> bool {
        self.favorites.contains(&id)
    }

    /// Flip favorite membership; returns the new state
    pub fn toggle_favorite(&mut self, id: Uuid) -> bool {
        let now_favorite = if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        };
        self.save_favorites();
        self.notify(StoreEvent::FavoritesChanged);
        now_favorite
    }

    // ----- last used style -----

    /// Remember the style (without its text) for the next launch
    pub fn save_last_style(&self, style: &BannerStyle) {
        self.persist(keys::LAST_USED_STYLE, &style.without_text());
    }

    pub fn load_last_style(&self) -> Option<BannerStyle> {
        match self.read_blob::<BannerStyle>(keys::LAST_USED_STYLE) {
            Ok(style) => style.map(|s| s.without_text()),
            Err(e) => {
                warn!("Failed to load last used style: {}", e);
                None
            }
        }
    }

    // ----- images -----

    pub fn images(&self) -> &ImageAssets {
        &self.images
    }

    /// Encode and store picked image bytes; `None` on any failure
    pub fn save_background_image(&self, raw: &[u8]) -> Option<String> {
        match self.images.save(raw) {
            Ok(path) => Some(path),
            Err(e) => {
                error!("Failed to save background image: {}", e);
                None
            }
        }
    }

    pub fn load_background_image(&self, path: &str) -> Option<DecodedImage> {
        match self.images.load(path) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Failed to load background image {}: {}", path, e);
                None
            }
        }
    }

    pub fn delete_background_image(&self, path: &str) {
        self.images.delete(path);
    }

    pub fn clear_all_background_images(&self) {
        self.images.clear_all();
    }

    pub fn list_background_images(&self) -> Vec<String> {
        self.images.list()
    }

    pub fn background_image_exists(&self, path: &str) -> bool {
        self.images.exists(path)
    }

    pub fn background_image_size(&self, path: &str) -> Option<u64> {
        self.images.size(path)
    }

    pub fn resolve_image_path(&self, path: &str) -> Option<PathBuf> {
        self.images.resolve(path)
    }

    // ----- maintenance -----

    pub fn usage_statistics(&self) -> UsageStatistics {
        UsageStatistics {
            history_count: self.history.len(),
            custom_template_count: self.custom.len(),
            favorite_count: self.favorites.len(),
        }
    }

    /// Pretty JSON with `history`, `customTemplates` and `favoriteIds`
    pub fn export_user_data(&self) -> Option<String> {
        let mut ids: Vec<Uuid> = self.favorites.iter().copied().collect();
        ids.sort();
        let export = serde_json::json!({
            "history": self.history,
            "customTemplates": self.custom,
            "favoriteIds": ids,
        });
        match serde_json::to_string_pretty(&export) {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Failed to export user data: {}", e);
                None
            }
        }
    }

    /// Wipe collections, persisted blobs and image files
    ///
    /// Each step runs regardless of earlier failures.
    pub fn reset_all_data(&mut self) {
        self.history.clear();
        self.custom.clear();
        self.favorites.clear();

        for key in [
            keys::HISTORY_LIST,
            keys::CUSTOM_TEMPLATES,
            keys::FAVORITE_TEMPLATE_IDS,
        ] {
            if let Err(e) = self.kv.remove(key) {
                error!("Failed to remove {}: {}", key, e);
            }
        }

        self.clear_all_background_images();
        info!("All user data reset");
        self.notify(StoreEvent::Reset);
    }
}

impl std::fmt::Debug for BannerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BannerStore")
            .field("images", &self.images)
            .field("max_history", &self.max_history)
            .field("history", &self.history.len())
            .field("custom", &self.custom.len())
            .field("favorites", &self.favorites.len())
            .finish()
    }
}
