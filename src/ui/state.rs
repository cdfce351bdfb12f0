//! Application state management
//!
//! Everything the screens read and mutate lives here so it can be driven
//! without a window in tests. Rendering lives in `app` and `components`.

use crate::animation::{AnimationEngine, ScreenSize, TextMeasure};
use crate::config::AppConfig;
use crate::models::{BackgroundType, BannerStyle, TemplateCategory};
use crate::premium::{FeatureGate, PremiumFeature};
use crate::storage::{BannerStore, StoreEvent};
use crate::BannerError;
use crossbeam_channel::Receiver;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Downward drag that dismisses the banner, in points
pub const DISMISS_DRAG_DISTANCE: f32 = 100.0;

/// Editor screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Compose,
    History,
    Templates,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Compose,
        Screen::History,
        Screen::Templates,
        Screen::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Compose => "Compose",
            Screen::History => "History",
            Screen::Templates => "Templates",
            Screen::Settings => "Settings",
        }
    }
}

/// Central UI state
pub struct AppState {
    pub store: BannerStore,
    pub config: AppConfig,
    pub gate: FeatureGate,
    pub engine: AnimationEngine,

    /// Style being edited on the compose screen
    pub draft: BannerStyle,
    pub screen: Screen,
    /// Style on the full-screen surface, if a banner is showing
    pub display: Option<BannerStyle>,

    pub history_search: String,
    pub template_search: String,
    pub selected_category: TemplateCategory,
    pub favorites_only: bool,
    pub new_template_name: String,
    pub new_template_category: TemplateCategory,
    /// Path typed into the background image field
    pub image_path_input: String,

    /// Last confirmation shown in the status bar
    pub status: Option<String>,
    pub last_error: Option<String>,

    events: Receiver<StoreEvent>,
    drag_distance: f32,
}

impl AppState {
    pub fn new(mut store: BannerStore, config: AppConfig, gate: FeatureGate) -> Self {
        let events = store.subscribe();
        let draft = store.load_last_style().unwrap_or_default();
        let engine = AnimationEngine::new()
            .with_speed_range(config.min_animation_speed, config.max_animation_speed);

        Self {
            store,
            config,
            gate,
            engine,
            draft,
            screen: Screen::default(),
            display: None,
            history_search: String::new(),
            template_search: String::new(),
            selected_category: TemplateCategory::All,
            favorites_only: false,
            new_template_name: String::new(),
            new_template_category: TemplateCategory::Custom,
            image_path_input: String::new(),
            status: None,
            last_error: None,
            events,
            drag_distance: 0.0,
        }
    }

    /// Drain store notifications
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                StoreEvent::HistoryChanged
                | StoreEvent::TemplatesChanged
                | StoreEvent::FavoritesChanged => {}
                StoreEvent::Reset => {
                    if let Some(path) = self.draft.background_image_path.clone() {
                        if !self.store.background_image_exists(&path) {
                            self.clear_background_image();
                        }
                    }
                    self.status = Some("All data cleared".to_string());
                }
            }
        }
    }

    // ----- display session -----

    /// Validate the draft, record it and start the full-screen banner
    pub fn show_banner(&mut self, screen: ScreenSize, measure: &dyn TextMeasure) -> bool {
        if self.draft.text.trim().is_empty() {
            self.last_error = Some("Enter some text first".to_string());
            return false;
        }

        let style = self.draft.validated(&self.config.style_limits());
        self.draft = style.clone();
        self.store.add_history(&style);
        self.store.save_last_style(&style);
        self.engine.start(&style, screen, measure);
        self.display = Some(style);
        self.drag_distance = 0.0;
        self.last_error = None;
        true
    }

    pub fn dismiss_banner(&mut self) {
        if self.display.take().is_some() {
            info!("Banner dismissed");
        }
        self.engine.stop();
        self.drag_distance = 0.0;
    }

    pub fn is_displaying(&self) -> bool {
        self.display.is_some()
    }

    pub fn tick(&mut self, dt: Duration) {
        self.engine.advance(dt);
    }

    /// Accumulate a vertical drag on the banner surface
    pub fn drag_banner(&mut self, delta_y: f32) {
        self.drag_distance += delta_y;
    }

    /// Finish a drag; dismisses when pulled far enough down
    pub fn release_drag(&mut self) -> bool {
        let dismissed = self.drag_distance > DISMISS_DRAG_DISTANCE;
        self.drag_distance = 0.0;
        if dismissed {
            self.dismiss_banner();
        }
        dismissed
    }

    // ----- draft editing -----

    /// Load a history entry into the editor
    pub fn apply_history(&mut self, id: Uuid) -> bool {
        let Some(entry) = self.store.history().iter().find(|h| h.id == id) else {
            return false;
        };
        self.draft = entry.style.clone();
        self.draft.text = entry.text.clone();
        self.screen = Screen::Compose;
        true
    }

    /// Load a template into the editor
    pub fn apply_template(&mut self, id: Uuid) -> bool {
        let Some(template) = self.store.catalog().get(id).cloned() else {
            return false;
        };
        self.draft = template.style;
        self.screen = Screen::Compose;
        self.status = Some(format!("Applied \"{}\"", template.name));
        true
    }

    /// Store the draft as a custom template under `new_template_name`
    pub fn save_draft_as_template(&mut self) -> Option<Uuid> {
        let name = self.new_template_name.trim().to_string();
        if name.is_empty() {
            self.last_error = Some("Give the template a name".to_string());
            return None;
        }
        let style = self.draft.validated(&self.config.style_limits());
        let id = self
            .store
            .add_custom_template(&name, &style, self.new_template_category);
        self.new_template_name.clear();
        self.status = Some(format!("Saved template \"{}\"", name));
        Some(id)
    }

    pub fn delete_template(&mut self, id: Uuid) {
        if let Err(e) = self.store.delete_custom_template(id) {
            self.report(e);
        }
    }

    pub fn reset_draft(&mut self) {
        self.draft = BannerStyle::default();
    }

    // ----- background images -----

    /// Store raw image bytes and use them as the draft background
    pub fn import_background_image(&mut self, raw: &[u8]) -> bool {
        if !self.gate.can_use(PremiumFeature::BackgroundImages) {
            self.last_error = Some(format!(
                "{} requires premium",
                PremiumFeature::BackgroundImages.display_name()
            ));
            return false;
        }
        match self.store.save_background_image(raw) {
            Some(path) => {
                let opacity = self.draft.background_image_opacity;
                self.draft = self.draft.clone().with_background_image(path, opacity);
                self.status = Some("Background image set".to_string());
                true
            }
            None => {
                self.report(BannerError::ImageCodec("unsupported image".to_string()));
                false
            }
        }
    }

    pub fn import_background_from_path(&mut self, path: &Path) -> bool {
        match std::fs::read(path) {
            Ok(raw) => self.import_background_image(&raw),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                self.report(e.into());
                false
            }
        }
    }

    /// Back to a plain color background; the stored file is kept since
    /// history entries may still point at it
    pub fn clear_background_image(&mut self) {
        self.draft.background_type = BackgroundType::Color;
        self.draft.background_image_path = None;
    }

    // ----- settings -----

    pub fn reset_all_data(&mut self) {
        self.dismiss_banner();
        self.store.reset_all_data();
    }

    fn report(&mut self, error: BannerError) {
        warn!("{}", error);
        self.last_error = Some(error.user_message());
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("screen", &self.screen)
            .field("displaying", &self.display.is_some())
            .field("store", &self.store)
            .finish()
    }
}
