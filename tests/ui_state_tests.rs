//! UI state tests
//!
//! Drive `AppState` directly: showing and dismissing banners, template and
//! history application, image import and premium gating.

use ibanner::animation::{ApproxTextMeasure, ScreenSize, MAX_SPEED};
use ibanner::config::AppConfig;
use ibanner::models::{AnimationType, BackgroundType, BannerStyle, TemplateCategory};
use ibanner::premium::{FeatureGate, StaticEntitlement, SubscriptionStatus};
use ibanner::storage::{BannerStore, JpegCodec, MemoryKvStore};
use ibanner::ui::{AppState, Screen};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn new_state(gate: FeatureGate) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = BannerStore::open(
        Arc::new(MemoryKvStore::new()),
        dir.path(),
        "BackgroundImages",
        Box::new(JpegCodec::default()),
        10,
    );
    let config = AppConfig::default().with_data_dir(dir.path());
    (AppState::new(store, config, gate), dir)
}

fn screen() -> ScreenSize {
    ScreenSize::new(1280.0, 720.0)
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 128, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn test_initial_screen_is_compose() {
    let (state, _dir) = new_state(FeatureGate::open());
    assert_eq!(state.screen, Screen::Compose, "Initial screen should be Compose");
    assert!(!state.is_displaying());
    assert!(state.draft.text.is_empty());
}

#[test]
fn test_show_banner_validates_and_records() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    state.draft = BannerStyle::new("Boarding now")
        .with_font_size(400.0)
        .with_animation(AnimationType::Scroll, 50.0);

    assert!(state.show_banner(screen(), &ApproxTextMeasure));

    let shown = state.display.as_ref().unwrap();
    assert_eq!(shown.font_size, 100.0, "font size should be clamped");
    assert_eq!(shown.animation_speed, MAX_SPEED, "speed should be clamped");
    assert_eq!(state.store.history().len(), 1);
    assert_eq!(state.engine.animation_type(), AnimationType::Scroll);

    let remembered = state.store.load_last_style().unwrap();
    assert!(remembered.text.is_empty());
    assert_eq!(remembered.animation_type, AnimationType::Scroll);
}

#[test]
fn test_dismiss_stops_engine() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    state.draft = BannerStyle::new("Bye").with_animation(AnimationType::Typewriter, 1.0);
    state.show_banner(screen(), &ApproxTextMeasure);
    state.tick(Duration::from_millis(200));
    assert_eq!(state.engine.frame().revealed_text.as_deref(), Some("By"));

    state.dismiss_banner();
    assert!(!state.is_displaying());
    assert!(!state.engine.is_running());

    // dismissing twice is harmless
    state.dismiss_banner();
}

#[test]
fn test_short_drag_does_not_dismiss() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    state.draft = BannerStyle::new("Stay");
    state.show_banner(screen(), &ApproxTextMeasure);

    state.drag_banner(99.0);
    assert!(!state.release_drag());
    assert!(state.is_displaying());

    // upward drags never dismiss
    state.drag_banner(-300.0);
    assert!(!state.release_drag());

    state.drag_banner(101.0);
    assert!(state.release_drag());
    assert!(!state.is_displaying());
}

#[test]
fn test_apply_history_restores_text_and_style() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    state
        .store
        .add_history(&BannerStyle::new("Again").with_animation(AnimationType::Blink, 2.0));
    let id = state.store.history()[0].id;
    state.screen = Screen::History;

    assert!(state.apply_history(id));
    assert_eq!(state.draft.text, "Again");
    assert_eq!(state.draft.animation_type, AnimationType::Blink);
    assert_eq!(state.screen, Screen::Compose);

    assert!(!state.apply_history(uuid::Uuid::new_v4()));
}

#[test]
fn test_apply_built_in_template() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    let template = state.store.built_in_templates()[0].clone();

    assert!(state.apply_template(template.id));
    assert_eq!(state.draft, template.style);
    assert!(state.status.is_some());
}

#[test]
fn test_save_draft_as_template_requires_name() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    state.draft = BannerStyle::new("Pick me up");

    assert!(state.save_draft_as_template().is_none());
    assert!(state.last_error.is_some());

    state.new_template_name = "  Pickup  ".to_string();
    state.new_template_category = TemplateCategory::Transport;
    let id = state.save_draft_as_template().unwrap();

    let saved = state.store.catalog().get(id).unwrap().clone();
    assert_eq!(saved.name, "Pickup");
    assert_eq!(saved.category, TemplateCategory::Transport);
    assert!(state.new_template_name.is_empty());
}

#[test]
fn test_deleting_built_in_reports_error() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    let id = state.store.built_in_templates()[0].id;
    state.delete_template(id);
    assert!(state.last_error.is_some());
    assert_eq!(state.store.built_in_templates().len(), 8);
}

#[test]
fn test_import_background_image() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    assert!(state.import_background_image(&png_bytes()));

    assert_eq!(state.draft.background_type, BackgroundType::Image);
    let path = state.draft.background_image_path.clone().unwrap();
    assert!(state.store.background_image_exists(&path));

    state.clear_background_image();
    assert_eq!(state.draft.background_type, BackgroundType::Color);
    assert!(state.draft.background_image_path.is_none());
}

#[test]
fn test_import_rejects_garbage() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    assert!(!state.import_background_image(b"nope"));
    assert!(state.last_error.is_some());
    assert_eq!(state.draft.background_type, BackgroundType::Color);
}

#[test]
fn test_gated_image_import_needs_entitlement() {
    let locked = FeatureGate::new(true, Box::new(StaticEntitlement(SubscriptionStatus::NotSubscribed)));
    let (mut state, _dir) = new_state(locked);
    assert!(!state.import_background_image(&png_bytes()));
    assert!(state.store.list_background_images().is_empty());

    let unlocked = FeatureGate::new(true, Box::new(StaticEntitlement(SubscriptionStatus::Subscribed)));
    let (mut state, _dir) = new_state(unlocked);
    assert!(state.import_background_image(&png_bytes()));
}

#[test]
fn test_reset_clears_draft_image_after_events() {
    let (mut state, _dir) = new_state(FeatureGate::open());
    state.import_background_image(&png_bytes());
    state.draft.text = "Party".to_string();
    state.show_banner(screen(), &ApproxTextMeasure);

    state.reset_all_data();
    state.poll_events();

    assert!(!state.is_displaying());
    assert!(state.store.history().is_empty());
    assert_eq!(state.draft.background_type, BackgroundType::Color);
    assert_eq!(state.status.as_deref(), Some("All data cleared"));
}
