//! Persistence store behavior
//!
//! History ordering and dedup, template and favorite bookkeeping, blob
//! round-trips through a real directory, and degraded operation when the
//! key-value store fails.

use chrono::{Duration, TimeZone, Utc};
use ibanner::models::{AnimationType, BannerHistory, BannerStyle, BannerTemplate, Rgba, TemplateCategory};
use ibanner::storage::{
    keys, BannerStore, FileKvStore, JpegCodec, KeyValueStore, MemoryKvStore, StoreEvent,
};
use ibanner::{BannerError, Result};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

fn memory_store(dir: &Path, max_history: usize) -> (BannerStore, Arc<MemoryKvStore>) {
    let kv = Arc::new(MemoryKvStore::new());
    let store = BannerStore::open(
        kv.clone(),
        dir,
        "BackgroundImages",
        Box::new(JpegCodec::default()),
        max_history,
    );
    (store, kv)
}

fn file_store(dir: &Path) -> BannerStore {
    let kv = FileKvStore::open(dir.join("store")).unwrap();
    BannerStore::open(
        Arc::new(kv),
        dir,
        "BackgroundImages",
        Box::new(JpegCodec::default()),
        10,
    )
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Every write fails; reads find nothing
struct BrokenKvStore;

impl KeyValueStore for BrokenKvStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &[u8]) -> Result<()> {
        Err(BannerError::Io(format!("disk full writing {key}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Err(BannerError::Io(format!("read-only removing {key}")))
    }
}

#[test]
fn test_same_text_refreshes_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let t1 = t0 + Duration::seconds(30);

    store.add_history_at(&BannerStyle::new("Hello"), t0);
    store.add_history_at(&BannerStyle::new("Hello"), t1);

    assert_eq!(store.history().len(), 1);
    assert_eq!(store.history()[0].timestamp, t1);
}

#[test]
fn test_new_text_is_prepended() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    store.add_history_at(&BannerStyle::new("one"), t0);
    store.add_history_at(&BannerStyle::new("two"), t0 + Duration::seconds(1));

    let texts: Vec<&str> = store.history().iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, ["two", "one"]);
}

#[test]
fn test_history_is_capped_dropping_oldest() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    for i in 0..11 {
        store.add_history_at(
            &BannerStyle::new(format!("banner {i}")),
            t0 + Duration::seconds(i),
        );
    }

    assert_eq!(store.history().len(), 10);
    assert!(store.history().iter().all(|h| h.text != "banner 0"));
    assert_eq!(store.history()[0].text, "banner 10");
}

#[test]
fn test_history_stays_sorted_descending() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    // out-of-order timestamps, plus a refresh that moves an entry to the top
    store.add_history_at(&BannerStyle::new("b"), t0 + Duration::seconds(20));
    store.add_history_at(&BannerStyle::new("a"), t0 + Duration::seconds(10));
    store.add_history_at(&BannerStyle::new("c"), t0 + Duration::seconds(30));
    store.add_history_at(&BannerStyle::new("a"), t0 + Duration::seconds(40));

    let history = store.history();
    assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(history[0].text, "a");
    assert_eq!(history.len(), 3);
}

#[test]
fn test_delete_and_clear_history() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    store.add_history(&BannerStyle::new("keep"));
    store.add_history(&BannerStyle::new("drop"));

    let id = store.history().iter().find(|h| h.text == "drop").unwrap().id;
    store.delete_history(id);
    assert_eq!(store.history().len(), 1);

    store.clear_all_history();
    assert!(store.history().is_empty());
}

#[test]
fn test_search_history_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    store.add_history(&BannerStyle::new("Happy Birthday"));
    store.add_history(&BannerStyle::new("Taxi please"));

    assert_eq!(store.search_history("").len(), 2);
    let found = store.search_history("BIRTH");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].text, "Happy Birthday");
}

#[test]
fn test_delete_custom_template_removes_favorite() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let id = store.add_custom_template("Mine", &BannerStyle::new("hi"), TemplateCategory::Party);
    store.toggle_favorite(id);
    assert!(store.is_favorite(id));

    store.delete_custom_template(id).unwrap();
    assert!(store.custom_templates().is_empty());
    assert!(!store.is_favorite(id));
    assert!(store.catalog().get(id).is_none());
}

#[test]
fn test_delete_built_in_template_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let built_in = store.built_in_templates()[0].id;
    let before = store.catalog().get_all().len();

    let result = store.delete_custom_template(built_in);
    assert!(matches!(result, Err(BannerError::Validation(_))));
    assert_eq!(store.catalog().get_all().len(), before);

    let missing = store.delete_custom_template(uuid::Uuid::new_v4());
    assert!(matches!(missing, Err(BannerError::NotFound(_))));
}

#[test]
fn test_toggle_favorite_twice_restores_set() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let id = store.built_in_templates()[2].id;
    let original = store.favorites().clone();

    assert!(store.toggle_favorite(id));
    assert!(!store.toggle_favorite(id));
    assert_eq!(store.favorites(), &original);
}

#[test]
fn test_collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let built_in_favorite;
    let custom_id;
    {
        let mut store = file_store(dir.path());
        store.add_history(&BannerStyle::new("persisted").with_animation(AnimationType::Blink, 2.0));
        custom_id = store.add_custom_template(
            "Station",
            &BannerStyle::new("Platform 9").with_colors(Rgba::YELLOW, Rgba::BLUE),
            TemplateCategory::Transport,
        );
        built_in_favorite = store.built_in_templates()[1].id;
        store.toggle_favorite(built_in_favorite);
        store.toggle_favorite(custom_id);
    }

    let store = file_store(dir.path());
    assert_eq!(store.history().len(), 1);
    assert_eq!(store.history()[0].style.animation_type, AnimationType::Blink);
    assert_eq!(store.custom_templates()[0].id, custom_id);
    assert_eq!(store.custom_templates()[0].style.text_color, Rgba::YELLOW);
    // built-in ids are stable across runs, so their favorites stick
    assert!(store.is_favorite(built_in_favorite));
    assert!(store.is_favorite(custom_id));
    assert_eq!(store.catalog().get_favorites().len(), 2);
}

#[test]
fn test_corrupt_blob_resets_only_that_collection() {
    let dir = tempfile::tempdir().unwrap();
    let kv = Arc::new(MemoryKvStore::new());
    {
        let mut store = BannerStore::open(
            kv.clone(),
            dir.path(),
            "BackgroundImages",
            Box::new(JpegCodec::default()),
            10,
        );
        store.add_history(&BannerStyle::new("survivor"));
        store.add_custom_template("T", &BannerStyle::new("t"), TemplateCategory::Custom);
    }
    kv.set(keys::CUSTOM_TEMPLATES, b"{not json").unwrap();

    let store = BannerStore::open(
        kv,
        dir.path(),
        "BackgroundImages",
        Box::new(JpegCodec::default()),
        10,
    );
    assert!(store.custom_templates().is_empty());
    assert_eq!(store.history().len(), 1);
    assert_eq!(store.history()[0].text, "survivor");
}

#[test]
fn test_loaded_history_is_capped_and_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let kv = Arc::new(MemoryKvStore::new());
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    // written under a larger limit, out of order, with a repeated text
    let mut seeded: Vec<BannerHistory> = (0..10)
        .map(|i| {
            BannerHistory::at(
                BannerStyle::new(format!("banner {i}")),
                t0 + Duration::seconds(i),
            )
        })
        .collect();
    seeded.push(BannerHistory::at(BannerStyle::new("banner 2"), t0 + Duration::seconds(20)));
    seeded.reverse();
    kv.set(keys::HISTORY_LIST, &serde_json::to_vec(&seeded).unwrap())
        .unwrap();

    let store = BannerStore::open(
        kv,
        dir.path(),
        "BackgroundImages",
        Box::new(JpegCodec::default()),
        3,
    );

    let texts: Vec<_> = store.history().iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, ["banner 2", "banner 9", "banner 8"]);
    assert_eq!(store.history()[0].timestamp, t0 + Duration::seconds(20));
    assert_eq!(store.usage_statistics().history_count, 3);
}

#[test]
fn test_write_failures_keep_memory_authoritative() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = BannerStore::open(
        Arc::new(BrokenKvStore),
        dir.path(),
        "BackgroundImages",
        Box::new(JpegCodec::default()),
        10,
    );

    store.add_history(&BannerStyle::new("still here"));
    let id = store.add_custom_template("T", &BannerStyle::new("t"), TemplateCategory::Custom);
    assert!(store.toggle_favorite(id));

    assert_eq!(store.history().len(), 1);
    assert_eq!(store.custom_templates().len(), 1);
    assert!(store.is_favorite(id));

    store.reset_all_data();
    assert!(store.history().is_empty());
    assert!(store.custom_templates().is_empty());
    assert!(store.favorites().is_empty());
}

#[test]
fn test_reset_clears_blobs_and_images() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, kv) = memory_store(dir.path(), 10);
    let events = store.subscribe();

    store.add_history(&BannerStyle::new("x"));
    store.add_custom_template("T", &BannerStyle::new("t"), TemplateCategory::Custom);
    let path = store.save_background_image(&png_bytes(8, 8)).unwrap();
    assert!(store.background_image_exists(&path));

    store.reset_all_data();

    assert!(!kv.contains(keys::HISTORY_LIST));
    assert!(!kv.contains(keys::CUSTOM_TEMPLATES));
    assert!(!kv.contains(keys::FAVORITE_TEMPLATE_IDS));
    assert!(!store.background_image_exists(&path));
    assert!(store.list_background_images().is_empty());

    let received: Vec<StoreEvent> = events.try_iter().collect();
    assert_eq!(received.last(), Some(&StoreEvent::Reset));
}

#[test]
fn test_background_image_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = memory_store(dir.path(), 10);

    let path = store.save_background_image(&png_bytes(16, 9)).unwrap();
    assert!(path.starts_with("BackgroundImages/bg_"));
    assert!(path.ends_with(".jpg"));
    assert!(store.background_image_size(&path).unwrap() > 0);

    let decoded = store.load_background_image(&path).unwrap();
    assert_eq!((decoded.width, decoded.height), (16, 9));
    assert_eq!(decoded.rgba.len(), 16 * 9 * 4);

    store.delete_background_image(&path);
    assert!(!store.background_image_exists(&path));
    // deleting again is harmless
    store.delete_background_image(&path);
}

#[test]
fn test_garbage_image_bytes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = memory_store(dir.path(), 10);
    assert!(store.save_background_image(b"definitely not an image").is_none());
    assert!(store.list_background_images().is_empty());
}

#[test]
fn test_last_style_drops_text() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = memory_store(dir.path(), 10);
    assert!(store.load_last_style().is_none());

    let style = BannerStyle::new("secret")
        .with_font_size(72.0)
        .with_animation(AnimationType::Breathing, 1.5);
    store.save_last_style(&style);

    let loaded = store.load_last_style().unwrap();
    assert!(loaded.text.is_empty());
    assert_eq!(loaded.font_size, 72.0);
    assert_eq!(loaded.animation_type, AnimationType::Breathing);
    assert_eq!(loaded.animation_speed, 1.5);
}

#[test]
fn test_export_and_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    store.add_history(&BannerStyle::new("exported"));
    let id = store.add_custom_template("E", &BannerStyle::new("e"), TemplateCategory::Celebration);
    store.toggle_favorite(id);

    let stats = store.usage_statistics();
    assert_eq!(stats.history_count, 1);
    assert_eq!(stats.custom_template_count, 1);
    assert_eq!(stats.favorite_count, 1);

    let json: serde_json::Value = serde_json::from_str(&store.export_user_data().unwrap()).unwrap();
    assert_eq!(json["history"][0]["text"], "exported");
    assert_eq!(json["customTemplates"][0]["name"], "E");
    assert_eq!(json["favoriteIds"][0], id.to_string());
}

#[test]
fn test_records_round_trip_through_json() {
    let style = BannerStyle::new("谢谢 🙏")
        .with_colors(Rgba::PINK, Rgba::BLACK)
        .with_font_size(64.0)
        .with_animation(AnimationType::RandomFlash, 0.5)
        .with_bold(true)
        .with_background_image("BackgroundImages/bg_x.jpg", 0.4);
    let history = BannerHistory::new(style.clone());
    let template = BannerTemplate::custom("Thanks", style.clone(), TemplateCategory::Communication);

    let back: BannerStyle = serde_json::from_str(&serde_json::to_string(&style).unwrap()).unwrap();
    assert_eq!(back, style);
    let back: BannerHistory =
        serde_json::from_str(&serde_json::to_string(&history).unwrap()).unwrap();
    assert_eq!(back, history);
    let back: BannerTemplate =
        serde_json::from_str(&serde_json::to_string(&template).unwrap()).unwrap();
    assert_eq!(back, template);
}

#[test]
fn test_subscribers_see_each_change() {
    let dir = tempfile::tempdir().unwrap();
    let (mut store, _) = memory_store(dir.path(), 10);
    let events = store.subscribe();

    store.add_history(&BannerStyle::new("a"));
    let id = store.add_custom_template("T", &BannerStyle::new("t"), TemplateCategory::Custom);
    store.toggle_favorite(id);

    let received: Vec<StoreEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        [
            StoreEvent::HistoryChanged,
            StoreEvent::TemplatesChanged,
            StoreEvent::FavoritesChanged,
        ]
    );
}
