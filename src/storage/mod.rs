pub mod images;
pub mod kv;
pub mod store;

pub use images::{DecodedImage, ImageAssets, ImageCodec, JpegCodec};
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use store::{keys, BannerStore, StoreEvent, UsageStatistics, DEFAULT_MAX_HISTORY};
