use super::style::BannerStyle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A previously displayed banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerHistory {
    pub id: Uuid,
    pub text: String,
    pub style: BannerStyle,
    pub timestamp: DateTime<Utc>,
}

impl BannerHistory {
    pub fn new(style: BannerStyle) -> Self {
        Self::at(style, Utc::now())
    }

    pub fn at(style: BannerStyle, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: style.text.clone(),
            style,
            timestamp,
        }
    }
}
