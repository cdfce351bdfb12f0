//! Premium descriptors and entitlement gate
//!
//! Purchasing happens outside the app core; it only consumes a boolean
//! "is subscribed" signal. With gating disabled every feature is open.

use serde::{Deserialize, Serialize};

pub const LIFETIME_PRODUCT_ID: &str = "com.thankl.premium.lifetime";
pub const LIFETIME_PRICE: &str = "¥19.90";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PremiumFeature {
    UnlimitedPreview,
    AdvancedAnimations,
    CustomFonts,
    BackgroundImages,
    ExportFeatures,
    PrioritySupport,
}

impl PremiumFeature {
    pub const ALL: [PremiumFeature; 6] = [
        PremiumFeature::UnlimitedPreview,
        PremiumFeature::AdvancedAnimations,
        PremiumFeature::CustomFonts,
        PremiumFeature::BackgroundImages,
        PremiumFeature::ExportFeatures,
        PremiumFeature::PrioritySupport,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PremiumFeature::UnlimitedPreview => "Unlimited preview",
            PremiumFeature::AdvancedAnimations => "Advanced animations",
            PremiumFeature::CustomFonts => "Custom fonts",
            PremiumFeature::BackgroundImages => "Background images",
            PremiumFeature::ExportFeatures => "Export",
            PremiumFeature::PrioritySupport => "Priority support",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PremiumFeature::UnlimitedPreview => "Use full-screen preview without limits",
            PremiumFeature::AdvancedAnimations => "Unlock every animation effect",
            PremiumFeature::CustomFonts => "Artistic and neon text styles",
            PremiumFeature::BackgroundImages => "Use your own background pictures",
            PremiumFeature::ExportFeatures => "Export banners as images or video",
            PremiumFeature::PrioritySupport => "Faster answers from support",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PremiumFeature::UnlimitedPreview => "👁",
            PremiumFeature::AdvancedAnimations => "✨",
            PremiumFeature::CustomFonts => "🔤",
            PremiumFeature::BackgroundImages => "🖼",
            PremiumFeature::ExportFeatures => "📤",
            PremiumFeature::PrioritySupport => "🎧",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionDuration {
    Lifetime,
}

impl SubscriptionDuration {
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionDuration::Lifetime => "Lifetime unlock",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SubscriptionDuration::Lifetime => "Buy once, use forever",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionProduct {
    pub product_id: String,
    pub display_name: String,
    pub description: String,
    pub price: String,
    pub duration: SubscriptionDuration,
    pub features: Vec<String>,
}

/// Products offered on the purchase screen
pub fn lifetime_products() -> Vec<SubscriptionProduct> {
    vec![SubscriptionProduct {
        product_id: LIFETIME_PRODUCT_ID.to_string(),
        display_name: "Premium - Lifetime".to_string(),
        description: "One purchase unlocks every premium feature for good".to_string(),
        price: LIFETIME_PRICE.to_string(),
        duration: SubscriptionDuration::Lifetime,
        features: PremiumFeature::ALL
            .iter()
            .map(|f| f.display_name().to_string())
            .collect(),
    }]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubscriptionStatus {
    #[default]
    NotSubscribed,
    Subscribed,
    Expired,
    InGracePeriod,
    Unknown,
}

impl SubscriptionStatus {
    pub fn description(&self) -> &'static str {
        match self {
            SubscriptionStatus::Subscribed => "Premium unlocked",
            SubscriptionStatus::NotSubscribed => "Free version",
            SubscriptionStatus::Expired => "Subscription expired",
            SubscriptionStatus::InGracePeriod => "In grace period",
            SubscriptionStatus::Unknown => "Status unknown",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Subscribed | SubscriptionStatus::InGracePeriod
        )
    }
}

/// Source of the purchase state
pub trait EntitlementProvider: Send + Sync {
    fn status(&self) -> SubscriptionStatus;

    fn is_subscribed(&self) -> bool {
        self.status().is_active()
    }
}

/// Fixed entitlement, for builds without a store integration
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEntitlement(pub SubscriptionStatus);

impl EntitlementProvider for StaticEntitlement {
    fn status(&self) -> SubscriptionStatus {
        self.0
    }
}

/// Decides whether a premium feature may be used
pub struct FeatureGate {
    gating_enabled: bool,
    provider: Box<dyn EntitlementProvider>,
}

impl FeatureGate {
    pub fn new(gating_enabled: bool, provider: Box<dyn EntitlementProvider>) -> Self {
        Self {
            gating_enabled,
            provider,
        }
    }

    /// Everything open, as shipped
    pub fn open() -> Self {
        Self::new(false, Box::new(StaticEntitlement::default()))
    }

    pub fn can_use(&self, _feature: PremiumFeature) -> bool {
        !self.gating_enabled || self.provider.is_subscribed()
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.provider.status()
    }
}

impl std::fmt::Debug for FeatureGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureGate")
            .field("gating_enabled", &self.gating_enabled)
            .field("status", &self.provider.status())
            .finish()
    }
}
