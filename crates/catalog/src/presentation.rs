//! Badge lookup tables and price formatting.
//!
//! Every closed enum maps to a badge through an exhaustive match. Only raw string
//! labels (user input, unknown document values) go through a fallback.

use sao_core::{Money, Pricing};
use sao_features::{DependencyKind, FeatureCategory};
use sao_offers::{
    AttractionKind, BillingCycle, ContinuityCategory, ContinuityOffer, DownsellKind, OfferKind,
    UpsellCategory,
};

use crate::search::ResultKind;

/// Colour token of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Primary,
    Blue,
    Green,
    Orange,
    Purple,
    Red,
    Indigo,
    Chart2,
    Chart3,
    Chart4,
    Chart5,
}

impl Tone {
    pub fn token(self) -> &'static str {
        match self {
            Tone::Primary => "primary",
            Tone::Blue => "blue-500",
            Tone::Green => "green-500",
            Tone::Orange => "orange-500",
            Tone::Purple => "purple-500",
            Tone::Red => "red-500",
            Tone::Indigo => "indigo-500",
            Tone::Chart2 => "chart-2",
            Tone::Chart3 => "chart-3",
            Tone::Chart4 => "chart-4",
            Tone::Chart5 => "chart-5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
    pub emoji: &'static str,
}

impl Badge {
    const fn new(label: &'static str, tone: Tone, emoji: &'static str) -> Self {
        Self { label, tone, emoji }
    }

    pub fn text(&self) -> String {
        if self.emoji.is_empty() {
            self.label.to_owned()
        } else {
            format!("{} {}", self.emoji, self.label)
        }
    }
}

pub const FALLBACK_TONE: Tone = Tone::Primary;

pub trait Presentable: Copy {
    fn badge(self) -> Badge;
}

impl Presentable for FeatureCategory {
    fn badge(self) -> Badge {
        match self {
            FeatureCategory::Core => Badge::new("CORE", Tone::Primary, "⭐"),
            FeatureCategory::Premium => Badge::new("PREMIUM", Tone::Chart2, "💎"),
            FeatureCategory::Automation => Badge::new("AUTOMATION", Tone::Chart3, "🤖"),
            FeatureCategory::Analytics => Badge::new("ANALYTICS", Tone::Chart4, "📊"),
            FeatureCategory::Advanced => Badge::new("ADVANCED", Tone::Chart5, "🚀"),
        }
    }
}

impl Presentable for DependencyKind {
    fn badge(self) -> Badge {
        match self {
            DependencyKind::Critical => Badge::new("Critical Foundation", Tone::Red, "⚠️"),
            DependencyKind::Paired => Badge::new("Requires Other Features", Tone::Orange, "🔗"),
            DependencyKind::Standalone => Badge::new("Standalone Ready", Tone::Green, "✨"),
        }
    }
}

impl Presentable for AttractionKind {
    fn badge(self) -> Badge {
        match self {
            AttractionKind::Decoy => Badge::new("Decoy Offer", Tone::Orange, "🎯"),
            AttractionKind::BuyXGetY => Badge::new("Buy X Get Y", Tone::Green, "🎁"),
            AttractionKind::PayLessNow => Badge::new("Pay Less Now", Tone::Blue, "💰"),
            AttractionKind::Trial => Badge::new("Trial Offer", Tone::Purple, "⚡"),
        }
    }
}

impl Presentable for UpsellCategory {
    fn badge(self) -> Badge {
        match self {
            UpsellCategory::Capability => Badge::new("Capability Upgrade", Tone::Blue, "⚡"),
            UpsellCategory::Intelligence => Badge::new("Intelligence Add-on", Tone::Purple, "📊"),
            UpsellCategory::Pipeline => Badge::new("Pipeline Expansion", Tone::Green, "📈"),
            UpsellCategory::Coaching => Badge::new("Coaching & Strategy", Tone::Orange, "🎓"),
        }
    }
}

impl Presentable for DownsellKind {
    fn badge(self) -> Badge {
        match self {
            DownsellKind::PaymentPlan => Badge::new("Payment Plan", Tone::Blue, "💰"),
            DownsellKind::FeatureReduction => Badge::new("Feature Reduction", Tone::Orange, "📉"),
        }
    }
}

impl Presentable for ContinuityCategory {
    fn badge(self) -> Badge {
        match self {
            ContinuityCategory::Platform => Badge::new("Platform Continuity", Tone::Blue, "🔄"),
            ContinuityCategory::Campaign => Badge::new("Campaign License", Tone::Green, "📈"),
            ContinuityCategory::Maintenance => Badge::new("Maintenance", Tone::Purple, "🔧"),
            ContinuityCategory::Coaching => Badge::new("Coaching", Tone::Orange, "🎓"),
        }
    }
}

impl Presentable for OfferKind {
    fn badge(self) -> Badge {
        ResultKind::from(self).badge()
    }
}

impl Presentable for ResultKind {
    fn badge(self) -> Badge {
        match self {
            ResultKind::Pricing => Badge::new("Pricing", Tone::Blue, "💲"),
            ResultKind::Feature => Badge::new("Feature", Tone::Purple, "✨"),
            ResultKind::Attraction => Badge::new("Attraction", Tone::Orange, "🎯"),
            ResultKind::Upsell => Badge::new("Upsell", Tone::Green, "📈"),
            ResultKind::Downsell => Badge::new("Downsell", Tone::Red, "📉"),
            ResultKind::Continuity => Badge::new("Continuity", Tone::Indigo, "🔄"),
        }
    }
}

/// Badge text for a raw label: the enum's badge when it parses, else the label as given.
pub fn label_for_raw<T: Presentable>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> String {
    match parse(raw) {
        Some(value) => value.badge().text(),
        None => raw.trim().to_owned(),
    }
}

/// Tone for a raw label, `FALLBACK_TONE` when it does not parse.
pub fn tone_for_raw<T: Presentable>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Tone {
    parse(raw).map_or(FALLBACK_TONE, |v| v.badge().tone)
}

fn priced_parts(pricing: &Pricing, setup_suffix: &str) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(setup) = pricing.setup.filter(|m| !m.is_zero()) {
        parts.push(format!("{setup}{setup_suffix}"));
    }
    if let Some(monthly) = pricing.monthly.filter(|m| !m.is_zero()) {
        parts.push(format!("{monthly}/mo"));
    }
    if let Some(annual) = pricing.annual.filter(|m| !m.is_zero()) {
        parts.push(format!("{annual}/yr"));
    }
    parts
}

/// `£68,000 + £4,500/mo`, or "Custom Pricing".
pub fn format_offer_price(pricing: &Pricing) -> String {
    let parts = priced_parts(pricing, "");
    if parts.is_empty() {
        "Custom Pricing".to_owned()
    } else {
        parts.join(" + ")
    }
}

/// `£22,000 setup + £500-£1,500/mo`, or "Custom Pricing".
pub fn format_feature_price(pricing: &Pricing) -> String {
    let mut parts = priced_parts(pricing, " setup");
    if let Some((low, high)) = pricing.volume_range() {
        parts.push(format_volume_range(low, high));
    }
    if parts.is_empty() {
        "Custom Pricing".to_owned()
    } else {
        parts.join(" + ")
    }
}

pub fn format_volume_range(low: Money, high: Money) -> String {
    if low == high {
        format!("{low}/mo")
    } else {
        format!("{low}-{high}/mo")
    }
}

/// `£15,000 setup + £3,200/mo`, or "Included" when nothing is charged.
pub fn format_continuity_price(offer: &ContinuityOffer) -> String {
    let mut parts = Vec::new();
    if let Some(setup) = offer.base.pricing.setup.filter(|m| !m.is_zero()) {
        parts.push(format!("{setup} setup"));
    }
    if !offer.recurring_price.is_zero() {
        parts.push(format!("{}{}", offer.recurring_price, offer.billing_cycle.suffix()));
    }
    if parts.is_empty() {
        "Included".to_owned()
    } else {
        parts.join(" + ")
    }
}

pub fn format_cycle(cycle: BillingCycle) -> &'static str {
    match cycle {
        BillingCycle::Monthly => "Monthly",
        BillingCycle::Quarterly => "Quarterly",
        BillingCycle::Annual => "Annual",
    }
}
