//! Color theme slots.
//!
//! # Invariants
//! - A `ThemeConfig` always holds a value for each of the nine slots.
//! - Persisted themes missing slots are completed from the defaults.

use super::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Named color slot in the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeSlot {
    Primary,
    Background,
    Card,
    Text,
    Subtext,
    Border,
    Holiday,
    Sunday,
    Saturday,
}

impl ThemeSlot {
    /// All slots in settings-screen order.
    pub const ALL: [ThemeSlot; 9] = [
        ThemeSlot::Primary,
        ThemeSlot::Background,
        ThemeSlot::Card,
        ThemeSlot::Text,
        ThemeSlot::Subtext,
        ThemeSlot::Border,
        ThemeSlot::Holiday,
        ThemeSlot::Sunday,
        ThemeSlot::Saturday,
    ];

    /// Persisted record key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Background => "background",
            Self::Card => "card",
            Self::Text => "text",
            Self::Subtext => "subtext",
            Self::Border => "border",
            Self::Holiday => "holiday",
            Self::Sunday => "sunday",
            Self::Saturday => "saturday",
        }
    }

    pub fn from_key(value: &str) -> ModelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.key() == value)
            .ok_or_else(|| ModelError::UnknownThemeSlot(value.to_string()))
    }

    /// Settings-screen label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "メインカラー",
            Self::Background => "アプリ背景",
            Self::Card => "カード背景",
            Self::Text => "通常文字",
            Self::Subtext => "薄い文字",
            Self::Border => "境界線",
            Self::Holiday => "休日・祝日",
            Self::Sunday => "日曜日",
            Self::Saturday => "土曜日",
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            Self::Primary => "#6366f1",
            Self::Background => "#f8fafc",
            Self::Card => "#ffffff",
            Self::Text => "#1e293b",
            Self::Subtext => "#64748b",
            Self::Border => "#e2e8f0",
            Self::Holiday => "#ef4444",
            Self::Sunday => "#ef4444",
            Self::Saturday => "#3b82f6",
        }
    }
}

/// Color value per slot. Values are opaque display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    primary: String,
    background: String,
    card: String,
    text: String,
    subtext: String,
    border: String,
    holiday: String,
    sunday: String,
    saturday: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let color = |slot: ThemeSlot| slot.default_color().to_string();
        Self {
            primary: color(ThemeSlot::Primary),
            background: color(ThemeSlot::Background),
            card: color(ThemeSlot::Card),
            text: color(ThemeSlot::Text),
            subtext: color(ThemeSlot::Subtext),
            border: color(ThemeSlot::Border),
            holiday: color(ThemeSlot::Holiday),
            sunday: color(ThemeSlot::Sunday),
            saturday: color(ThemeSlot::Saturday),
        }
    }
}

impl ThemeConfig {
    pub fn color(&self, slot: ThemeSlot) -> &str {
        match slot {
            ThemeSlot::Primary => &self.primary,
            ThemeSlot::Background => &self.background,
            ThemeSlot::Card => &self.card,
            ThemeSlot::Text => &self.text,
            ThemeSlot::Subtext => &self.subtext,
            ThemeSlot::Border => &self.border,
            ThemeSlot::Holiday => &self.holiday,
            ThemeSlot::Sunday => &self.sunday,
            ThemeSlot::Saturday => &self.saturday,
        }
    }

    /// Replaces one slot; returns whether the stored value changed.
    pub fn set_color(&mut self, slot: ThemeSlot, value: impl Into<String>) -> bool {
        let value = value.into();
        let target = self.slot_mut(slot);
        if *target == value {
            return false;
        }
        *target = value;
        true
    }

    /// Slot/value pairs in settings-screen order.
    pub fn entries(&self) -> Vec<(ThemeSlot, &str)> {
        ThemeSlot::ALL
            .into_iter()
            .map(|slot| (slot, self.color(slot)))
            .collect()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn slot_mut(&mut self, slot: ThemeSlot) -> &mut String {
        match slot {
            ThemeSlot::Primary => &mut self.primary,
            ThemeSlot::Background => &mut self.background,
            ThemeSlot::Card => &mut self.card,
            ThemeSlot::Text => &mut self.text,
            ThemeSlot::Subtext => &mut self.subtext,
            ThemeSlot::Border => &mut self.border,
            ThemeSlot::Holiday => &mut self.holiday,
            ThemeSlot::Sunday => &mut self.sunday,
            ThemeSlot::Saturday => &mut self.saturday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ThemeConfig, ThemeSlot};

    #[test]
    fn default_theme_has_all_nine_slots() {
        let theme = ThemeConfig::default();
        let encoded = serde_json::to_value(&theme).unwrap();
        let object = encoded.as_object().expect("theme encodes as object");
        assert_eq!(object.len(), 9);
        for slot in ThemeSlot::ALL {
            assert_eq!(object[slot.key()], slot.default_color());
        }
    }

    #[test]
    fn partial_record_is_completed_from_defaults() {
        let theme: ThemeConfig =
            serde_json::from_str(r##"{"primary":"#000000","legacy":"#123456"}"##).unwrap();
        assert_eq!(theme.color(ThemeSlot::Primary), "#000000");
        assert_eq!(theme.color(ThemeSlot::Saturday), "#3b82f6");
    }

    #[test]
    fn set_color_touches_one_slot_and_reports_change() {
        let mut theme = ThemeConfig::default();
        assert!(theme.set_color(ThemeSlot::Border, "#111111"));
        assert!(!theme.set_color(ThemeSlot::Border, "#111111"));
        for (slot, value) in theme.entries() {
            if slot == ThemeSlot::Border {
                assert_eq!(value, "#111111");
            } else {
                assert_eq!(value, slot.default_color());
            }
        }
    }
}
