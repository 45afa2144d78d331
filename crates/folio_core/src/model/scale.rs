//! UI scale tokens and their bounds.
//!
//! # Responsibility
//! - Define the five layout tokens driven by the size controller.
//! - Map tokens to and from the CSS custom properties they render into.
//!
//! # Invariants
//! - Every `ScaleTokens` value satisfies `min <= value <= max` per key.
//! - Unreadable CSS values fall back to the key minimum, never to an error.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One scalable layout token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleKey {
    FontSize,
    Padding,
    PaddingSmall,
    Radius,
    Size,
}

/// Inclusive bounds and per-step delta for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleBounds {
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

impl ScaleBounds {
    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

impl ScaleKey {
    /// All keys in commit order.
    pub const ALL: [ScaleKey; 5] = [
        ScaleKey::FontSize,
        ScaleKey::Padding,
        ScaleKey::PaddingSmall,
        ScaleKey::Radius,
        ScaleKey::Size,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FontSize => "font-size",
            Self::Padding => "padding",
            Self::PaddingSmall => "padding-small",
            Self::Radius => "radius",
            Self::Size => "size",
        }
    }

    /// CSS property on the document root that renders this token.
    pub fn css_property(self) -> &'static str {
        match self {
            Self::FontSize => "font-size",
            Self::Padding => "--global-padding",
            Self::PaddingSmall => "--global-padding-small",
            Self::Radius => "--global-radius",
            Self::Size => "--global-size",
        }
    }

    pub fn bounds(self) -> ScaleBounds {
        match self {
            Self::FontSize => ScaleBounds {
                min: 12,
                max: 32,
                step: 8,
            },
            Self::Padding => ScaleBounds {
                min: 4,
                max: 28,
                step: 4,
            },
            Self::PaddingSmall => ScaleBounds {
                min: 2,
                max: 14,
                step: 2,
            },
            Self::Radius => ScaleBounds {
                min: 6,
                max: 32,
                step: 8,
            },
            Self::Size => ScaleBounds {
                min: 10,
                max: 100,
                step: 32,
            },
        }
    }
}

impl Display for ScaleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full set of active scale token values, in pixels.
///
/// Fields are private so every value passes through clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScaleTokenValues", into = "ScaleTokenValues")]
pub struct ScaleTokens {
    values: [i32; 5],
}

impl ScaleTokens {
    /// Every token at its minimum.
    pub fn floor() -> Self {
        Self::from_fn(|key| key.bounds().min)
    }

    /// Every token at its maximum.
    pub fn ceiling() -> Self {
        Self::from_fn(|key| key.bounds().max)
    }

    /// Builds a token set from a per-key function, clamping each value.
    pub fn from_fn(mut value_of: impl FnMut(ScaleKey) -> i32) -> Self {
        let mut values = [0; 5];
        for (slot, key) in values.iter_mut().zip(ScaleKey::ALL) {
            *slot = key.bounds().clamp(value_of(key));
        }
        Self { values }
    }

    /// Reads tokens from rendered CSS property values.
    ///
    /// `lookup` receives the CSS property name. Missing or malformed values
    /// degrade to that key's minimum.
    pub fn from_css(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        Self::from_fn(|key| {
            let raw = lookup(key.css_property());
            match raw.as_deref().and_then(parse_px) {
                Some(value) => value,
                None => {
                    warn!(
                        "event=scale_read module=scale status=fallback key={} raw={:?} fallback={}",
                        key,
                        raw,
                        key.bounds().min
                    );
                    key.bounds().min
                }
            }
        })
    }

    pub fn get(&self, key: ScaleKey) -> i32 {
        self.values[index_of(key)]
    }

    /// Returns a copy with `key` set to `value`, clamped.
    pub fn with(mut self, key: ScaleKey, value: i32) -> Self {
        self.values[index_of(key)] = key.bounds().clamp(value);
        self
    }

    /// `(css property, "Npx")` pairs for all five tokens.
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        ScaleKey::ALL
            .iter()
            .map(|key| (key.css_property(), format!("{}px", self.get(*key))))
            .collect()
    }

    pub fn is_floor(&self) -> bool {
        *self == Self::floor()
    }

    pub fn is_ceiling(&self) -> bool {
        *self == Self::ceiling()
    }
}

impl Default for ScaleTokens {
    fn default() -> Self {
        Self::floor()
    }
}

/// Keyed serde shape, e.g. `{"font-size": 20, "padding": 8, ...}`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ScaleTokenValues {
    #[serde(default)]
    font_size: Option<i32>,
    #[serde(default)]
    padding: Option<i32>,
    #[serde(default)]
    padding_small: Option<i32>,
    #[serde(default)]
    radius: Option<i32>,
    #[serde(default)]
    size: Option<i32>,
}

impl From<ScaleTokenValues> for ScaleTokens {
    fn from(value: ScaleTokenValues) -> Self {
        Self::from_fn(|key| {
            let configured = match key {
                ScaleKey::FontSize => value.font_size,
                ScaleKey::Padding => value.padding,
                ScaleKey::PaddingSmall => value.padding_small,
                ScaleKey::Radius => value.radius,
                ScaleKey::Size => value.size,
            };
            configured.unwrap_or(key.bounds().min)
        })
    }
}

impl From<ScaleTokens> for ScaleTokenValues {
    fn from(value: ScaleTokens) -> Self {
        Self {
            font_size: Some(value.get(ScaleKey::FontSize)),
            padding: Some(value.get(ScaleKey::Padding)),
            padding_small: Some(value.get(ScaleKey::PaddingSmall)),
            radius: Some(value.get(ScaleKey::Radius)),
            size: Some(value.get(ScaleKey::Size)),
        }
    }
}

/// Parses `"20px"`, `"20"` or `" 20px "` into pixels.
pub fn parse_px(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i32>().ok()
}

fn index_of(key: ScaleKey) -> usize {
    match key {
        ScaleKey::FontSize => 0,
        ScaleKey::Padding => 1,
        ScaleKey::PaddingSmall => 2,
        ScaleKey::Radius => 3,
        ScaleKey::Size => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_px, ScaleKey, ScaleTokens};
    use std::collections::HashMap;

    #[test]
    fn parse_px_accepts_suffix_and_whitespace() {
        assert_eq!(parse_px("20px"), Some(20));
        assert_eq!(parse_px(" 14 "), Some(14));
        assert_eq!(parse_px("px"), None);
        assert_eq!(parse_px("large"), None);
    }

    #[test]
    fn from_css_falls_back_to_minimum_per_key() {
        let mut css = HashMap::new();
        css.insert("font-size", "20px".to_string());
        css.insert("--global-padding", "garbage".to_string());

        let tokens = ScaleTokens::from_css(|name| css.get(name).cloned());
        assert_eq!(tokens.get(ScaleKey::FontSize), 20);
        assert_eq!(tokens.get(ScaleKey::Padding), 4);
        assert_eq!(tokens.get(ScaleKey::Size), 10);
    }

    #[test]
    fn from_css_clamps_out_of_range_values() {
        let tokens = ScaleTokens::from_css(|name| match name {
            "--global-size" => Some("500px".to_string()),
            "--global-radius" => Some("-3px".to_string()),
            _ => None,
        });
        assert_eq!(tokens.get(ScaleKey::Size), 100);
        assert_eq!(tokens.get(ScaleKey::Radius), 6);
    }

    #[test]
    fn css_properties_cover_all_keys_with_px_units() {
        let properties = ScaleTokens::floor().css_properties();
        assert_eq!(properties.len(), 5);
        assert_eq!(properties[0], ("font-size", "12px".to_string()));
        assert_eq!(properties[4], ("--global-size", "10px".to_string()));
    }
}
