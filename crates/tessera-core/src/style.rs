//! Block style keys and resolved style parameters.
//!
//! Abbreviation blocks may override a small whitelist of CSS properties.
//! Validation of the values lives in the parser; this module only defines the
//! keys and the ordered parameter map.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use thiserror::Error;

/// A whitelisted block style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    BorderColor,
    BackgroundColor,
    TextAlign,
    Padding,
}

impl StyleKey {
    /// All keys in their canonical order.
    pub const ALL: [StyleKey; 4] = [
        StyleKey::BorderColor,
        StyleKey::BackgroundColor,
        StyleKey::TextAlign,
        StyleKey::Padding,
    ];

    /// Returns the CSS property name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BorderColor => "border-color",
            Self::BackgroundColor => "background-color",
            Self::TextAlign => "text-align",
            Self::Padding => "padding",
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a property name outside the whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported style property `{0}`")]
pub struct UnknownStyleKey(pub String);

impl FromStr for StyleKey {
    type Err = UnknownStyleKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownStyleKey(s.to_string()))
    }
}

/// Validated style parameters, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleParams {
    values: IndexMap<StyleKey, String>,
}

impl StyleParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: StyleKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `self` with every parameter of `overrides` applied on top.
    pub fn merged(&self, overrides: &StyleParams) -> StyleParams {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value);
        }
        merged
    }

    /// Renders the parameters as an inline CSS declaration list:
    /// `key: value;` entries joined by single spaces.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
