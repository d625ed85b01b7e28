use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Inline presentation properties for one region of the dialog.
///
/// Properties keep their insertion order and are stored with CSS (kebab-case)
/// names, so `borderRadius` and `border-radius` address the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleGroup {
    properties: Vec<(String, String)>,
}

impl StyleGroup {
    #[must_use]
    pub const fn new() -> Self {
        Self { properties: Vec::new() }
    }

    /// Builds a group from `(property, value)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut group = Self::new();
        for (name, value) in pairs {
            group.set(name, *value);
        }
        group
    }

    /// Sets a property, replacing an existing value in place.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let name = css_property_name(name);
        let value = value.into();
        match self.properties.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = css_property_name(name);
        self.properties.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }

    /// Overlays `overrides` onto this group. Keys not mentioned keep their current value.
    pub fn merge<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in overrides {
            if !name.as_ref().trim().is_empty() {
                self.set(name.as_ref(), value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Serialize for StyleGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for (name, value) in &self.properties {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Lowercase vendor prefixes browsers accept in script-style names (`msTransform`).
const VENDOR_PREFIXES: &[&str] = &["ms", "moz", "webkit"];

/// Converts a script-style (`boxShadow`) or snake_case (`box_shadow`) property
/// name to its CSS form (`box-shadow`). Vendor-prefixed names gain their
/// leading dash: `msTransform` and `WebkitTransform` become `-ms-transform`
/// and `-webkit-transform`.
///
/// Custom properties (`--brand-color`) are case-sensitive and returned untouched.
#[must_use]
pub fn css_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        return name.to_owned();
    }

    let mut css = String::with_capacity(name.len() + 4);
    let vendor_prefixed = VENDOR_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|ch| ch.is_ascii_uppercase())
    });
    if vendor_prefixed {
        css.push('-');
    }
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            css.push('-');
            css.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            css.push('-');
        } else {
            css.push(ch);
        }
    }
    css
}
