use crate::signatures::SignatureTable;
use crate::style::StyleGroup;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

pub const DEFAULT_SHOW_TO_CALL_TEXT: &str = "Show to call";
pub const DEFAULT_SCAN_TO_CALL_TEXT: &str = "Scan to call";
pub const DEFAULT_BUTTON_TEXT: &str = "Call Now";
pub const DEFAULT_QR_SIZE: u32 = 180;
pub const DEFAULT_COLOR_DARK: &str = "#000000";
pub const DEFAULT_COLOR_LIGHT: &str = "#ffffff";
pub const DEFAULT_LIBRARY_URL: &str = "https://cdn.jsdelivr.net/npm/qrcodejs@1.0.0/qrcode.min.js";

/// Error-correction level of the generated code.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum CorrectLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

/// Effective component configuration. Immutable once the handler is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelQrConfig {
    /// Accessible label of the dialog.
    pub show_to_call_text: String,
    /// Instruction shown under the code.
    pub scan_to_call_text: String,
    /// Label of the fallback dial button.
    pub button_text: String,
    pub qr_code: QrCodeOptions,
    pub styling: Styling,
    pub signature_table: SignatureTable,
    /// Script providing the global `QRCode` constructor.
    pub library_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeOptions {
    pub width: u32,
    pub height: u32,
    pub correct_level: CorrectLevel,
    pub color_dark: String,
    pub color_light: String,
}

/// Style groups, one per dialog region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Styling {
    pub modal: StyleGroup,
    pub backdrop: StyleGroup,
    pub title: StyleGroup,
    pub button: StyleGroup,
    pub description: StyleGroup,
}

// --- Default ---

impl Default for TelQrConfig {
    fn default() -> Self {
        Self {
            show_to_call_text: DEFAULT_SHOW_TO_CALL_TEXT.to_owned(),
            scan_to_call_text: DEFAULT_SCAN_TO_CALL_TEXT.to_owned(),
            button_text: DEFAULT_BUTTON_TEXT.to_owned(),
            qr_code: QrCodeOptions::default(),
            styling: Styling::default(),
            signature_table: SignatureTable::default(),
            library_url: DEFAULT_LIBRARY_URL.to_owned(),
        }
    }
}

impl Default for QrCodeOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_QR_SIZE,
            height: DEFAULT_QR_SIZE,
            correct_level: CorrectLevel::default(),
            color_dark: DEFAULT_COLOR_DARK.to_owned(),
            color_light: DEFAULT_COLOR_LIGHT.to_owned(),
        }
    }
}

impl Default for Styling {
    fn default() -> Self {
        Self {
            modal: StyleGroup::from_pairs(&[
                ("background", "#fff"),
                ("border", "1px solid #e5e7eb"),
                ("border-radius", "12px"),
                ("padding", "24px"),
                ("box-shadow", "0 20px 50px rgba(0,0,0,.2)"),
                ("max-width", "300px"),
            ]),
            backdrop: StyleGroup::from_pairs(&[("background", "rgba(0, 0, 0, 0.5)")]),
            title: StyleGroup::from_pairs(&[
                ("font-size", "18px"),
                ("font-weight", "bold"),
                ("color", "#333"),
                ("margin-bottom", "16px"),
                ("text-align", "center"),
            ]),
            button: StyleGroup::from_pairs(&[
                ("margin-top", "16px"),
                ("padding", "12px 20px"),
                ("background", "#007cba"),
                ("color", "white"),
                ("border", "none"),
                ("border-radius", "6px"),
                ("cursor", "pointer"),
                ("font-size", "14px"),
                ("width", "100%"),
            ]),
            description: StyleGroup::from_pairs(&[
                ("margin-top", "12px"),
                ("font-size", "14px"),
                ("color", "#666"),
                ("text-align", "center"),
            ]),
        }
    }
}

// --- Overrides ---

/// Caller-supplied partial configuration.
///
/// Every field is optional and read leniently: a value of the wrong shape is
/// treated as absent, so a partially broken record still applies what it can.
/// Keys are camelCase as in the browser; snake_case aliases serve config files
/// and environment variables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelQrConfigOverrides {
    #[serde(default, alias = "show_to_call_text", deserialize_with = "lenient")]
    pub show_to_call_text: Option<String>,
    #[serde(default, alias = "scan_to_call_text", deserialize_with = "lenient")]
    pub scan_to_call_text: Option<String>,
    #[serde(default, alias = "button_text", deserialize_with = "lenient")]
    pub button_text: Option<String>,
    #[serde(default, alias = "qr_code", deserialize_with = "lenient")]
    pub qr_code: Option<QrCodeOverrides>,
    #[serde(default, deserialize_with = "lenient")]
    pub styling: Option<StylingOverrides>,
    #[serde(default, alias = "signature_table", deserialize_with = "lenient")]
    pub signature_table: Option<String>,
    #[serde(default, alias = "library_url", deserialize_with = "lenient")]
    pub library_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeOverrides {
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<f64>,
    #[serde(default, alias = "correct_level", deserialize_with = "lenient")]
    pub correct_level: Option<String>,
    #[serde(default, alias = "color_dark", deserialize_with = "lenient")]
    pub color_dark: Option<String>,
    #[serde(default, alias = "color_light", deserialize_with = "lenient")]
    pub color_light: Option<String>,
}

/// Per-group style overrides. Keys keep the order the caller wrote them in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StylingOverrides {
    #[serde(default, deserialize_with = "lenient")]
    pub modal: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub backdrop: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub button: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Map<String, Value>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl TelQrConfig {
    /// Merges caller overrides onto the defaults. Never fails.
    #[must_use]
    pub fn from_overrides(overrides: TelQrConfigOverrides) -> Self {
        let mut config = Self::default();

        apply_text(&mut config.show_to_call_text, overrides.show_to_call_text);
        apply_text(&mut config.scan_to_call_text, overrides.scan_to_call_text);
        apply_text(&mut config.button_text, overrides.button_text);
        apply_text(&mut config.library_url, overrides.library_url);

        if let Some(qr) = overrides.qr_code {
            config.qr_code.apply(qr);
        }
        if let Some(styling) = overrides.styling {
            config.styling.apply(styling);
        }
        if let Some(table) =
            overrides.signature_table.and_then(|t| SignatureTable::from_str(t.trim()).ok())
        {
            config.signature_table = table;
        }

        config
    }

    /// Reads overrides from an arbitrary JSON value. Anything that is not an
    /// object yields the defaults.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let overrides = TelQrConfigOverrides::deserialize(value).unwrap_or_default();
        Self::from_overrides(overrides)
    }
}

impl QrCodeOptions {
    fn apply(&mut self, overrides: QrCodeOverrides) {
        if let Some(width) = overrides.width.and_then(pixel_size) {
            self.width = width;
        }
        if let Some(height) = overrides.height.and_then(pixel_size) {
            self.height = height;
        }
        if let Some(level) =
            overrides.correct_level.and_then(|l| CorrectLevel::from_str(l.trim()).ok())
        {
            self.correct_level = level;
        }
        apply_text(&mut self.color_dark, overrides.color_dark);
        apply_text(&mut self.color_light, overrides.color_light);
    }
}

impl Styling {
    fn apply(&mut self, overrides: StylingOverrides) {
        let groups = [
            (&mut self.modal, overrides.modal),
            (&mut self.backdrop, overrides.backdrop),
            (&mut self.title, overrides.title),
            (&mut self.button, overrides.button),
            (&mut self.description, overrides.description),
        ];
        for (group, values) in groups {
            if let Some(values) = values {
                group.merge(values.into_iter().filter_map(|(k, v)| style_value(v).map(|v| (k, v))));
            }
        }
    }
}

fn apply_text(slot: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *slot = value;
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_size(value: f64) -> Option<u32> {
    (1.0..=f64::from(u32::MAX)).contains(&value).then(|| value.round() as u32)
}

fn style_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pixel_size_rejects_nonsense() {
        assert_eq!(pixel_size(200.0), Some(200));
        assert_eq!(pixel_size(199.6), Some(200));
        assert_eq!(pixel_size(0.0), None);
        assert_eq!(pixel_size(-5.0), None);
        assert_eq!(pixel_size(f64::NAN), None);
    }

    #[test]
    fn wrong_field_types_are_ignored() {
        let overrides: TelQrConfigOverrides = serde_json::from_value(json!({
            "buttonText": 42,
            "scanToCallText": "Scan me",
            "qrCode": { "width": "wide", "height": 240 }
        }))
        .expect("lenient overrides deserialize");

        assert_eq!(overrides.button_text, None);
        assert_eq!(overrides.scan_to_call_text.as_deref(), Some("Scan me"));
        let qr = overrides.qr_code.expect("qr overrides present");
        assert_eq!(qr.width, None);
        assert_eq!(qr.height, Some(240.0));
    }

    #[test]
    fn numeric_style_values_are_stringified() {
        assert_eq!(style_value(json!(10)), Some("10".to_owned()));
        assert_eq!(style_value(json!("1px")), Some("1px".to_owned()));
        assert_eq!(style_value(json!(null)), None);
        assert_eq!(style_value(json!({"a": 1})), None);
    }
}
