//! Ball color palette
//!
//! Colors are cosmetic only. The same palette seeds the initial ball colors
//! and is offered to the color picker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `#RRGGBB` color code, stored exactly as given (digit case included)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `#` followed by exactly six hex digits
    pub fn parse(code: &str) -> Option<Self> {
        let digits = code.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels
    pub fn rgb(&self) -> [u8; 3] {
        // Validated on construction, so every pair is a hex byte
        let byte = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [byte(1), byte(3), byte(5)]
    }

    /// Linear 0-1 RGBA with full opacity, for render sinks
    pub fn to_rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.rgb();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code).ok_or_else(|| format!("invalid color code {code:?}, expected #RRGGBB"))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

/// A named palette color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub name: String,
    pub code: HexColor,
}

/// Ordered list of named colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

/// Default colors, classic pool-ball set
const DEFAULT_COLORS: [(&str, &str); 8] = [
    ("Yellow", "#FDD835"),
    ("Blue", "#1E88E5"),
    ("Red", "#E53935"),
    ("Purple", "#8E24AA"),
    ("Orange", "#FB8C00"),
    ("Green", "#43A047"),
    ("Maroon", "#8D1B3D"),
    ("Black", "#212121"),
];

impl Default for Palette {
    fn default() -> Self {
        let entries = DEFAULT_COLORS
            .iter()
            .filter_map(|(name, code)| {
                HexColor::parse(code).map(|code| PaletteEntry {
                    name: (*name).to_string(),
                    code,
                })
            })
            .collect();
        Self { entries }
    }
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert_eq!(HexColor::parse("#ff8800").unwrap().as_str(), "#ff8800");
        assert_eq!(HexColor::parse("#Ff8800").unwrap().as_str(), "#Ff8800");
        assert!(HexColor::parse("#000000").is_some());
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        assert!(HexColor::parse("ff8800").is_none());
        assert!(HexColor::parse("#ff880").is_none());
        assert!(HexColor::parse("#ff88000").is_none());
        assert!(HexColor::parse("#gg8800").is_none());
        assert!(HexColor::parse("").is_none());
    }

    #[test]
    fn test_to_rgba() {
        let rgba = HexColor::parse("#FF0080").unwrap().to_rgba();
        assert_eq!(rgba[0], 1.0);
        assert_eq!(rgba[1], 0.0);
        assert!((rgba[2] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(rgba[3], 1.0);
    }

    #[test]
    fn test_lowercase_code_keeps_case_and_channels() {
        let color = HexColor::parse("#ff8800").unwrap();
        assert_eq!(color.to_string(), "#ff8800");
        assert_eq!(color.rgb(), [0xFF, 0x88, 0x00]);
        assert_eq!(String::from(color), "#ff8800");
    }

    #[test]
    fn test_default_palette_is_complete() {
        let palette = Palette::default();
        assert_eq!(palette.entries().len(), DEFAULT_COLORS.len());
        assert_eq!(palette.entries()[2].name, "Red");
        assert_eq!(palette.entries()[2].code.as_str(), "#E53935");
    }

    #[test]
    fn test_serde_rejects_bad_code() {
        let bad = r##"[{"name": "Nope", "code": "#12"}]"##;
        assert!(serde_json::from_str::<Palette>(bad).is_err());

        let good = r##"[{"name": "Teal", "code": "#008080"}]"##;
        let palette: Palette = serde_json::from_str(good).unwrap();
        assert_eq!(palette.entries()[0].code.as_str(), "#008080");
    }
}
