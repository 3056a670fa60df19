//! Cell colours, shared by the sampler and the renderer

use crate::automaton::Cell;
use serde::{Deserialize, Serialize};

pub type Rgb = [u8; 3];

/// One colour per cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(with = "hex_color")]
    pub background: Rgb,
    #[serde(with = "hex_color")]
    pub foreground: Rgb,
    #[serde(with = "hex_color")]
    pub far_foreground: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0xb2, 0x22, 0x22],
            foreground: [0xff, 0xff, 0xff],
            far_foreground: [0xd8, 0x90, 0x90],
        }
    }
}

impl Palette {
    pub fn color(&self, cell: Cell) -> Rgb {
        match cell {
            Cell::Background => self.background,
            Cell::Foreground => self.foreground,
            Cell::FarForeground => self.far_foreground,
        }
    }

    /// Opaque RGBA colour of a cell
    pub fn rgba(&self, cell: Cell) -> [u8; 4] {
        let [r, g, b] = self.color(cell);
        [r, g, b, 0xff]
    }

    /// Classify a pixel by exact RGB match; anything unrecognised is Foreground
    pub fn classify(&self, rgb: Rgb) -> Cell {
        if rgb == self.background {
            Cell::Background
        } else if rgb == self.far_foreground {
            Cell::FarForeground
        } else {
            Cell::Foreground
        }
    }
}

/// `#rrggbb` strings in config files
pub mod hex_color {
    use super::Rgb;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(text: &str) -> Result<Rgb, String> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("expected a #rrggbb colour, got '{}'", text));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("invalid hex digits in colour '{}'", text))
        };
        Ok([channel(0)?, channel(2)?, channel(4)?])
    }

    pub fn format(rgb: &Rgb) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
    }

    pub fn serialize<S: Serializer>(rgb: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(rgb))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_match() {
        let palette = Palette::default();
        assert_eq!(palette.classify([178, 34, 34]), Cell::Background);
        assert_eq!(palette.classify([216, 144, 144]), Cell::FarForeground);
        assert_eq!(palette.classify([255, 255, 255]), Cell::Foreground);
        // Off by one channel is not a match
        assert_eq!(palette.classify([178, 34, 35]), Cell::Foreground);
        assert_eq!(palette.classify([0, 0, 0]), Cell::Foreground);
    }

    #[test]
    fn test_colours_round_trip_through_classify() {
        let palette = Palette::default();
        for cell in Cell::ALL {
            assert_eq!(palette.classify(palette.color(cell)), cell);
        }
        assert_eq!(palette.rgba(Cell::Background), [0xb2, 0x22, 0x22, 0xff]);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_color::parse("#b22222"), Ok([0xb2, 0x22, 0x22]));
        assert_eq!(hex_color::parse("D89090"), Ok([0xd8, 0x90, 0x90]));
        assert!(hex_color::parse("#fff").is_err());
        assert!(hex_color::parse("#gg0000").is_err());
        assert_eq!(hex_color::format(&[0xd8, 0x90, 0x90]), "#d89090");
    }

    #[test]
    fn test_palette_yaml() {
        let yaml = serde_yaml::to_string(&Palette::default()).unwrap();
        assert!(yaml.contains("#b22222"));
        let parsed: Palette = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, Palette::default());
    }
}
