use std::fmt;

use ljpw_core::{AxisValues, Coordinate};
use serde::{Deserialize, Serialize};

/// Minimum max−min channel spread for a color to count as chromatic.
pub const GRAYSCALE_SPREAD: u8 = 30;

/// Per-channel axis mixing weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorWeights {
    /// Red channel: warmth (Love and Power).
    pub red: AxisValues,
    /// Green channel: growth (Justice and Wisdom).
    pub green: AxisValues,
    /// Blue channel: depth (Love and Justice).
    pub blue: AxisValues,
}

impl Default for ColorWeights {
    fn default() -> Self {
        Self {
            red: AxisValues {
                love: 0.6,
                justice: 0.0,
                power: 0.4,
                wisdom: 0.0,
            },
            green: AxisValues {
                love: 0.0,
                justice: 0.5,
                power: 0.0,
                wisdom: 0.5,
            },
            blue: AxisValues {
                love: 0.5,
                justice: 0.5,
                power: 0.0,
                wisdom: 0.0,
            },
        }
    }
}

/// Coarse color bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorName {
    /// Achromatic, brightest channel below 80.
    #[serde(rename = "Dark Gray")]
    DarkGray,
    /// Achromatic, brightest channel below 160.
    Gray,
    /// Achromatic, bright.
    #[serde(rename = "Light Gray")]
    LightGray,
    /// Red dominant with strong green.
    Orange,
    /// Red dominant with moderate green.
    #[serde(rename = "Red-Orange")]
    RedOrange,
    /// Red dominant.
    Red,
    /// Green dominant with strong blue.
    Cyan,
    /// Green dominant with moderate blue.
    #[serde(rename = "Green-Blue")]
    GreenBlue,
    /// Green dominant.
    Green,
    /// Blue dominant with strong red.
    Purple,
    /// Blue dominant with moderate red.
    #[serde(rename = "Blue-Purple")]
    BluePurple,
    /// Blue dominant.
    Blue,
    /// No strictly dominant channel.
    Mixed,
}

impl ColorName {
    /// Human readable bucket name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorName::DarkGray => "Dark Gray",
            ColorName::Gray => "Gray",
            ColorName::LightGray => "Light Gray",
            ColorName::Orange => "Orange",
            ColorName::RedOrange => "Red-Orange",
            ColorName::Red => "Red",
            ColorName::Cyan => "Cyan",
            ColorName::GreenBlue => "Green-Blue",
            ColorName::Green => "Green",
            ColorName::Purple => "Purple",
            ColorName::BluePurple => "Blue-Purple",
            ColorName::Blue => "Blue",
            ColorName::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of projecting a coordinate into RGB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorProjection {
    /// 8-bit channels.
    pub rgb: [u8; 3],
    /// `#rrggbb`.
    pub hex: String,
    /// Coarse bucket.
    pub name: ColorName,
}

fn channel(weights: &AxisValues, coord: &Coordinate) -> u8 {
    let value = coord
        .iter()
        .map(|(axis, x)| weights.get(axis) * x)
        .sum::<f64>()
        .clamp(0.0, 1.0);
    // Truncates, so only an exact 1.0 maps to 255.
    (value * 255.0) as u8
}

/// Projects `coord` into RGB with the supplied weights.
pub fn to_rgb(coord: &Coordinate, weights: &ColorWeights) -> [u8; 3] {
    [
        channel(&weights.red, coord),
        channel(&weights.green, coord),
        channel(&weights.blue, coord),
    ]
}

/// `#rrggbb` rendering of an RGB triple.
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Buckets an RGB triple into a coarse color name.
pub fn color_name(rgb: [u8; 3]) -> ColorName {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max - min < GRAYSCALE_SPREAD {
        return if max < 80 {
            ColorName::DarkGray
        } else if max < 160 {
            ColorName::Gray
        } else {
            ColorName::LightGray
        };
    }

    if r > g && r > b {
        if g > 150 {
            ColorName::Orange
        } else if g > 100 {
            ColorName::RedOrange
        } else {
            ColorName::Red
        }
    } else if g > r && g > b {
        if b > 150 {
            ColorName::Cyan
        } else if b > 100 {
            ColorName::GreenBlue
        } else {
            ColorName::Green
        }
    } else if b > r && b > g {
        if r > 150 {
            ColorName::Purple
        } else if r > 100 {
            ColorName::BluePurple
        } else {
            ColorName::Blue
        }
    } else {
        ColorName::Mixed
    }
}

/// Full projection: channels, hex string and bucket.
pub fn project(coord: &Coordinate, weights: &ColorWeights) -> ColorProjection {
    let rgb = to_rgb(coord, weights);
    ColorProjection {
        rgb,
        hex: rgb_to_hex(rgb),
        name: color_name(rgb),
    }
}
