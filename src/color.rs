// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// The canvas API takes colors as CSS strings; the stored `a` byte scales the
// per-draw opacity, so a half transparent color halves every dot and line.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColorOption")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// Options may give a color either as channels or as a packed 0xRRGGBBAA number
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorOption {
    Packed(u32),
    Channels {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
}

fn opaque() -> u8 {
    0xff
}

impl From<ColorOption> for Color {
    fn from(option: ColorOption) -> Self {
        match option {
            ColorOption::Packed(num) => Color::from_u32(num),
            ColorOption::Channels { r, g, b, a } => Color { r, g, b, a },
        }
    }
}

impl Color {
    // Dot color of the background particles
    pub const VIOLET: Color = Color::rgb(167, 139, 250);
    // Connection line color
    pub const PURPLE: Color = Color::rgb(124, 58, 237);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    /// Formats the color as a CSS `rgba()` string, with the given opacity
    /// scaled by the color's own alpha channel.
    pub fn css_rgba(&self, alpha: f64) -> String {
        let alpha = alpha * (self.a as f64 / 255.0);
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}
