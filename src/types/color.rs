//! Colors: stored ACI indices and their RGB values

use std::fmt;

/// Color index meaning "use the layer's color"
pub const BY_LAYER: i16 = 256;

/// Color index meaning "use the enclosing block's color"
pub const BY_BLOCK: i16 = 0;

/// A resolved 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Rgb { r: v, g: v, b: v }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Lookup from an AutoCAD Color Index (0–255) to RGB.
pub trait ColorTable {
    fn aci_color(&self, index: u8) -> Rgb;
}

/// The standard 256-entry ACI palette.
#[derive(Debug, Clone)]
pub struct AciPalette {
    colors: [Rgb; 256],
}

const BASE_COLORS: [Rgb; 10] = [
    Rgb::BLACK,
    Rgb::new(255, 0, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::WHITE,
    Rgb::gray(128),
    Rgb::gray(192),
];

const GRAYS: [u8; 6] = [51, 91, 132, 173, 214, 255];

/// Brightness steps for the last digit pairs 0/1, 2/3, 4/5, 6/7, 8/9
const VALUES: [f64; 5] = [255.0, 165.0, 127.0, 76.0, 38.0];

impl AciPalette {
    pub fn new() -> Self {
        let mut colors = [Rgb::BLACK; 256];
        colors[..10].copy_from_slice(&BASE_COLORS);
        for (index, slot) in colors.iter_mut().enumerate().take(250).skip(10) {
            let hue = ((index / 10) as f64 - 1.0) * 15.0;
            let digit = index % 10;
            let value = VALUES[digit / 2];
            let saturation = if digit % 2 == 0 { 1.0 } else { 0.5 };
            *slot = hsv_to_rgb(hue, saturation, value);
        }
        for (offset, &g) in GRAYS.iter().enumerate() {
            colors[250 + offset] = Rgb::gray(g);
        }
        Self { colors }
    }
}

impl Default for AciPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTable for AciPalette {
    fn aci_color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }
}

/// Hue in degrees, saturation 0–1, value 0–255. Channels are truncated.
fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let chroma = value * saturation;
    let sector = (hue / 60.0) % 6.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = value - chroma;
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Rgb::new((r + m) as u8, (g + m) as u8, (b + m) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_colors() {
        let palette = AciPalette::new();
        assert_eq!(palette.aci_color(0), Rgb::BLACK);
        assert_eq!(palette.aci_color(1), Rgb::new(255, 0, 0));
        assert_eq!(palette.aci_color(5), Rgb::new(0, 0, 255));
        assert_eq!(palette.aci_color(7), Rgb::WHITE);
        assert_eq!(palette.aci_color(8), Rgb::gray(128));
    }

    #[test]
    fn test_hsv_ramp() {
        let palette = AciPalette::new();
        assert_eq!(palette.aci_color(10), Rgb::new(255, 0, 0));
        assert_eq!(palette.aci_color(11), Rgb::new(255, 127, 127));
        // hue 60 → yellow
        assert_eq!(palette.aci_color(50), Rgb::new(255, 255, 0));
        // hue 120 → green, value step 165
        assert_eq!(palette.aci_color(92), Rgb::new(0, 165, 0));
        // hue 240 → blue
        assert_eq!(palette.aci_color(170), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_grays() {
        let palette = AciPalette::new();
        assert_eq!(palette.aci_color(250), Rgb::gray(51));
        assert_eq!(palette.aci_color(255), Rgb::WHITE);
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(255, 0, 0).to_string(), "RGB(255, 0, 0)");
    }
}
