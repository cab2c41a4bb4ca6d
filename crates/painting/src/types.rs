use serde::{Deserialize, Serialize};

use crate::error::PaintError;

/// A single pixel as [r, g, b, a] bytes
pub type Rgba = [u8; 4];

/// Fully transparent black, the value of every fresh pixel
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Brush color (no alpha; opacity comes from the brush)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse a `#rrggbb` color string (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, PaintError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PaintError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PaintError::InvalidColor(hex.to_string()))
        };
        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    /// Channels as floats in 0..=255
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.0[0] as f32, self.0[1] as f32, self.0[2] as f32]
    }
}

/// A dab placement produced by the stroke sampler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dab {
    /// X position in surface coordinates
    pub x: f32,
    /// Y position in surface coordinates
    pub y: f32,
    /// Pressure 0.0-1.0
    pub pressure: f32,
}

impl Dab {
    pub fn new(x: f32, y: f32, pressure: f32) -> Self {
        Self { x, y, pressure }
    }
}

/// Axis-aligned pixel rectangle (x, y, width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a single pixel
    pub fn pixel(x: u32, y: u32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest region containing both
    pub fn union(&self, other: &Region) -> Region {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Region::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Merge an optional accumulated region with a new one
pub fn union_regions(acc: Option<Region>, next: Option<Region>) -> Option<Region> {
    match (acc, next) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("00FF00").unwrap(), Rgb::new(0, 255, 0));
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#ffé000").is_err());
    }

    #[test]
    fn test_rgb_hex_round_trip() {
        let color = Rgb::new(18, 52, 86);
        assert_eq!(color.to_hex(), "#123456");
        assert_eq!(Rgb::from_hex(&color.to_hex()).unwrap(), color);
    }

    #[test]
    fn test_region_union() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 20, 10, 5);
        let u = a.union(&b);
        assert_eq!(u, Region::new(0, 0, 15, 25));
        assert!(u.contains(14, 24));
        assert!(!u.contains(15, 24));
    }

    #[test]
    fn test_union_regions_options() {
        let a = Region::pixel(3, 3);
        assert_eq!(union_regions(None, None), None);
        assert_eq!(union_regions(Some(a), None), Some(a));
        assert_eq!(union_regions(None, Some(a)), Some(a));
    }
}
