//! 24-bit RGB colour values as used by the matrix.

use std::fmt;

/// A 24-bit `0xRRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(u32);

impl Rgb {
    pub const fn new(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let color = Rgb::new(0x33CC33);
        assert_eq!((color.r(), color.g(), color.b()), (0x33, 0xCC, 0x33));
        assert_eq!(color.to_string(), "#33CC33");
    }

    #[test]
    fn test_masks_to_24_bits() {
        assert_eq!(Rgb::new(0xFF12_3456).value(), 0x12_3456);
    }
}
