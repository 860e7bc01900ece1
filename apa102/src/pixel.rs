use crate::error::{Error, Result};

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Struct to represent the RGB state of a single led.
pub struct RGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGB {
    pub const RED: RGB = RGB { r: 255, g: 0, b: 0 };
    pub const GREEN: RGB = RGB { r: 0, g: 255, b: 0 };
    pub const BLUE: RGB = RGB { r: 0, g: 0, b: 255 };
    pub const WHITE: RGB = RGB {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: RGB = RGB { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> RGB {
        RGB { r, g, b }
    }

    /// Build a color from unit channels, each must be within [0.0, 1.0].
    pub fn from_unit(r: f32, g: f32, b: f32) -> Result<RGB> {
        Ok(RGB {
            r: unit_to_channel(r)?,
            g: unit_to_channel(g)?,
            b: unit_to_channel(b)?,
        })
    }
}

fn unit_to_channel(v: f32) -> Result<u8> {
    if !(0.0..=1.0).contains(&v) {
        return Err(Error::ChannelOutOfRange(v));
    }
    Ok((v * 255.0).round() as u8)
}

/// A single led in the string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixel {
    /// Position in the string, 0 is closest to the host.
    index: usize,
    value: RGB,
}

impl Pixel {
    pub fn new(index: usize) -> Self {
        Pixel {
            index,
            value: RGB::BLACK,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn color(&self) -> RGB {
        self.value
    }

    pub fn set_color(&mut self, color: RGB) {
        self.value = color;
    }

    /// Full scale white.
    pub fn on(&mut self) {
        self.value = RGB::WHITE;
    }

    pub fn off(&mut self) {
        self.value = RGB::BLACK;
    }

    pub fn is_on(&self) -> bool {
        self.value != RGB::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_off() {
        let mut p = Pixel::new(3);
        assert_eq!(p.index(), 3);
        assert_eq!(p.color(), RGB::BLACK);
        assert!(!p.is_on());

        p.on();
        assert_eq!(p.color(), RGB::new(0xFF, 0xFF, 0xFF));
        assert!(p.is_on());

        p.set_color(RGB::new(0x11, 0x22, 0x33));
        assert_eq!(p.color(), RGB::new(0x11, 0x22, 0x33));

        p.off();
        assert_eq!(p.color(), RGB::BLACK);
        assert_eq!(p.index(), 3);
    }

    #[test]
    fn test_from_unit() {
        assert_eq!(RGB::from_unit(1.0, 0.0, 0.5).unwrap(), RGB::new(255, 0, 128));
        assert!(matches!(
            RGB::from_unit(0.0, 1.2, 0.0),
            Err(Error::ChannelOutOfRange(v)) if v == 1.2
        ));
        assert!(RGB::from_unit(-0.1, 0.0, 0.0).is_err());
        assert!(RGB::from_unit(f32::NAN, 0.0, 0.0).is_err());
    }
}
