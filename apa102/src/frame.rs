//! Serialization of the led string into the APA102 wire format.
//!
//! A frame looks like:
//!
//! ```text
//! [0x00 x4] [ (0xE0 | level) blue green red ]*N [0x00 x5]
//! ```
//!
//! The leading zeros are 32 clocks with the data line low, every device needs those to recognise
//! the start of a frame. The trailing zeros are 40 clocks that push the last pixel's data through
//! the chain, each device delays the data by half a clock.

use crate::error::{Error, Result};
use crate::pixel::{Pixel, RGB};

/// A frame must start with 32 clocks with the data line low.
pub const START_OF_FRAME: [u8; 4] = [0; 4];

/// A frame must end with 40 clocks with the data line low.
pub const END_OF_FRAME: [u8; 5] = [0; 5];

/// Top three bits of the first byte of each pixel record.
pub const PIXEL_MARKER: u8 = 0b1110_0000;

/// Highest brightness level that fits in the five low bits.
pub const MAX_LEVEL: u8 = 0b0001_1111;

/// Marker + level, blue, green, red.
pub const BYTES_PER_PIXEL: usize = 4;

/// Convert a brightness in [0.0, 1.0] to a five bit level.
pub fn quantize_brightness(brightness: f32) -> Result<u8> {
    if !(0.0..=1.0).contains(&brightness) {
        return Err(Error::BrightnessOutOfRange(brightness));
    }
    Ok((brightness * MAX_LEVEL as f32).round() as u8)
}

/// Size of the frame for a number of pixels.
pub const fn frame_length(pixel_count: usize) -> usize {
    START_OF_FRAME.len() + pixel_count * BYTES_PER_PIXEL + END_OF_FRAME.len()
}

/// The brightness level and color for one pixel, as it goes onto the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Record {
    level: u8,
    color: RGB,
}

impl Record {
    pub fn new(level: u8, color: RGB) -> Result<Record> {
        if level > MAX_LEVEL {
            return Err(Error::LevelOutOfRange(level));
        }
        Ok(Record { level, color })
    }

    pub fn from_pixel(pixel: &Pixel, level: u8) -> Result<Record> {
        Record::new(level, pixel.color())
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn color(&self) -> RGB {
        self.color
    }

    /// Wire order is blue, green, red.
    pub fn to_bytes(&self) -> [u8; BYTES_PER_PIXEL] {
        [
            PIXEL_MARKER | self.level,
            self.color.b,
            self.color.g,
            self.color.r,
        ]
    }
}

/// Write a complete frame for the records into the buffer, which must be exactly
/// `frame_length(records.len())` long.
pub fn encode_frame_into(records: &[Record], buffer: &mut [u8]) {
    assert_eq!(frame_length(records.len()), buffer.len());
    let (start, rest) = buffer.split_at_mut(START_OF_FRAME.len());
    start.copy_from_slice(&START_OF_FRAME);
    let (body, end) = rest.split_at_mut(records.len() * BYTES_PER_PIXEL);
    for (chunk, record) in body.chunks_exact_mut(BYTES_PER_PIXEL).zip(records) {
        chunk.copy_from_slice(&record.to_bytes());
    }
    end.copy_from_slice(&END_OF_FRAME);
}

/// Encode the records into a freshly allocated frame.
pub fn encode_frame(records: &[Record]) -> Vec<u8> {
    let mut buffer = vec![0u8; frame_length(records.len())];
    encode_frame_into(records, &mut buffer);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: u8, color: RGB) -> Record {
        Record::new(level, color).unwrap()
    }

    #[test]
    fn test_byte_order() {
        let frame = encode_frame(&[record(MAX_LEVEL, RGB::new(0x11, 0x22, 0x33))]);
        assert_eq!(
            frame,
            [0, 0, 0, 0, 0xFF, 0x33, 0x22, 0x11, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_bring_up_record() {
        // Level 15 with blue and green at 4, red off.
        let r = record(0x0f, RGB::new(0, 0x04, 0x04));
        assert_eq!(r.to_bytes(), [0xEF, 0x04, 0x04, 0x00]);
    }

    #[test]
    fn test_markers_and_length() {
        for n in 0..30 {
            let records: Vec<Record> = (0..n)
                .map(|i| record((i % 32) as u8, RGB::new(i as u8, 0xAA, 0x55)))
                .collect();
            let frame = encode_frame(&records);
            assert_eq!(frame.len(), 4 + 4 * n + 5);
            assert_eq!(frame.len(), frame_length(n));
            assert_eq!(&frame[..4], &START_OF_FRAME);
            assert_eq!(&frame[frame.len() - 5..], &END_OF_FRAME);
            for (i, chunk) in frame[4..frame.len() - 5].chunks(4).enumerate() {
                assert_eq!(chunk[0] & PIXEL_MARKER, PIXEL_MARKER);
                assert_eq!(chunk[0] & MAX_LEVEL, (i % 32) as u8);
                assert_eq!(chunk[1..], [0x55, 0xAA, i as u8]);
            }
        }
    }

    #[test]
    fn test_empty_frame() {
        assert_eq!(encode_frame(&[]), [0u8; 9]);
    }

    #[test]
    fn test_deterministic() {
        let records = [
            record(3, RGB::RED),
            record(16, RGB::GREEN),
            record(31, RGB::BLUE),
        ];
        assert_eq!(encode_frame(&records), encode_frame(&records));

        // Encoding into a dirty buffer yields the same result.
        let mut buffer = vec![0xAAu8; frame_length(records.len())];
        encode_frame_into(&records, &mut buffer);
        assert_eq!(buffer, encode_frame(&records));
    }

    #[test]
    #[should_panic]
    fn test_buffer_size_mismatch() {
        let mut buffer = [0u8; 12];
        encode_frame_into(&[record(0, RGB::BLACK)], &mut buffer);
    }

    #[test]
    fn test_quantize_brightness() {
        assert_eq!(quantize_brightness(0.0).unwrap(), 0);
        assert_eq!(quantize_brightness(0.5).unwrap(), 16);
        assert_eq!(quantize_brightness(1.0).unwrap(), 31);
        for step in 0..=100 {
            let b = step as f32 / 100.0;
            let level = quantize_brightness(b).unwrap();
            assert_eq!(level, (b * 31.0).round() as u8);
            let first = record(level, RGB::WHITE).to_bytes()[0];
            assert_eq!(first, 0xE0 | level);
        }
        assert!(matches!(
            quantize_brightness(1.01),
            Err(Error::BrightnessOutOfRange(_))
        ));
        assert!(quantize_brightness(-0.01).is_err());
        assert!(quantize_brightness(f32::NAN).is_err());
    }

    #[test]
    fn test_level_range() {
        assert!(Record::new(31, RGB::WHITE).is_ok());
        assert!(matches!(
            Record::new(32, RGB::WHITE),
            Err(Error::LevelOutOfRange(32))
        ));
    }
}
