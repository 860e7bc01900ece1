use crate::error::{Error, Result};
use crate::frame::{self, Record};
use crate::pixel::{Pixel, RGB};
use crate::sink::ByteSink;

use log::{debug, trace, warn};

/// A string of APA102 leds behind a byte sink.
///
/// Mutating pixels only changes the state held here, `show()` is the only call that transmits,
/// so any number of changes go out as one consistent frame:
///
/// ```
/// use apa102::{sink::MemorySink, LedString, RGB};
/// let mut string = LedString::new(25, 0.5, MemorySink::new()).unwrap();
/// string.set_pixel(0, RGB::RED).unwrap();
/// string.set_pixel(1, RGB::GREEN).unwrap();
/// string.show().unwrap();
/// assert_eq!(string.sink().frames().len(), 2);
/// ```
pub struct LedString<S: ByteSink> {
    sink: S,
    pixels: Vec<Pixel>,

    /// Global brightness in [0.0, 1.0].
    brightness: f32,

    /// Frame buffer, reused between transmissions.
    buffer: Vec<u8>,

    closed: bool,
}

impl<S: ByteSink> LedString<S> {
    /// Create a string of `pixel_count` leds, all off, and send that state out.
    pub fn new(pixel_count: usize, brightness: f32, sink: S) -> Result<LedString<S>> {
        frame::quantize_brightness(brightness)?;
        let mut string = LedString {
            sink,
            pixels: (0..pixel_count).map(Pixel::new).collect(),
            brightness,
            buffer: vec![0; frame::frame_length(pixel_count)],
            closed: false,
        };
        debug!(
            "Created led string of {} pixels at brightness {}",
            pixel_count, brightness
        );
        string.show()?;
        Ok(string)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixel(&self, index: usize) -> Result<&Pixel> {
        let len = self.pixels.len();
        self.pixels
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Change the global brightness, used from the next `show()` on.
    pub fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        frame::quantize_brightness(brightness)?;
        self.brightness = brightness;
        Ok(())
    }

    /// Change the color of one pixel, does not transmit.
    pub fn set_pixel(&mut self, index: usize, color: RGB) -> Result<()> {
        let len = self.pixels.len();
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        pixel.set_color(color);
        Ok(())
    }

    /// Change the color of all pixels, does not transmit.
    pub fn set_all(&mut self, color: RGB) {
        for p in self.pixels.iter_mut() {
            p.set_color(color);
        }
    }

    pub fn all_on(&mut self) -> Result<()> {
        self.pixels.iter_mut().for_each(Pixel::on);
        self.show()
    }

    pub fn all_off(&mut self) -> Result<()> {
        self.pixels.iter_mut().for_each(Pixel::off);
        self.show()
    }

    /// Channel-wise mean color over the string.
    pub fn color(&self) -> RGB {
        if self.pixels.is_empty() {
            return RGB::BLACK;
        }
        let (r, g, b) = self.pixels.iter().fold((0usize, 0usize, 0usize), |acc, p| {
            let c = p.color();
            (acc.0 + c.r as usize, acc.1 + c.g as usize, acc.2 + c.b as usize)
        });
        let n = self.pixels.len();
        RGB::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }

    /// Transmit the current state at the global brightness.
    pub fn show(&mut self) -> Result<()> {
        self.transmit(self.brightness)
    }

    /// Transmit the current state at a one-off brightness, the global brightness is kept.
    pub fn show_with_brightness(&mut self, brightness: f32) -> Result<()> {
        self.transmit(brightness)
    }

    fn transmit(&mut self, brightness: f32) -> Result<()> {
        let level = frame::quantize_brightness(brightness)?;
        if self.closed {
            return Err(Error::Closed);
        }
        let records = self
            .pixels
            .iter()
            .map(|p| Record::from_pixel(p, level))
            .collect::<Result<Vec<Record>>>()?;
        frame::encode_frame_into(&records, &mut self.buffer);
        trace!("Writing frame of {} bytes", self.buffer.len());
        self.sink.write(&self.buffer).map_err(|e| {
            warn!("Frame transmission failed: {}", e);
            Error::Transmission(e)
        })
    }

    /// Bytes of the most recently encoded frame.
    pub fn last_frame(&self) -> &[u8] {
        &self.buffer
    }

    /// Release the sink, calling this more than once is fine. If the sink fails to close, the
    /// string stays open and the next call tries again.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        debug!("Closing led string");
        self.sink.close()?;
        self.closed = true;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
