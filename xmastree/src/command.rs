use apa102::{ByteSink, LedString, RGB};

/// Things the tree can be asked to do from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    On,
    Off,
    Fill(RGB),
    /// Light one pixel, the others go off.
    Pixel(usize, RGB),
    /// All on, at this brightness.
    Brightness(f32),
}

impl Command {
    /// Apply the command to the string, ending with a single transmission.
    pub fn apply<S: ByteSink>(&self, string: &mut LedString<S>) -> apa102::Result<()> {
        match *self {
            Command::On => string.all_on(),
            Command::Off => string.all_off(),
            Command::Fill(color) => {
                string.set_all(color);
                string.show()
            }
            Command::Pixel(index, color) => {
                // Validate before touching the other pixels.
                string.pixel(index)?;
                string.set_all(RGB::BLACK);
                string.set_pixel(index, color)?;
                string.show()
            }
            Command::Brightness(value) => {
                string.set_brightness(value)?;
                string.all_on()
            }
        }
    }
}
