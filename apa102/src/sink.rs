//! Transports that frames can be written to.

use serialport::SerialPort;
use std::io;
use std::io::Write;
use std::time::Duration;

/// Write-only transport for complete frames.
pub trait ByteSink {
    /// Write all bytes, blocking until the transfer is done.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Release the underlying resource, no-op for unmanaged sinks.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for Box<S> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "sink is closed")
}

/// A serial port, for a usb-to-spi bridge that passes the bytes on to the string.
pub struct SerialSink {
    port: Option<Box<dyn SerialPort>>,
}

impl SerialSink {
    pub fn open(port_name: &str, baud_rate: u32) -> io::Result<SerialSink> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(100))
            .open()
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Port '{}' not available: {}", port_name, e),
                )
            })?;
        Ok(SerialSink { port: Some(port) })
    }
}

impl ByteSink for SerialSink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let port = self.port.as_mut().ok_or_else(closed_error)?;
        port.write_all(bytes)?;
        port.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        // Dropping the port closes it.
        self.port.take();
        Ok(())
    }
}

pub fn available_ports() -> Result<Vec<serialport::SerialPortInfo>, serialport::Error> {
    serialport::available_ports()
}

/// Any writer, for example a `/dev/spidevB.C` device where every write is one transfer.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<std::fs::File> {
    pub fn open_device(path: &str) -> io::Result<Self> {
        let file = std::fs::OpenOptions::new().write(true).open(path)?;
        Ok(WriterSink::new(file))
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Adapter for a blocking embedded-hal spi bus.
pub struct SpiSink<SPI> {
    spi: SPI,
}

impl<SPI> SpiSink<SPI> {
    pub fn new(spi: SPI) -> Self {
        SpiSink { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> ByteSink for SpiSink<SPI>
where
    SPI: embedded_hal::blocking::spi::Write<u8, Error = E>,
    E: core::fmt::Debug,
{
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.spi
            .write(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("spi write failed: {:?}", e)))
    }
}

/// Keeps every frame in memory, for dry runs and tests.
#[derive(Default, Debug)]
pub struct MemorySink {
    frames: Vec<Vec<u8>>,
    fail_next: bool,
    closed: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn last(&self) -> Option<&[u8]> {
        self.frames.last().map(|f| &f[..])
    }

    pub fn take_frames(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.frames)
    }

    /// Make the next write or close report failure, without recording the frame or the close.
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    /// Number of times close succeeded.
    pub fn close_count(&self) -> usize {
        self.closed
    }
}

impl ByteSink for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected failure"));
        }
        self.frames.push(bytes.to_vec());
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if self.fail_next {
            self.fail_next = false;
            return Err(io::Error::new(io::ErrorKind::Other, "injected close failure"));
        }
        self.closed += 1;
        Ok(())
    }
}
