use anyhow::Context;
use apa102::frame::{self, Record};
use apa102::sink::SerialSink;
use apa102::{ByteSink, LedString, RGB};

const NUM_LEDS_IN_STRING: usize = 25;
const BAUD_RATE: u32 = 400_000;

fn main() -> anyhow::Result<()> {
    use std::{thread, time};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = std::env::args().nth(1);
    let port = match port {
        Some(port) => port,
        None => {
            println!("Ports: {:#?}", apa102::available_ports()?);
            return Ok(());
        }
    };

    let sink = SerialSink::open(&port, BAUD_RATE)?;
    let mut string = LedString::new(NUM_LEDS_IN_STRING, 1.0, sink)?;
    string.all_off()?;
    thread::sleep(time::Duration::from_secs(1));

    // Dim cyan, wire bytes [0xEF, 0x04, 0x04, 0x00], sent as a frame holding just the first led.
    let record = Record::new(0x0f, RGB::new(0, 0x04, 0x04))?;
    println!("Testing single LED ...");
    string
        .sink_mut()
        .write(&frame::encode_frame(&[record]))
        .context("single led frame")?;
    thread::sleep(time::Duration::from_secs(10));

    println!("Testing ALL {} of the LEDs in string ...", NUM_LEDS_IN_STRING);
    string
        .sink_mut()
        .write(&frame::encode_frame(&[record; NUM_LEDS_IN_STRING]))
        .context("full string frame")?;
    thread::sleep(time::Duration::from_secs(5));

    string.all_off()?;
    string.close()?;
    println!("Done ...");
    Ok(())
}
