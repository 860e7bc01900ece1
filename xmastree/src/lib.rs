pub mod command;
pub mod config;

use anyhow::{bail, Context};
use apa102::sink::{SerialSink, WriterSink};
use apa102::{ByteSink, RGB};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use command::Command;
use config::{Config, Transport};
use std::path::Path;

fn color_arg(name: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name).required(true)
}

/// The command line interface.
pub fn app() -> App<'static, 'static> {
    App::new("xmastree")
        .about("Controls an APA102 led string")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("Yaml configuration file"),
        )
        .arg(
            Arg::with_name("port")
                .long("port")
                .takes_value(true)
                .conflicts_with("spidev")
                .help("Serial port of the bridge"),
        )
        .arg(
            Arg::with_name("spidev")
                .long("spidev")
                .takes_value(true)
                .help("Spi device to write to"),
        )
        .arg(
            Arg::with_name("pixels")
                .long("pixels")
                .takes_value(true)
                .help("Number of leds in the string"),
        )
        .arg(
            Arg::with_name("brightness")
                .long("brightness")
                .takes_value(true)
                .help("Global brightness, 0.0 to 1.0"),
        )
        .arg(
            Arg::with_name("dry-run")
                .long("dry-run")
                .help("Print the frames instead of writing them"),
        )
        .subcommand(SubCommand::with_name("ports").about("List the serial ports"))
        .subcommand(SubCommand::with_name("on").about("All leds white"))
        .subcommand(SubCommand::with_name("off").about("All leds off"))
        .subcommand(
            SubCommand::with_name("fill")
                .about("All leds one color")
                .arg(color_arg("r"))
                .arg(color_arg("g"))
                .arg(color_arg("b")),
        )
        .subcommand(
            SubCommand::with_name("pixel")
                .about("Light a single led")
                .arg(Arg::with_name("index").required(true))
                .arg(color_arg("r"))
                .arg(color_arg("g"))
                .arg(color_arg("b")),
        )
        .subcommand(
            SubCommand::with_name("brightness")
                .about("All leds white at a brightness")
                .arg(Arg::with_name("value").required(true)),
        )
}

fn parse<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let v = matches
        .value_of(name)
        .with_context(|| format!("missing {}", name))?;
    parse_value(name, v)
}

fn parse_value<T: std::str::FromStr>(name: &str, v: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    v.parse::<T>()
        .with_context(|| format!("invalid {}: '{}'", name, v))
}

fn parse_color(matches: &ArgMatches) -> anyhow::Result<RGB> {
    Ok(RGB::new(
        parse(matches, "r")?,
        parse(matches, "g")?,
        parse(matches, "b")?,
    ))
}

fn parse_command(matches: &ArgMatches) -> anyhow::Result<Command> {
    Ok(match matches.subcommand() {
        ("on", _) => Command::On,
        ("off", _) => Command::Off,
        ("fill", Some(m)) => Command::Fill(parse_color(m)?),
        ("pixel", Some(m)) => Command::Pixel(parse(m, "index")?, parse_color(m)?),
        ("brightness", Some(m)) => Command::Brightness(parse(m, "value")?),
        (name, _) => bail!("no command given: '{}'", name),
    })
}

/// Build the configuration from the optional config file and the flags, plus the command to run.
pub fn parse_args(matches: &ArgMatches) -> anyhow::Result<(Config, Command)> {
    let mut config = match matches.value_of("config") {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };
    // `is_present` is also true for a subcommand of the same name, only look at flag values.
    if let Some(v) = matches.value_of("pixels") {
        config.pixels = parse_value("pixels", v)?;
    }
    if let Some(v) = matches.value_of("brightness") {
        config.brightness = parse_value("brightness", v)?;
    }
    if let Some(port) = matches.value_of("port") {
        config.transport = Some(Transport::Serial {
            port: port.to_owned(),
            baud_rate: match &config.transport {
                Some(Transport::Serial { baud_rate, .. }) => *baud_rate,
                _ => 1_000_000,
            },
        });
    }
    if let Some(path) = matches.value_of("spidev") {
        config.transport = Some(Transport::Spidev {
            path: path.to_owned(),
        });
    }
    config.validate()?;
    Ok((config, parse_command(matches)?))
}

/// Open the byte sink for the configured transport.
pub fn open_sink(transport: &Transport) -> std::io::Result<Box<dyn ByteSink>> {
    Ok(match transport {
        Transport::Serial { port, baud_rate } => {
            log::info!("Opening serial port {} at {} baud", port, baud_rate);
            Box::new(SerialSink::open(port, *baud_rate)?)
        }
        Transport::Spidev { path } => {
            log::info!("Opening spi device {}", path);
            Box::new(WriterSink::open_device(path)?)
        }
    })
}

/// Render a frame as hex, four bytes per group so pixel records line up.
pub fn format_frame(frame: &[u8]) -> String {
    frame
        .chunks(4)
        .map(|c| c.iter().map(|b| format!("{:02x}", b)).collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}
