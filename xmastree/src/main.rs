use anyhow::bail;
use apa102::sink::MemorySink;
use apa102::{ByteSink, LedString};
use xmastree::command::Command;
use xmastree::config::Config;

fn run<S: ByteSink>(config: &Config, sink: S, command: &Command) -> anyhow::Result<LedString<S>> {
    let mut string = LedString::new(config.pixels, config.brightness, sink)?;
    command.apply(&mut string)?;
    log::info!("Mean color is now {:?}", string.color());
    Ok(string)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = xmastree::app().get_matches();

    if matches.subcommand_name() == Some("ports") {
        println!("Ports: {:#?}", apa102::available_ports()?);
        return Ok(());
    }

    let (config, command) = xmastree::parse_args(&matches)?;

    if matches.is_present("dry-run") {
        let string = run(&config, MemorySink::new(), &command)?;
        for frame in string.sink().frames() {
            println!("{}", xmastree::format_frame(frame));
        }
        return Ok(());
    }

    let transport = match &config.transport {
        Some(transport) => transport,
        None => bail!("no transport configured, use --port, --spidev or a config file"),
    };
    let sink = xmastree::open_sink(transport)?;
    let mut string = run(&config, sink, &command)?;
    string.close()?;
    Ok(())
}
