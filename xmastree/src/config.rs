//! Configuration of the tree, read from a yaml file.

use serde::Deserialize;
use std::path::Path;

use anyhow::{bail, Context};

/// How the frames get to the led string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Usb serial bridge that forwards the bytes onto the spi bus.
    Serial {
        port: String,
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
    },
    /// Linux spidev device, `/dev/spidev0.0` for example.
    Spidev { path: String },
}

fn default_baud_rate() -> u32 {
    1_000_000
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of leds in the string.
    pub pixels: usize,
    /// Global brightness, [0.0, 1.0].
    pub brightness: f32,
    /// None means the transport must be given on the command line.
    pub transport: Option<Transport>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pixels: 25,
            brightness: 0.5,
            transport: None,
        }
    }
}

impl Config {
    pub fn from_yaml(s: &str) -> anyhow::Result<Config> {
        let config: Config = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Config::from_yaml(&s).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.brightness) {
            bail!("brightness {} is outside of [0.0, 1.0]", self.brightness);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pixels, 25);
        assert_eq!(config.brightness, 0.5);
    }

    #[test]
    fn test_serial() {
        let config = Config::from_yaml(
            "
pixels: 10
brightness: 0.25
transport:
  serial:
    port: /dev/ttyACM0
",
        )
        .unwrap();
        assert_eq!(config.pixels, 10);
        assert_eq!(config.brightness, 0.25);
        assert_eq!(
            config.transport,
            Some(Transport::Serial {
                port: "/dev/ttyACM0".to_owned(),
                baud_rate: 1_000_000
            })
        );
    }

    #[test]
    fn test_spidev() {
        let config = Config::from_yaml("transport:\n  spidev:\n    path: /dev/spidev0.0\n").unwrap();
        assert_eq!(
            config.transport,
            Some(Transport::Spidev {
                path: "/dev/spidev0.0".to_owned()
            })
        );
    }

    #[test]
    fn test_invalid() {
        assert!(Config::from_yaml("brightness: 1.5").is_err());
        assert!(Config::from_yaml("transport:\n  carrier_pigeon: {}\n").is_err());
        assert!(Config::load(Path::new("/nonexistent/xmastree.yaml")).is_err());
    }
}
