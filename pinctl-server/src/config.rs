use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use pinctl::{DEFAULT_MAX_SAMPLES, MAX_PINS, XorShift};
use serde::Deserialize;

/// Server settings, read from an optional TOML file.
///
/// Missing keys take their defaults. Zero for `max_samples` or either timeout
/// also means "use the default".
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "Config::default_bind")]
    pub bind: String,
    #[serde(default = "Config::default_led_pin")]
    pub led_pin: usize,
    #[serde(default = "Config::default_max_samples")]
    pub max_samples: usize,
    #[serde(default = "Config::default_seed")]
    pub seed: u64,
    #[serde(default = "Config::default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "Config::default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

impl Config {
    fn default_bind() -> String {
        "0.0.0.0:8080".to_string()
    }
    fn default_led_pin() -> usize {
        13
    }
    fn default_max_samples() -> usize {
        DEFAULT_MAX_SAMPLES
    }
    fn default_seed() -> u64 {
        XorShift::DEFAULT_SEED
    }
    fn default_read_timeout_ms() -> u64 {
        5000
    }
    fn default_write_timeout_ms() -> u64 {
        5000
    }

    /// Load settings from `path`, or use the defaults when there is no file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&txt).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(txt: &str) -> Result<Self> {
        let mut cfg: Config = toml::from_str(txt)?;
        if cfg.max_samples == 0 {
            cfg.max_samples = Self::default_max_samples();
        }
        if cfg.read_timeout_ms == 0 {
            cfg.read_timeout_ms = Self::default_read_timeout_ms();
        }
        if cfg.write_timeout_ms == 0 {
            cfg.write_timeout_ms = Self::default_write_timeout_ms();
        }
        Ok(cfg)
    }

    /// Check settings that can't be expressed by the types alone.
    pub fn validate(&self) -> Result<()> {
        if self.led_pin >= MAX_PINS {
            bail!("led_pin {} is not below {MAX_PINS}", self.led_pin);
        }
        if self.max_samples == 0 {
            bail!("max_samples must be at least 1");
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: Self::default_bind(),
            led_pin: Self::default_led_pin(),
            max_samples: Self::default_max_samples(),
            seed: Self::default_seed(),
            read_timeout_ms: Self::default_read_timeout_ms(),
            write_timeout_ms: Self::default_write_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Config;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn keys_override_defaults() {
        let cfg = Config::parse("bind = \"127.0.0.1:80\"\nled_pin = 2\nmax_samples = 0\n").unwrap();
        assert_eq!(cfg.bind, "127.0.0.1:80");
        assert_eq!(cfg.led_pin, 2);
        assert_eq!(cfg.max_samples, Config::default().max_samples);
    }

    #[test]
    fn zero_timeouts_mean_default() {
        let cfg = Config::parse("read_timeout_ms = 0\nwrite_timeout_ms = 0\n").unwrap();
        assert_eq!(cfg.read_timeout().as_millis(), 5000);
        assert_eq!(cfg.write_timeout().as_millis(), 5000);

        let cfg = Config::parse("write_timeout_ms = 250\n").unwrap();
        assert_eq!(cfg.write_timeout().as_millis(), 250);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("port = 80\n").is_err());
    }

    #[test]
    fn led_pin_must_fit_the_table() {
        let cfg = Config {
            led_pin: 256,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
