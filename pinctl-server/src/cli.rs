use std::path::PathBuf;

use clap::Parser;
use pinctl_server::config::Config;

use crate::util;

/// HTTP control plane for GPIO modes and analog samples
///
/// Serves two endpoints. `/data` returns comma-separated analog readings from a
/// pin (`GET /data?pin=5&len=10`). `/opts` reads or sets the mode of a pin
/// (`GET /opts?q=io&pin=4`, `POST /opts?q=io&pin=4&val=INPUT_PULLUP`).
///
/// Settings may come from a TOML file given with --config; flags on the
/// command line take precedence over the file.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,
    /// Address and port to listen on [default: 0.0.0.0:8080]
    #[arg(short, long)]
    pub(crate) bind: Option<String>,
    /// Pin driving the activity LED [default: 13]
    #[arg(long)]
    pub(crate) led_pin: Option<usize>,
    /// Largest `len` accepted by /data [default: 4096]
    #[arg(long)]
    pub(crate) max_samples: Option<usize>,
    /// Seed for simulated ADC readings, decimal or 0x-prefixed hexadecimal.
    #[arg(long, value_parser = util::u64_from_int)]
    pub(crate) seed: Option<u64>,
    /// Socket read timeout in milliseconds [default: 5000]
    #[arg(long)]
    pub(crate) read_timeout_ms: Option<u64>,
    /// Socket write timeout in milliseconds [default: 5000]
    #[arg(long)]
    pub(crate) write_timeout_ms: Option<u64>,
}

impl Cli {
    /// Override settings from the config file with those given as flags.
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(led_pin) = self.led_pin {
            config.led_pin = led_pin;
        }
        if let Some(max_samples) = self.max_samples {
            config.max_samples = max_samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(read_timeout_ms) = self.read_timeout_ms {
            config.read_timeout_ms = read_timeout_ms;
        }
        if let Some(write_timeout_ms) = self.write_timeout_ms {
            config.write_timeout_ms = write_timeout_ms;
        }
    }
}
