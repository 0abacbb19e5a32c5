use anyhow::Result;
use clap::Parser;
use log::info;
use pinctl::gpio::SimulatedLed;
use pinctl::{Dispatcher, Mode, PinController, Platform, SimulatedBoard};
use pinctl_server::config::Config;
use pinctl_server::server::Server;

mod cli;
mod util;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let mut board = SimulatedBoard::new(config.seed);
    // The LED pin is driven directly and never shows up in the mode table.
    board.set_pin_mode(config.led_pin, Mode::Output);
    let led = SimulatedLed::new(config.led_pin);
    let mut dispatcher = Dispatcher::new(PinController::new(board), led, config.max_samples);

    let server = Server::bind(&config.bind, config.read_timeout(), config.write_timeout())?;
    info!(
        "HTTP server started on {} (activity LED on pin {}, up to {} samples per request)",
        server.local_addr()?,
        config.led_pin,
        config.max_samples
    );
    server.run(&mut dispatcher)
}
