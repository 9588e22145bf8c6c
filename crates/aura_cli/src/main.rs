mod app;
mod commands;
mod config;
mod render;

use anyhow::Result;
use aura_logging::aura_info;

use crate::config::Config;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    aura_logging::initialize(config.log_destination, config.log_level);
    aura_info!("Starting AURA v{}", env!("CARGO_PKG_VERSION"));

    app::run(config)
}
