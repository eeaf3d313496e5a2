pub mod config;
pub mod modules;
pub mod services;

use config::Config;
use services::client::CommandSender;
use services::device::{AppError, Device, ReviewPolicy};

/// Wires a fresh in-process device to a command sender.
pub fn create_signer(
    config: &Config,
    policy: Box<dyn ReviewPolicy>,
) -> Result<CommandSender<Device>, AppError> {
    let device = Device::new(config, policy)?;
    Ok(CommandSender::new(device))
}
