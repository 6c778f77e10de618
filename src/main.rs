mod i2c;
mod relay_ctl;
mod relay_types;

use std::num::ParseIntError;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;

use crate::i2c::I2cDev;
use crate::relay_ctl::RelayControl;
use crate::relay_types::Channel;
use crate::relay_types::RelayState;

#[derive(Parser)]
#[command(version, about = "Controls seeedstudio's Raspberry Pi Relay Board v1.0 over i2c")]
struct Cli {
    /// I2c bus block, 0 = /dev/i2c-0, 1 = /dev/i2c-1
    #[arg(short, long, default_value_t = 1)]
    bus: u8,

    /// 7 bit device address on the bus, hex (0x20) or decimal
    #[arg(short, long, default_value = "0x20", value_parser = parse_address)]
    address: u16,

    /// Device register holding the relay bits, hex (0x06) or decimal
    #[arg(short, long, default_value = "0x06", value_parser = parse_register)]
    register: u8,

    /// Increases the log level, may be given multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppresses all log output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reads the state of one or all relays
    Get {
        /// 0, 1, 2, 3 or all (the default)
        channel: Option<Channel>,
    },
    /// Switches one or all relays on or off
    Set {
        /// 0, 1, 2, 3 or all
        channel: Channel,
        /// on or off
        state: RelayState,
    },
}

fn parse_address(value: &str) -> Result<u16, ParseIntError> {
    match value.strip_prefix("0x") {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

fn parse_register(value: &str) -> Result<u8, ParseIntError> {
    match value.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize)
        .init()?;

    let transport = I2cDev::open(cli.bus, cli.address, cli.register)
        .with_context(|| format!("Failed to open i2c bus {}", cli.bus))?;
    let mut relays = RelayControl::new(transport);

    match cli.command {
        Command::Get { channel } => match channel.unwrap_or(Channel::All) {
            Channel::Relay(relay) => println!("{}", relays.get(relay)?),
            Channel::All => {
                for (channel, state) in relays.get_all()?.iter().enumerate() {
                    println!("{}: {}", channel, state);
                }
            }
        },
        Command::Set { channel, state } => {
            relays.set(channel, state)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_address;
    use super::parse_register;

    #[test]
    fn parse_hex_and_decimal_numbers() {
        assert_eq!(parse_address("0x20").unwrap(), 0x20);
        assert_eq!(parse_address("32").unwrap(), 32);
        assert_eq!(parse_register("0x06").unwrap(), 0x06);
        assert_eq!(parse_register("6").unwrap(), 6);
        assert!(parse_address("relay").is_err());
        assert!(parse_register("0x100").is_err());
    }
}
