use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid channel '{0}'. Use 0, 1, 2, 3 or all")]
    InvalidChannel(String),

    #[error("Invalid state '{0}'. Use on or off")]
    InvalidState(String),

    #[error("Invalid register value '{0:#04x}'")]
    InvalidRegisterByte(u8),

    #[error(transparent)]
    Transport(#[from] io::Error),
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelayId {
    Relay1,
    Relay2,
    Relay3,
    Relay4,
}

impl RelayId {
    pub fn index(self) -> usize {
        match self {
            RelayId::Relay1 => 0,
            RelayId::Relay2 => 1,
            RelayId::Relay3 => 2,
            RelayId::Relay4 => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Channel {
    Relay(RelayId),
    All,
}

impl Channel {
    pub fn mask(self) -> u8 {
        match self {
            Channel::Relay(relay) => 0x1 << relay.index(),
            Channel::All => 0xf,
        }
    }
}

impl FromStr for Channel {
    type Err = RelayError;

    fn from_str(value: &str) -> Result<Channel, RelayError> {
        let channel = match value {
            "0" => Channel::Relay(RelayId::Relay1),
            "1" => Channel::Relay(RelayId::Relay2),
            "2" => Channel::Relay(RelayId::Relay3),
            "3" => Channel::Relay(RelayId::Relay4),
            "all" => Channel::All,
            unknown => return Err(RelayError::InvalidChannel(unknown.to_string())),
        };
        Ok(channel)
    }
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelayState {
    On,
    Off,
}

impl FromStr for RelayState {
    type Err = RelayError;

    fn from_str(value: &str) -> Result<RelayState, RelayError> {
        match value {
            "on" => Ok(RelayState::On),
            "off" => Ok(RelayState::Off),
            unknown => Err(RelayError::InvalidState(unknown.to_string())),
        }
    }
}

impl Display for RelayState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RelayState::On => write!(f, "on"),
            RelayState::Off => write!(f, "off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Channel;
    use super::RelayError;
    use super::RelayId::*;
    use super::RelayState;

    #[test]
    fn parse_channel() {
        assert_eq!("0".parse::<Channel>().unwrap(), Channel::Relay(Relay1));
        assert_eq!("1".parse::<Channel>().unwrap(), Channel::Relay(Relay2));
        assert_eq!("2".parse::<Channel>().unwrap(), Channel::Relay(Relay3));
        assert_eq!("3".parse::<Channel>().unwrap(), Channel::Relay(Relay4));
        assert_eq!("all".parse::<Channel>().unwrap(), Channel::All);
    }

    #[test]
    fn reject_invalid_channels() {
        for invalid in ["4", "-1", "ALL", "", "relay1", "01"] {
            let result = invalid.parse::<Channel>();
            assert!(matches!(result, Err(RelayError::InvalidChannel(_))));
        }
    }

    #[test]
    fn parse_state() {
        assert_eq!("on".parse::<RelayState>().unwrap(), RelayState::On);
        assert_eq!("off".parse::<RelayState>().unwrap(), RelayState::Off);
    }

    #[test]
    fn reject_invalid_states() {
        for invalid in ["ON", "Off", "1", "0", ""] {
            let result = invalid.parse::<RelayState>();
            assert!(matches!(result, Err(RelayError::InvalidState(_))));
        }
    }

    #[test]
    fn channel_masks() {
        assert_eq!(Channel::Relay(Relay1).mask(), 0x1);
        assert_eq!(Channel::Relay(Relay2).mask(), 0x2);
        assert_eq!(Channel::Relay(Relay3).mask(), 0x4);
        assert_eq!(Channel::Relay(Relay4).mask(), 0x8);
        assert_eq!(Channel::All.mask(), 0xf);
    }

    #[test]
    fn display_state() {
        assert_eq!(format!("{}", RelayState::On), "on");
        assert_eq!(format!("{}", RelayState::Off), "off");
    }
}
