use std::io;

use log::debug;
use log::info;

use crate::relay_types::Channel;
use crate::relay_types::RelayError;
use crate::relay_types::RelayId;
use crate::relay_types::RelayState;

// The 16 values the relay register can hold, per the board's documentation.
// The four relays sit on the low nibble, one bit per channel, active low;
// the high nibble always reads back as set. Anything else means a corrupted
// read or the wrong device.
pub const REGISTER_VALUES: [u8; 16] = [
    0xff, 0xfe, 0xfd, 0xfb, 0xf7, 0xfc, 0xf9, 0xf3, 0xfa, 0xf5, 0xf6, 0xf8, 0xf1, 0xf2, 0xf4, 0xf0,
];

/// Byte-level access to the relay register, implemented by the local i2c
/// device node or by a test double. No retry policy; errors come back as-is.
pub trait RegisterTransport {
    fn read_byte(&mut self) -> io::Result<u8>;

    fn write_byte(&mut self, value: u8) -> io::Result<()>;
}

impl<T: RegisterTransport> RegisterTransport for &mut T {
    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, value: u8) -> io::Result<()> {
        (**self).write_byte(value)
    }
}

/// Stateless codec over the single hardware register. Every call re-reads
/// the device; a set is a read-modify-write and is not atomic with respect
/// to other processes touching the same register.
pub struct RelayControl<T: RegisterTransport> {
    transport: T,
}

impl<T: RegisterTransport> RelayControl<T> {
    pub fn new(transport: T) -> RelayControl<T> {
        RelayControl { transport }
    }

    pub fn get(&mut self, relay: RelayId) -> Result<RelayState, RelayError> {
        Ok(self.get_all()?[relay.index()])
    }

    pub fn get_all(&mut self) -> Result<[RelayState; 4], RelayError> {
        Ok(decode(self.read_register()?))
    }

    /// Switches one or all relays and returns the register value written.
    /// Bits of non-target channels are taken from the live register so they
    /// stay untouched.
    pub fn set(&mut self, channel: Channel, state: RelayState) -> Result<u8, RelayError> {
        let current = self.read_register()?;
        let new_value = compute_new_value(current, channel, state);
        self.transport.write_byte(new_value)?;
        info!("Set '{:?}' to '{:?}'", channel, state);
        Ok(new_value)
    }

    fn read_register(&mut self) -> Result<u8, RelayError> {
        let value = self.transport.read_byte()?;
        debug!("Read register value {:#04x}", value);
        validate_register_value(value)
    }
}

fn validate_register_value(value: u8) -> Result<u8, RelayError> {
    match REGISTER_VALUES.contains(&value) {
        true => Ok(value),
        false => Err(RelayError::InvalidRegisterByte(value)),
    }
}

// A set bit switches the relay off, a cleared bit switches it on.
fn decode(value: u8) -> [RelayState; 4] {
    let mut states = [RelayState::On; 4];
    for (i, state) in states.iter_mut().enumerate() {
        if value & (0x1 << i) != 0 {
            *state = RelayState::Off;
        }
    }
    states
}

fn compute_new_value(current: u8, channel: Channel, state: RelayState) -> u8 {
    match state {
        RelayState::On => current & !channel.mask(),
        RelayState::Off => current | channel.mask(),
    }
}
