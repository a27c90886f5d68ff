use super::protocol_constants::{
    ADC_BASE, GPIO_BASE, GPIO_BULK_INPUT, STATUS_BASE, STATUS_HW_ID, STATUS_SWRST,
};
use super::{AnalogChannel, Result, SampleReading, SeesawError};
use byteorder::{BigEndian, ByteOrder};

/// A single register-addressed request: the module base byte followed by the
/// function register (or channel offset) inside that module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterCommand {
    pub base: u8,
    pub function: u8,
}

impl RegisterCommand {
    #[must_use]
    pub const fn new(base: u8, function: u8) -> Self {
        Self { base, function }
    }

    /// Software reset of the expander firmware.
    #[must_use]
    pub const fn reset() -> Self {
        Self::new(STATUS_BASE, STATUS_SWRST)
    }

    #[must_use]
    pub const fn hardware_id() -> Self {
        Self::new(STATUS_BASE, STATUS_HW_ID)
    }

    #[must_use]
    pub const fn analog_read(channel: AnalogChannel) -> Self {
        Self::new(ADC_BASE, channel.register())
    }

    #[must_use]
    pub const fn gpio_bulk_read() -> Self {
        Self::new(GPIO_BASE, GPIO_BULK_INPUT)
    }

    /// The two bytes sent on the wire.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 2] {
        [self.base, self.function]
    }
}

/// Assembles an ADC response, most significant byte first.
/// # Errors
/// Returns [`SeesawError::ShortRead`] if fewer than two bytes are given.
pub fn decode_sample(bytes: &[u8]) -> Result<SampleReading> {
    if bytes.len() < 2 {
        return Err(SeesawError::ShortRead {
            expected: 2,
            actual: bytes.len(),
        });
    }
    Ok(BigEndian::read_u16(bytes))
}

/// Assembles a GPIO bulk response into a pin bitmask.
/// # Errors
/// Returns [`SeesawError::ShortRead`] if fewer than four bytes are given.
pub fn decode_gpio_bulk(bytes: &[u8]) -> Result<u32> {
    if bytes.len() < 4 {
        return Err(SeesawError::ShortRead {
            expected: 4,
            actual: bytes.len(),
        });
    }
    Ok(BigEndian::read_u32(bytes))
}
