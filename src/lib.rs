//#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This crate contains a client implementation of the Adafruit seesaw
//! register protocol as spoken by the NeoSlider board, and a small terminal
//! front end that paints the slider position as a horizontal bar.
pub mod app;
pub mod display;
pub mod message;
mod protocol_constants;
pub mod standard;
use protocol_constants::ADC_CHANNEL_OFFSET;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use app::Slider;
pub use display::{ColorBand, DisplayFrame, Terminal};
pub use message::RegisterCommand;
pub use standard::bus::{AddressBind, BusHandle};
pub use standard::delay::{Delay, StdDelay};
pub use standard::seesaw::{DriverState, Seesaw};

/// Raw 16 bit value returned by an analog channel read.
pub type SampleReading = u16;

/// Neoslider result type
pub type Result<T> = std::result::Result<T, SeesawError>;
/// Seesaw error that wraps all underlying errors for consistency
#[derive(Debug, thiserror::Error)]
pub enum SeesawError {
    #[error("failed to open I2C bus `{}`: {source}", .path.display())]
    TransportUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to set I2C slave address {address:#04x}: {source}")]
    AddressBindFailed {
        address: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("short write, sent {actual} of {expected} bytes")]
    ShortWrite { expected: usize, actual: usize },
    #[error("short read, received {actual} of {expected} bytes")]
    ShortRead { expected: usize, actual: usize },
    #[error("underlying io interrupt {0}")]
    IoError(#[from] std::io::Error),
    #[error("State error `{0}`")]
    StateError(&'static str),
    #[error("Out of range error `{0}`")]
    OutOfRange(&'static str),
}

impl SeesawError {
    /// Startup errors the process cannot continue past.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::TransportUnavailable { .. } | Self::AddressBindFailed { .. }
        )
    }
}

/// An analog pin index on the expander.
///
/// The index is handed to the device as `ADC_CHANNEL_OFFSET + index`; only
/// indices that would overflow that register byte are rejected here, the
/// rest are left for the device to interpret.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnalogChannel(u8);

impl AnalogChannel {
    /// # Errors
    /// Returns [`SeesawError::OutOfRange`] if the channel register would not fit in a byte.
    pub fn new(index: u8) -> Result<Self> {
        if ADC_CHANNEL_OFFSET.checked_add(index).is_none() {
            return Err(SeesawError::OutOfRange(
                "analog channel does not fit the ADC register byte",
            ));
        }
        Ok(Self(index))
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Function register selecting this channel inside the ADC module.
    #[must_use]
    pub const fn register(self) -> u8 {
        ADC_CHANNEL_OFFSET + self.0
    }
}

impl TryFrom<u8> for AnalogChannel {
    type Error = SeesawError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AnalogChannel> for u8 {
    fn from(channel: AnalogChannel) -> Self {
        channel.0
    }
}

/// The fixed wiring and timing of a NeoSlider attached to a Linux host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub device_path: PathBuf,
    pub address: u16,
    pub channel: AnalogChannel,
    /// Raw sample expected at full physical travel.
    pub reference_max: u16,
    /// Glyphs painted at full travel.
    pub bar_capacity: u16,
    /// Firmware reboot time after a software reset.
    pub reset_settle: Duration,
    /// Conversion time between an ADC request and its result.
    pub conversion_settle: Duration,
    pub frame_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from("/dev/i2c-5"),
            address: 0x30,
            channel: AnalogChannel(18),
            reference_max: 1023,
            bar_capacity: 161,
            reset_settle: Duration::from_millis(500),
            conversion_settle: Duration::from_millis(1),
            frame_interval: Duration::from_millis(50),
        }
    }
}
