use super::bus::BusHandle;
use super::delay::Delay;
use crate::message::{decode_gpio_bulk, decode_sample, RegisterCommand};
use crate::protocol_constants::{ADC_RESPONSE_LEN, GPIO_BULK_RESPONSE_LEN, HW_ID_RESPONSE_LEN};
use crate::{AnalogChannel, Result, SampleReading, SeesawError};
use log::{debug, error};
use std::io;
use std::time::Duration;

/// Minimum time the expander firmware needs to reboot after a software reset.
pub const RESET_SETTLE: Duration = Duration::from_millis(500);
/// Minimum time between a read request and the result being available.
pub const CONVERSION_SETTLE: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    /// Reset issued, firmware still rebooting.
    Reset,
    Ready,
}

/// A structure representing a seesaw expander reached through a [`BusHandle`].
#[derive(Debug)]
pub struct Seesaw<T: io::Read + io::Write, D: Delay> {
    bus: BusHandle<T>,
    delay: D,
    state: DriverState,
    reset_settle: Duration,
    conversion_settle: Duration,
    faults: u64,
}

impl<T: io::Read + io::Write, D: Delay> Seesaw<T, D> {
    /// Creates a new [`Seesaw`] using the minimum settle periods.
    pub fn new(bus: BusHandle<T>, delay: D) -> Self {
        Self {
            bus,
            delay,
            state: DriverState::Uninitialized,
            reset_settle: RESET_SETTLE,
            conversion_settle: CONVERSION_SETTLE,
            faults: 0,
        }
    }

    /// Overrides the settle periods. Values below the device minimums are raised to them.
    #[must_use]
    pub fn with_settle(mut self, reset_settle: Duration, conversion_settle: Duration) -> Self {
        self.reset_settle = reset_settle.max(RESET_SETTLE);
        self.conversion_settle = conversion_settle.max(CONVERSION_SETTLE);
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of reads that were degraded to a zero sample.
    pub fn fault_count(&self) -> u64 {
        self.faults
    }

    pub fn bus(&self) -> &BusHandle<T> {
        &self.bus
    }

    pub fn into_bus(self) -> BusHandle<T> {
        self.bus
    }

    /// Issues a software reset and waits out the firmware reboot.
    ///
    /// The settle period is honored even if the reset write fails, and the
    /// driver is `Ready` afterwards either way; the write error is handed
    /// back so the caller can decide whether it matters.
    /// # Errors
    /// Returns the transport error of the reset write.
    pub fn reset(&mut self) -> Result<()> {
        let outcome = self.bus.write(&RegisterCommand::reset().to_bytes());
        if let Err(e) = &outcome {
            error!("failed to send reset command: {e}");
        }
        self.state = DriverState::Reset;
        self.delay.delay(self.reset_settle);
        self.state = DriverState::Ready;
        debug!("expander reset complete");
        outcome
    }

    /// Write `command`, wait for the device to service it, then read `length` bytes.
    fn request(&mut self, command: RegisterCommand, length: usize) -> Result<Vec<u8>> {
        if self.state != DriverState::Ready {
            return Err(SeesawError::StateError(
                "expander must be reset before it is read",
            ));
        }
        self.bus.write(&command.to_bytes())?;
        self.delay.delay(self.conversion_settle);
        self.bus.read(length)
    }

    /// Samples one analog channel.
    /// # Errors
    /// Returns [`SeesawError::StateError`] before [`Seesaw::reset`], or the
    /// transport error of the request.
    pub fn try_analog_read(&mut self, channel: AnalogChannel) -> Result<SampleReading> {
        let bytes = self.request(RegisterCommand::analog_read(channel), ADC_RESPONSE_LEN)?;
        decode_sample(&bytes)
    }

    /// Samples one analog channel, substituting `0` for a failed read.
    ///
    /// The failure is logged and counted in [`Seesaw::fault_count`].
    pub fn analog_read(&mut self, channel: AnalogChannel) -> SampleReading {
        match self.try_analog_read(channel) {
            Ok(value) => value,
            Err(e) => {
                self.faults += 1;
                error!("failed to read ADC channel {}: {e}", channel.index());
                0
            }
        }
    }

    /// Reads the hardware id byte of the status module.
    pub fn hardware_id(&mut self) -> Result<u8> {
        let bytes = self.request(RegisterCommand::hardware_id(), HW_ID_RESPONSE_LEN)?;
        Ok(bytes[0])
    }

    /// Reads the level of every GPIO pin as a bitmask, pin `n` at bit `n`.
    pub fn digital_read_bulk(&mut self) -> Result<u32> {
        let bytes = self.request(RegisterCommand::gpio_bulk_read(), GPIO_BULK_RESPONSE_LEN)?;
        decode_gpio_bulk(&bytes)
    }
}
