use crate::display::{DisplayFrame, Terminal};
use crate::standard::bus::{AddressBind, BusHandle};
use crate::standard::delay::Delay;
use crate::standard::seesaw::Seesaw;
use crate::{Config, Result};
use log::{debug, info, warn};
use std::io;
use std::path::Path;

/// Samples the slider and repaints the terminal once per frame.
pub struct Slider<T: io::Read + io::Write, D: Delay + Clone, W: io::Write> {
    seesaw: Seesaw<T, D>,
    terminal: Terminal<W>,
    pace: D,
    config: Config,
    frames: u64,
}

impl<T, D, W> Slider<T, D, W>
where
    T: io::Read + io::Write + AddressBind,
    D: Delay + Clone,
    W: io::Write,
{
    /// Opens and addresses the bus, resets the expander and takes over the terminal.
    ///
    /// A failed reset is reported but does not stop startup.
    /// # Errors
    /// Returns [`crate::SeesawError::TransportUnavailable`] or
    /// [`crate::SeesawError::AddressBindFailed`] when the bus cannot be used,
    /// and an io error if the terminal cannot be cleared.
    pub fn start<O>(config: Config, open: O, delay: D, out: W) -> Result<Self>
    where
        O: FnOnce(&Path) -> Result<BusHandle<T>>,
    {
        let mut bus = open(&config.device_path)?;
        bus.bind(config.address)?;

        let mut seesaw = Seesaw::new(bus, delay.clone())
            .with_settle(config.reset_settle, config.conversion_settle);
        // Already logged by the driver.
        let _ = seesaw.reset();
        match seesaw.hardware_id() {
            Ok(id) => info!("seesaw hardware id {id:#04x}"),
            Err(e) => warn!("could not read seesaw hardware id: {e}"),
        }

        let terminal = Terminal::new(out)?;
        Ok(Self {
            seesaw,
            terminal,
            pace: delay,
            config,
            frames: 0,
        })
    }
}

impl<T, D, W> Slider<T, D, W>
where
    T: io::Read + io::Write,
    D: Delay + Clone,
    W: io::Write,
{
    /// Takes one sample and paints it. A failed read paints an empty bar.
    /// # Errors
    /// Returns an io error if the terminal cannot be written.
    pub fn step(&mut self) -> Result<DisplayFrame> {
        let sample = self.seesaw.analog_read(self.config.channel);
        let frame = DisplayFrame::new(
            sample,
            self.config.reference_max,
            self.config.bar_capacity,
        );
        self.terminal.paint(&frame)?;
        self.frames += 1;
        debug!("frame {} sample {sample} midpoint {}", self.frames, frame.midpoint);
        Ok(frame)
    }

    /// Runs `loop_times` frames, waiting one frame interval after each.
    pub fn poll(&mut self, loop_times: usize) -> Result<()> {
        for _ in 0..loop_times {
            self.step()?;
            self.pace.delay(self.config.frame_interval);
        }
        Ok(())
    }

    /// Runs until the terminal can no longer be written.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.step()?;
            self.pace.delay(self.config.frame_interval);
        }
    }

    pub fn seesaw(&self) -> &Seesaw<T, D> {
        &self.seesaw
    }

    pub fn terminal(&self) -> &Terminal<W> {
        &self.terminal
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
