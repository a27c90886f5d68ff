#![allow(dead_code)]
use neoslider::{AddressBind, BusHandle, Delay};
use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// Virtual time shared by a [`FakeDevice`] and its [`FakeDelay`].
#[derive(Debug, Clone, Default)]
pub struct Clock(Rc<Cell<Duration>>);

impl Clock {
    pub fn now(&self) -> Duration {
        self.0.get()
    }

    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

#[derive(Debug, Clone)]
pub struct FakeDelay {
    clock: Clock,
}

impl FakeDelay {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
        }
    }
}

impl Delay for FakeDelay {
    fn delay(&mut self, duration: Duration) {
        self.clock.advance(duration);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Bind(u16),
    Write(Vec<u8>),
    Read(usize),
}

/// A seesaw that answers register requests and timestamps every bus call.
#[derive(Debug)]
pub struct FakeDevice {
    clock: Clock,
    events: Vec<(Duration, BusEvent)>,
    last_command: Vec<u8>,
    /// ADC replies served in order; an empty queue answers `[0, 0]`.
    pub adc_replies: VecDeque<Vec<u8>>,
    pub hardware_id: u8,
    pub gpio: [u8; 4],
    /// Writes starting with this base byte only transfer one byte.
    pub truncate_base: Option<u8>,
    pub bind_error: bool,
}

impl FakeDevice {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            events: vec![],
            last_command: vec![],
            adc_replies: VecDeque::new(),
            hardware_id: 0x87,
            gpio: [0; 4],
            truncate_base: None,
            bind_error: false,
        }
    }

    pub fn with_adc(mut self, replies: &[&[u8]]) -> Self {
        self.adc_replies = replies.iter().map(|r| r.to_vec()).collect();
        self
    }

    pub fn events(&self) -> &[(Duration, BusEvent)] {
        &self.events
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|(_, e)| match e {
                BusEvent::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// Time of the first event matching `wanted`.
    pub fn time_of(&self, wanted: &BusEvent) -> Option<Duration> {
        self.events
            .iter()
            .find(|(_, e)| e == wanted)
            .map(|(t, _)| *t)
    }

    fn reply(&mut self) -> Vec<u8> {
        match self.last_command.as_slice() {
            [0x09, _] => self.adc_replies.pop_front().unwrap_or_else(|| vec![0, 0]),
            [0x00, 0x01] => vec![self.hardware_id],
            [0x01, 0x04] => self.gpio.to_vec(),
            _ => vec![],
        }
    }
}

impl io::Write for FakeDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = match (self.truncate_base, buf.first()) {
            (Some(base), Some(first)) if base == *first => 1,
            _ => buf.len(),
        };
        self.events
            .push((self.clock.now(), BusEvent::Write(buf[..n].to_vec())));
        self.last_command = buf[..n].to_vec();
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for FakeDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.events
            .push((self.clock.now(), BusEvent::Read(buf.len())));
        let reply = self.reply();
        let n = reply.len().min(buf.len());
        buf[..n].copy_from_slice(&reply[..n]);
        Ok(n)
    }
}

impl AddressBind for FakeDevice {
    fn set_target_address(&mut self, address: u16) -> io::Result<()> {
        self.events.push((self.clock.now(), BusEvent::Bind(address)));
        if self.bind_error {
            return Err(io::Error::from(io::ErrorKind::InvalidInput));
        }
        Ok(())
    }
}

pub fn bound(device: FakeDevice) -> BusHandle<FakeDevice> {
    let mut bus = BusHandle::new(device);
    bus.bind(0x30).expect("fake bind");
    bus
}
