//! Host-side doubles shared by the integration tests
//!
//! A pin recorder that logs every line change, a decoder that turns the
//! log back into bus events, a recording [`TwoWire`] bus and a scripted
//! converter.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use thermo_oled::drivers::font::Glyph;
use thermo_oled::hal::i2c::{BusTiming, SoftI2c, TwoWire};
use thermo_oled::sensor::{ChannelSetup, Converter};
use thermo_oled::types::RawSample;

// =============================================================================
// Pin recorder
// =============================================================================

/// Which bus line a recorded change belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Sda,
    Scl,
}

/// One recorded call on the bus hardware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusEvent {
    /// Pin write, `true` = released
    Pin(Line, bool),
    /// Delay in nanoseconds
    Wait(u32),
}

/// Shared log of pin and delay calls in call order
pub type PinLog = Rc<RefCell<Vec<BusEvent>>>;

/// Output pin that appends every call to a shared log
pub struct RecordingPin {
    line: Line,
    log: PinLog,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Pin(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(BusEvent::Pin(self.line, true));
        Ok(())
    }
}

/// Delay that logs the requested time instead of waiting
pub struct RecordingDelay {
    log: PinLog,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(BusEvent::Wait(ns));
    }
}

/// Soft bus on recording pins and delay
pub type RecordedBus = SoftI2c<RecordingPin, RecordingPin, RecordingDelay>;

/// Build a soft bus with default timing whose calls land in the returned log
pub fn recorded_bus() -> (RecordedBus, PinLog) {
    recorded_bus_with(BusTiming::default())
}

/// Build a soft bus with `timing` whose calls land in the returned log
pub fn recorded_bus_with(timing: BusTiming) -> (RecordedBus, PinLog) {
    let log: PinLog = Rc::new(RefCell::new(Vec::new()));
    let sda = RecordingPin {
        line: Line::Sda,
        log: Rc::clone(&log),
    };
    let scl = RecordingPin {
        line: Line::Scl,
        log: Rc::clone(&log),
    };
    let delay = RecordingDelay {
        log: Rc::clone(&log),
    };
    let bus = SoftI2c::new(sda, scl, delay, timing);
    (bus, log)
}

// =============================================================================
// Trace decoding
// =============================================================================

/// Line levels after a change, `true` = high
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Levels {
    pub sda: bool,
    pub scl: bool,
}

/// Replay a log from idle, keeping only pin calls that changed a level
pub fn levels(log: &[BusEvent]) -> Vec<Levels> {
    let mut now = Levels {
        sda: true,
        scl: true,
    };
    let mut out = vec![now];
    for &event in log {
        let BusEvent::Pin(line, high) = event else {
            continue;
        };
        let next = match line {
            Line::Sda => Levels { sda: high, ..now },
            Line::Scl => Levels { scl: high, ..now },
        };
        if next != now {
            out.push(next);
            now = next;
        }
    }
    out
}

/// What a bus analyzer would report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireEvent {
    Start,
    /// Data level at a rising clock edge
    Bit(bool),
    Stop,
}

/// Decode level changes into starts, stops and sampled bits
pub fn wire_events(levels: &[Levels]) -> Vec<WireEvent> {
    let mut events = Vec::new();
    for pair in levels.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        if before.scl && after.scl && before.sda != after.sda {
            events.push(if after.sda {
                WireEvent::Stop
            } else {
                WireEvent::Start
            });
        } else if !before.scl && after.scl {
            events.push(WireEvent::Bit(after.sda));
        }
    }
    events
}

/// Group bits between start and stop into 9-bit frames, dropping the ack bit
pub fn decode_frames(events: &[WireEvent]) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut bits: Vec<bool> = Vec::new();
    for event in events {
        match event {
            WireEvent::Start => {
                current = Some(Vec::new());
                bits.clear();
            }
            WireEvent::Bit(bit) => {
                bits.push(*bit);
                if bits.len() == 9 {
                    let byte = bits[..8]
                        .iter()
                        .fold(0u8, |acc, &b| (acc << 1) | u8::from(b));
                    if let Some(frame) = current.as_mut() {
                        frame.push(byte);
                    }
                    bits.clear();
                }
            }
            WireEvent::Stop => {
                if let Some(frame) = current.take() {
                    frames.push(frame);
                }
            }
        }
    }
    frames
}

// =============================================================================
// Recording bus
// =============================================================================

/// Calls made on a [`TwoWire`] bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusOp {
    Start(u8),
    Byte(u8),
    Stop,
}

/// Bus that records calls instead of toggling pins
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub ops: Vec<BusOp>,
}

impl TwoWire for RecordingBus {
    fn start(&mut self, address_byte: u8) {
        self.ops.push(BusOp::Start(address_byte));
    }

    fn write_byte(&mut self, value: u8) {
        self.ops.push(BusOp::Byte(value));
    }

    fn stop(&mut self) {
        self.ops.push(BusOp::Stop);
    }
}

impl RecordingBus {
    /// Each start..stop span as `[address, bytes...]`
    ///
    /// Panics if a start is not closed by a stop.
    pub fn transactions(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut open: Option<Vec<u8>> = None;
        for op in &self.ops {
            match *op {
                BusOp::Start(addr) => {
                    assert!(open.is_none(), "start inside a transaction");
                    open = Some(vec![addr]);
                }
                BusOp::Byte(b) => open
                    .as_mut()
                    .expect("byte outside a transaction")
                    .push(b),
                BusOp::Stop => out.push(open.take().expect("stop without start")),
            }
        }
        assert!(open.is_none(), "unterminated transaction");
        out
    }
}

/// Glyphs drawn by data transactions, matched back against the font
pub fn drawn_glyphs(transactions: &[Vec<u8>]) -> Vec<Glyph> {
    transactions
        .iter()
        .filter(|t| t.len() == 8 && t[1] == 0x40)
        .map(|t| {
            (0..Glyph::COUNT as u8)
                .filter_map(Glyph::from_index)
                .find(|g| g.columns()[..] == t[2..])
                .expect("data transaction is not a glyph")
        })
        .collect()
}

/// `(column, page)` of every cursor-set command transaction
pub fn cursor_positions(transactions: &[Vec<u8>]) -> Vec<(u8, u8)> {
    transactions
        .iter()
        .filter(|t| t.len() == 5 && t[1] == 0x00 && t[4] & 0xF0 == 0xB0)
        .map(|t| ((t[3] & 0x0F) << 4 | (t[2] & 0x0F), t[4] & 0x0F))
        .collect()
}

// =============================================================================
// Scripted converter
// =============================================================================

/// Converter that replays a list of samples
#[derive(Debug, Default)]
pub struct ScriptedConverter {
    samples: VecDeque<u16>,
    /// Polls reporting "busy" before each conversion completes
    pub busy_polls: usize,
    remaining_busy: usize,
    in_flight: bool,
    pub configured: Vec<ChannelSetup>,
    pub conversions: usize,
    pub halts: usize,
    /// Conversions done since the last configure
    pub since_configure: Vec<usize>,
}

impl ScriptedConverter {
    pub fn new(samples: impl IntoIterator<Item = u16>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_busy_polls(mut self, polls: usize) -> Self {
        self.busy_polls = polls;
        self
    }

    /// Converter returning `value` forever (well, for `n` conversions)
    pub fn constant(value: u16, n: usize) -> Self {
        Self::new(std::iter::repeat(value).take(n))
    }
}

impl Converter for ScriptedConverter {
    fn configure(&mut self, setup: ChannelSetup) {
        self.configured.push(setup);
        self.since_configure.push(0);
    }

    fn start(&mut self) {
        assert!(!self.in_flight, "conversion already in flight");
        assert!(!self.configured.is_empty(), "start before configure");
        self.in_flight = true;
        self.remaining_busy = self.busy_polls;
    }

    fn is_complete(&mut self) -> bool {
        if self.remaining_busy == 0 {
            true
        } else {
            self.remaining_busy -= 1;
            false
        }
    }

    fn take(&mut self) -> RawSample {
        assert!(self.in_flight, "take without start");
        self.in_flight = false;
        self.conversions += 1;
        if let Some(n) = self.since_configure.last_mut() {
            *n += 1;
        }
        let raw = self.samples.pop_front().expect("script exhausted");
        RawSample::new(raw).expect("scripted sample wider than 10 bits")
    }

    fn halt(&mut self) {
        self.halts += 1;
    }
}
