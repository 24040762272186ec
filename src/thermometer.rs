//! Thermometer
//!
//! Ties acquisition to the display: the fixed-period outer loop calls
//! [`Thermometer::acquire`] then [`Thermometer::render`], nothing else.

use crate::config::{INTERNAL_ANCHOR, THERMOCOUPLE_ANCHOR};
use crate::drivers::display::Display;
use crate::hal::i2c::TwoWire;
use crate::sensor::{Acquisition, Converter};
use crate::types::{Celsius, Column, Page};

/// One pair of temperatures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Readings {
    /// Die temperature
    pub internal: Celsius,
    /// Thermocouple temperature
    pub thermocouple: Celsius,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Readings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "internal={} tc={}", self.internal, self.thermocouple);
    }
}

/// Acquisition plus display
pub struct Thermometer<'t, C, B> {
    sensors: Acquisition<'t, C>,
    display: Display<B>,
    internal_anchor: (Column, Page),
    thermocouple_anchor: (Column, Page),
}

impl<'t, C: Converter, B: TwoWire> Thermometer<'t, C, B> {
    /// Combine the pipeline and the display with the configured anchors
    #[must_use]
    pub fn new(sensors: Acquisition<'t, C>, display: Display<B>) -> Self {
        Self {
            sensors,
            display,
            internal_anchor: INTERNAL_ANCHOR,
            thermocouple_anchor: THERMOCOUPLE_ANCHOR,
        }
    }

    /// Draw the readings somewhere else
    #[must_use]
    pub fn with_anchors(mut self, internal: (Column, Page), thermocouple: (Column, Page)) -> Self {
        self.internal_anchor = internal;
        self.thermocouple_anchor = thermocouple;
        self
    }

    /// Initialize and blank the display
    pub fn start_up(&mut self) {
        self.display.init();
        self.display.clear();
    }

    /// Read the internal sensor, then the thermocouple
    pub fn acquire(&mut self) -> Readings {
        let internal = self.sensors.read_internal();
        let thermocouple = self.sensors.read_thermocouple();
        Readings {
            internal,
            thermocouple,
        }
    }

    /// Draw both readings at their anchors
    pub fn render(&mut self, readings: Readings) {
        let (column, page) = self.internal_anchor;
        self.display
            .render_integer(i32::from(readings.internal.degrees()), column, page);

        let (column, page) = self.thermocouple_anchor;
        self.display
            .render_integer(i32::from(readings.thermocouple.degrees()), column, page);
    }

    /// One loop iteration: acquire, render, return what was shown
    pub fn cycle(&mut self) -> Readings {
        let readings = self.acquire();
        self.render(readings);
        readings
    }

    /// Borrow the display
    pub fn display_mut(&mut self) -> &mut Display<B> {
        &mut self.display
    }

    /// Borrow the acquisition pipeline
    pub fn sensors_mut(&mut self) -> &mut Acquisition<'t, C> {
        &mut self.sensors
    }
}
