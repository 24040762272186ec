//! Temperature Acquisition & Calibration
//!
//! Converter access, oversampling and the two calibration curves.

pub mod acquisition;
pub mod calibration;
pub mod converter;

pub use acquisition::{Acquisition, SensorSettings};
pub use calibration::{interpolate, BreakpointTable, CalibrationError, LinearCalibration};
pub use converter::{AnalogInput, ChannelSetup, Converter, Gain, WaitMode};
