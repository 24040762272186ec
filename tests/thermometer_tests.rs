//! Thermometer Tests
//!
//! End-to-end tests of the acquire-and-render cycle on host doubles.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test thermometer_tests

mod support;

use fixed::types::I16F16;
use support::{cursor_positions, drawn_glyphs, RecordingBus, ScriptedConverter};
use thermo_oled::drivers::display::{layout_integer, Display};
use thermo_oled::sensor::{
    Acquisition, BreakpointTable, ChannelSetup, LinearCalibration, SensorSettings, WaitMode,
};
use thermo_oled::thermometer::{Readings, Thermometer};
use thermo_oled::types::{Celsius, Column, OversampleCount, Page};

const TABLE: [i32; 3] = [0, 5_120, 10_240];

/// Both curves map an average to itself; two conversions per reading
fn settings() -> SensorSettings<'static> {
    SensorSettings {
        wait: WaitMode::Spin,
        oversample: OversampleCount::new(2).unwrap(),
        internal: LinearCalibration::new(I16F16::ONE, I16F16::from_num(20)).unwrap(),
        thermocouple: BreakpointTable::new(&TABLE).unwrap(),
    }
}

/// Script one cycle: discard, two samples for internal, then the same for the thermocouple
fn one_cycle(internal: u16, thermocouple: u16) -> [u16; 6] {
    [0, internal, internal, 0, thermocouple, thermocouple]
}

fn thermometer(
    script: impl IntoIterator<Item = u16>,
) -> Thermometer<'static, ScriptedConverter, RecordingBus> {
    let sensors = Acquisition::new(ScriptedConverter::new(script), settings());
    Thermometer::new(sensors, Display::new(RecordingBus::default()))
}

// =============================================================================
// Start-up Tests
// =============================================================================

#[test]
fn test_start_up_inits_then_clears() {
    let mut thermo = thermometer([]);
    thermo.start_up();

    let tx = thermo.display_mut().bus_mut().transactions();
    assert_eq!(tx.len(), 1 + 2 * 2048);
    assert_eq!(&tx[0][..3], &[0x78, 0x00, 0xAE]);
    assert!(tx[1..].iter().filter(|t| t[1] == 0x40).all(|t| t[2] == 0x00));
}

// =============================================================================
// Acquisition Tests
// =============================================================================

#[test]
fn test_acquire_reads_internal_first() {
    let mut thermo = thermometer(one_cycle(40, 300));
    let readings = thermo.acquire();

    assert_eq!(
        readings,
        Readings {
            internal: Celsius::new(20),
            thermocouple: Celsius::new(300),
        }
    );
    assert_eq!(
        thermo.sensors_mut().converter_mut().configured,
        vec![ChannelSetup::INTERNAL_SENSOR, ChannelSetup::THERMOCOUPLE]
    );
}

#[test]
fn test_acquire_draws_nothing() {
    let mut thermo = thermometer(one_cycle(40, 300));
    thermo.acquire();
    assert!(thermo.display_mut().bus_mut().ops.is_empty());
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_render_at_anchors() {
    let mut thermo = thermometer([]);
    thermo.render(Readings {
        internal: Celsius::new(23),
        thermocouple: Celsius::new(-8),
    });

    let tx = thermo.display_mut().bus_mut().transactions();
    let cursors = cursor_positions(&tx);
    assert_eq!(cursors[0], (0, 0));
    assert_eq!(cursors[6], (0, 8));

    let mut expected = layout_integer(23).to_vec();
    expected.extend(layout_integer(-8));
    assert_eq!(drawn_glyphs(&tx), expected);
}

#[test]
fn test_custom_anchors() {
    let mut thermo = thermometer([]).with_anchors(
        (Column::new(30).unwrap(), Page::new(2).unwrap()),
        (Column::new(60).unwrap(), Page::new(12).unwrap()),
    );
    thermo.render(Readings::default());

    let cursors = cursor_positions(&thermo.display_mut().bus_mut().transactions());
    assert_eq!(cursors[0], (30, 2));
    assert_eq!(cursors[6], (60, 12));
}

// =============================================================================
// Cycle Tests
// =============================================================================

#[test]
fn test_cycle_returns_what_it_drew() {
    let mut thermo = thermometer(one_cycle(1_000, 512));
    let readings = thermo.cycle();

    assert_eq!(readings.internal, Celsius::new(980));
    assert_eq!(readings.thermocouple, Celsius::new(512));

    let tx = thermo.display_mut().bus_mut().transactions();
    let mut expected = layout_integer(980).to_vec();
    expected.extend(layout_integer(512));
    assert_eq!(drawn_glyphs(&tx), expected);
}

#[test]
fn test_repeated_cycles_redraw_in_place() {
    let script = one_cycle(100, 100).into_iter().chain(one_cycle(200, 200));
    let mut thermo = thermometer(script);
    thermo.cycle();
    thermo.cycle();

    let cursors = cursor_positions(&thermo.display_mut().bus_mut().transactions());
    assert_eq!(cursors.len(), 24);
    assert_eq!(&cursors[..12], &cursors[12..]);
}
