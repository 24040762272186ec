//! Thermocouple OLED Readout Main Application
//!
//! Entry point for the STM32G474 readout firmware.
//! Brings up the bit-banged display bus and ADC1, then reads and
//! renders both temperatures once per period.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::gpio::{Level, OutputOpenDrain, Speed};
use embassy_stm32::opamp::{OpAmp, OpAmpGain, OpAmpSpeed};
use embassy_stm32::peripherals;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use thermo_oled::hal::adc::Stm32Converter;
use thermo_oled::hal::timer::CycleDelay;
use thermo_oled::prelude::*;

static OPAMP: StaticCell<OpAmp<'static, peripherals::OPAMP1>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Thermo OLED Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    // ADC end-of-conversion pends without an ISR and wakes `wfe`
    let mut core = cortex_m::Peripherals::take().unwrap();
    core.SCB.set_sevonpend();

    info!("Peripherals initialized");

    // Display bus: PB9 = SDA, PB8 = SCL, both open drain with external pull-ups
    let sda = OutputOpenDrain::new(p.PB9, Level::High, Speed::VeryHigh);
    let scl = OutputOpenDrain::new(p.PB8, Level::High, Speed::VeryHigh);
    let mut bus = SoftI2c::new(sda, scl, CycleDelay::default(), BusTiming::default());
    bus.init();

    info!("Software I2C on {}/{}", pins::BUS_SDA, pins::BUS_SCL);

    // Thermocouple through OPAMP1 as a PGA at its highest gain
    let opamp = OPAMP.init(OpAmp::new(p.OPAMP1, OpAmpSpeed::Normal));
    let mut thermocouple = opamp.buffer_int(p.PA1, OpAmpGain::Mul16);

    let adc = Adc::new(p.ADC1);
    let mut temperature = adc.enable_temperature();
    let converter = Stm32Converter::new(adc, &mut temperature, &mut thermocouple);

    info!(
        "ADC1 initialized, thermocouple on {}, oversampling {}",
        pins::THERMOCOUPLE_IN,
        OVERSAMPLE
    );

    let sensors = Acquisition::new(converter, SensorSettings::from_config());
    let mut thermometer = Thermometer::new(sensors, Display::new(bus));
    thermometer.start_up();

    info!("Display cleared, entering main loop");

    loop {
        let readings = thermometer.cycle();
        info!("{}", readings);
        Timer::after(Duration::from_millis(SAMPLE_PERIOD_MS)).await;
    }
}
