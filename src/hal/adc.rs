//! ADC Driver
//!
//! Single-conversion access to ADC1 for the two temperature sources.
//! Embassy sets the converter up (calibration, resolution, sample time);
//! conversions are then started and polled on the registers directly so
//! the core can sleep until end-of-conversion.
//!
//! The halting wait relies on `SEVONPEND`: the EOC interrupt is enabled
//! in the ADC but left masked in the NVIC, so it only pends and wakes
//! `wfe`. The caller must set `SCB.SEVONPEND` once at startup.

use cortex_m::peripheral::NVIC;
use embassy_stm32::adc::{Adc, AdcChannel, Resolution, SampleTime};
use embassy_stm32::interrupt::Interrupt;
use embassy_stm32::pac;
use embassy_stm32::peripherals::ADC1;

use crate::config::adc::{OPAMP1_CHANNEL, TEMPERATURE_CHANNEL};
use crate::sensor::{AnalogInput, ChannelSetup, Converter, Gain};
use crate::types::RawSample;

/// ADC1 with the die sensor and the OPAMP1 PGA output
pub struct Stm32Converter<'d> {
    _adc: Adc<'d, ADC1>,
}

impl<'d> Stm32Converter<'d> {
    /// Set up ADC1 for 10-bit single conversions
    ///
    /// `temperature` is the die sensor channel and `thermocouple` the PGA
    /// output, already running at its maximum gain. One blocking read on
    /// each programs its sample time.
    pub fn new(
        mut adc: Adc<'d, ADC1>,
        temperature: &mut impl AdcChannel<ADC1>,
        thermocouple: &mut impl AdcChannel<ADC1>,
    ) -> Self {
        adc.set_resolution(Resolution::BITS10);
        adc.set_sample_time(SampleTime::CYCLES640_5);
        let _ = adc.blocking_read(temperature);
        let _ = adc.blocking_read(thermocouple);

        pac::ADC1.ier().modify(|w| w.set_eocie(true));
        Self { _adc: adc }
    }
}

impl Converter for Stm32Converter<'_> {
    fn configure(&mut self, setup: ChannelSetup) {
        let channel = match (setup.input, setup.gain) {
            (AnalogInput::InternalTemperature, Gain::Unity) => TEMPERATURE_CHANNEL,
            (AnalogInput::Thermocouple, Gain::Max) => OPAMP1_CHANNEL,
            (AnalogInput::InternalTemperature, Gain::Max) => {
                defmt::warn!("die sensor has no gain stage, using unity");
                TEMPERATURE_CHANNEL
            }
            (AnalogInput::Thermocouple, Gain::Unity) => {
                defmt::warn!("PGA gain is fixed at maximum");
                OPAMP1_CHANNEL
            }
        };
        pac::ADC1.sqr1().modify(|w| {
            w.set_l(0);
            w.set_sq(0, channel);
        });
    }

    fn start(&mut self) {
        pac::ADC1.cr().modify(|w| w.set_adstart(true));
    }

    fn is_complete(&mut self) -> bool {
        pac::ADC1.isr().read().eoc()
    }

    fn take(&mut self) -> RawSample {
        let value = pac::ADC1.dr().read().rdata();
        pac::ADC1.isr().write(|w| w.set_eoc(true));
        NVIC::unpend(Interrupt::ADC1_2);
        RawSample::from_register(u32::from(value))
    }

    fn halt(&mut self) {
        cortex_m::asm::wfe();
    }
}
