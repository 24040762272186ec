//! Cycle-Counted Delay
//!
//! Bus bit timing is far below the embassy timer tick, so short waits
//! are counted in core clock cycles instead.

use embedded_hal::delay::DelayNs;

use crate::config::SYSTEM_CLOCK_HZ;

/// Busy-wait delay calibrated to the core clock
#[derive(Clone, Copy, Debug)]
pub struct CycleDelay {
    sysclk_hz: u32,
}

impl CycleDelay {
    /// Create a delay for a core running at `sysclk_hz`
    #[must_use]
    pub const fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }

    /// Core cycles covering at least `ns` nanoseconds
    #[must_use]
    pub const fn cycles_for(&self, ns: u32) -> u32 {
        let cycles = (ns as u64 * self.sysclk_hz as u64).div_ceil(1_000_000_000);
        if cycles > u32::MAX as u64 {
            u32::MAX
        } else {
            cycles as u32
        }
    }
}

impl Default for CycleDelay {
    fn default() -> Self {
        Self::new(SYSTEM_CLOCK_HZ)
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        cortex_m::asm::delay(self.cycles_for(ns));
    }
}
