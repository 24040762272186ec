//! OLED Display Driver
//!
//! Page-addressed monochrome OLED (SSD1306/SH1107 command family) driven
//! over the software bus. There is no frame buffer: every write goes
//! straight to the controller at the cursor set just before it, so the
//! controller's own column/page pointer is the only display state.

use heapless::Vec;

use crate::drivers::font::{Glyph, GLYPH_WIDTH};
use crate::hal::i2c::{I2cAddress, TwoWire};
use crate::types::{Column, Page};

/// Controller commands
mod cmd {
    pub const SET_LOWER_COLUMN: u8 = 0x00;
    pub const SET_HIGHER_COLUMN: u8 = 0x10;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const PAGE_ADDRESSING: u8 = 0x02;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_PAGE: u8 = 0xB0;
}

/// First byte of a transaction whose payload is commands
pub const CONTROL_COMMAND: u8 = 0x00;

/// First byte of a transaction whose payload is pixel data
pub const CONTROL_DATA: u8 = 0x40;

/// Commands sent by [`Display::init`], in order
pub const INIT_SEQUENCE: [u8; 7] = [
    cmd::DISPLAY_OFF,
    cmd::MEMORY_MODE,
    cmd::PAGE_ADDRESSING,
    cmd::SET_MULTIPLEX,
    Page::COUNT * 8 - 1, // 128 rows
    cmd::NORMAL_DISPLAY,
    cmd::DISPLAY_ON,
];

/// Decimal places rendered by [`Display::render_integer`], most significant first
const DIGIT_PLACES: [u32; 4] = [1000, 100, 10, 1];

/// Longest field: minus, four digits, degree, C
pub const MAX_FIELD_GLYPHS: usize = 7;

/// Digit of `value` at a decimal place (1, 10, 100, ...)
#[must_use]
pub const fn digit_at(value: u32, place: u32) -> u8 {
    ((value / place) % 10) as u8
}

/// Glyph sequence for a temperature field
///
/// An optional minus, then always four digit cells with leading zeros
/// blanked (the units digit is always shown), then "°C". Magnitudes above
/// 9999 lose their leading digits.
#[must_use]
pub fn layout_integer(value: i32) -> Vec<Glyph, MAX_FIELD_GLYPHS> {
    let mut glyphs = Vec::new();
    let magnitude = value.unsigned_abs();

    if value < 0 {
        let _ = glyphs.push(Glyph::Minus);
    }

    for place in DIGIT_PLACES {
        let glyph = if place > 1 && magnitude < place {
            Glyph::Space
        } else {
            Glyph::digit(digit_at(magnitude, place)).unwrap_or(Glyph::Space)
        };
        let _ = glyphs.push(glyph);
    }

    let _ = glyphs.push(Glyph::Degree);
    let _ = glyphs.push(Glyph::Celsius);
    glyphs
}

/// OLED display driver
pub struct Display<B> {
    bus: B,
    address: I2cAddress,
}

impl<B: TwoWire> Display<B> {
    /// Create a display driver at the default address
    #[must_use]
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, I2cAddress::DISPLAY)
    }

    /// Create a display driver at a specific address
    #[must_use]
    pub fn with_address(bus: B, address: I2cAddress) -> Self {
        Self { bus, address }
    }

    /// Controller address
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.address
    }

    /// Borrow the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give the bus back
    pub fn free(self) -> B {
        self.bus
    }

    /// Initialize the display
    ///
    /// Page addressing mode, 128-row multiplex, normal (non-inverted)
    /// output, panel on. Contents are whatever the controller held.
    pub fn init(&mut self) {
        #[cfg(feature = "embedded")]
        defmt::debug!("display init at {}", self.address);

        self.bus
            .begin(self.address)
            .write(CONTROL_COMMAND)
            .write_all(&INIT_SEQUENCE);
    }

    /// Point the controller's write cursor at `column` on `page`
    pub fn set_cursor(&mut self, column: Column, page: Page) {
        self.bus.begin(self.address).write_all(&[
            CONTROL_COMMAND,
            cmd::SET_LOWER_COLUMN | column.low_nibble(),
            cmd::SET_HIGHER_COLUMN | column.high_nibble(),
            cmd::SET_PAGE | page.get(),
        ]);
    }

    /// Write pixel data at the cursor
    fn write_data(&mut self, data: &[u8]) {
        self.bus
            .begin(self.address)
            .write(CONTROL_DATA)
            .write_all(data);
    }

    /// Blank the whole panel
    ///
    /// One cursor set and one single-byte data write per column of every
    /// page: 2048 of each. Slow; meant for startup only.
    pub fn clear(&mut self) {
        self.fill_with(0x00);
    }

    /// Light the whole panel
    pub fn fill(&mut self) {
        self.fill_with(0xFF);
    }

    fn fill_with(&mut self, pattern: u8) {
        for column in Column::all() {
            for page in Page::all() {
                self.set_cursor(column, page);
                self.write_data(&[pattern]);
            }
        }
    }

    /// Light the eight pixels of the column at the cursor
    pub fn pixel_column_on(&mut self) {
        self.write_data(&[0xFF]);
    }

    /// Blank the eight pixels of the column at the cursor
    pub fn pixel_column_off(&mut self) {
        self.write_data(&[0x00]);
    }

    /// Draw `glyph` at the cursor
    ///
    /// The cursor must have been set immediately before; the controller
    /// advances it by one column per byte.
    pub fn render_glyph(&mut self, glyph: Glyph) {
        self.write_data(glyph.columns());
    }

    /// Draw `value` followed by "°C", left-anchored at `column` on `page`
    ///
    /// See [`layout_integer`] for the field format. Glyphs that would start
    /// past the right edge are not drawn.
    pub fn render_integer(&mut self, value: i32, column: Column, page: Page) {
        let mut cursor = Some(column);
        for glyph in layout_integer(value) {
            let Some(at) = cursor else { break };
            self.set_cursor(at, page);
            self.render_glyph(glyph);
            cursor = at.checked_add(GLYPH_WIDTH);
        }
    }
}
