//! 6x8 Glyph Table
//!
//! The readout only ever shows digits, a minus sign, a degree mark and
//! "C", so the font carries exactly those. Each glyph is six column bytes
//! (bit 0 = top row): five visible columns and one blank separator.

/// Width of every glyph in display columns
pub const GLYPH_WIDTH: u8 = 6;

/// Glyph table, indexed by [`Glyph::index`]
const GLYPHS: [[u8; GLYPH_WIDTH as usize]; Glyph::COUNT] = [
    [0x3E, 0x51, 0x49, 0x45, 0x3E, 0x00], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46, 0x00], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31, 0x00], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10, 0x00], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39, 0x00], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30, 0x00], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03, 0x00], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36, 0x00], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E, 0x00], // 9
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x06, 0x09, 0x09, 0x06, 0x00], // degree
    [0x3E, 0x41, 0x41, 0x41, 0x22, 0x00], // C
    [0x08, 0x08, 0x08, 0x08, 0x08, 0x00], // minus
];

/// A symbol the display can render
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Glyph {
    /// Digit 0
    Zero = 0,
    /// Digit 1
    One = 1,
    /// Digit 2
    Two = 2,
    /// Digit 3
    Three = 3,
    /// Digit 4
    Four = 4,
    /// Digit 5
    Five = 5,
    /// Digit 6
    Six = 6,
    /// Digit 7
    Seven = 7,
    /// Digit 8
    Eight = 8,
    /// Digit 9
    Nine = 9,
    /// Blank cell
    Space = 10,
    /// Degree mark
    Degree = 11,
    /// Letter C
    Celsius = 12,
    /// Minus sign
    Minus = 13,
}

impl Glyph {
    /// Number of glyphs in the table
    pub const COUNT: usize = 14;

    const DIGITS: [Self; 10] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
    ];

    /// Glyph for a decimal digit, None above 9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d < 10 {
            Some(Self::DIGITS[d as usize])
        } else {
            None
        }
    }

    /// Glyph at a table index, None past the end of the table
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0..=9 => Self::digit(index),
            10 => Some(Self::Space),
            11 => Some(Self::Degree),
            12 => Some(Self::Celsius),
            13 => Some(Self::Minus),
            _ => None,
        }
    }

    /// Table index
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Column bitmap, left to right
    #[must_use]
    pub const fn columns(self) -> &'static [u8; GLYPH_WIDTH as usize] {
        &GLYPHS[self as usize]
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Glyph {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Space => defmt::write!(f, "' '"),
            Self::Degree => defmt::write!(f, "'°'"),
            Self::Celsius => defmt::write!(f, "'C'"),
            Self::Minus => defmt::write!(f, "'-'"),
            digit => defmt::write!(f, "'{}'", digit.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_round_trips() {
        for i in 0..Glyph::COUNT as u8 {
            assert_eq!(Glyph::from_index(i).map(Glyph::index), Some(i));
        }
        assert_eq!(Glyph::from_index(Glyph::COUNT as u8), None);
    }

    #[test]
    fn separator_column_is_blank() {
        for i in 0..Glyph::COUNT as u8 {
            let glyph = Glyph::from_index(i).unwrap();
            assert_eq!(glyph.columns()[5], 0x00, "{glyph:?}");
        }
    }

    #[test]
    fn only_eight_rows_used() {
        // bit 7 is the row below the glyph cell
        for i in 0..Glyph::COUNT as u8 {
            let glyph = Glyph::from_index(i).unwrap();
            assert!(glyph.columns().iter().all(|c| c & 0x80 == 0));
        }
    }
}
