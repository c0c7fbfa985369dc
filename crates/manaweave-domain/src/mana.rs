//! Numeric breakdown of a mana cost

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Symbol counts of a parsed mana cost
///
/// `{2}{W}{W}` breaks down to `generic = 2`, `white = 2`,
/// `colored_symbols = 2`, `total_symbols = 4`. An absent cost is the
/// all-zero breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManaBreakdown {
    /// Sum of all numeric symbols
    pub generic: u32,
    /// {W} symbols
    pub white: u32,
    /// {U} symbols
    pub blue: u32,
    /// {B} symbols
    pub black: u32,
    /// {R} symbols
    pub red: u32,
    /// {G} symbols
    pub green: u32,
    /// {C} symbols
    pub colorless: u32,
    /// {S} symbols
    pub snow: u32,
    /// Hybrid symbols such as {W/U} or {2/G}
    pub hybrid: u32,
    /// Phyrexian symbols such as {R/P}
    pub phyrexian: u32,
    /// {X}, {Y} and {Z} symbols
    pub x_count: u32,
    /// Symbols that carry a color (plain, hybrid or phyrexian)
    pub colored_symbols: u32,
    /// Generic amount plus every other recognised symbol
    pub total_symbols: u32,
}

impl ManaBreakdown {
    /// Count of plain colored symbols of `color`
    pub fn count(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
        }
    }

    /// Increment the plain symbol count for `color`
    pub fn add_color(&mut self, color: Color) {
        let slot = match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
        };
        *slot += 1;
    }

    /// Mana value implied by the symbols; X counts as zero
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::ManaBreakdown;
    ///
    /// let cost = ManaBreakdown { generic: 2, white: 2, colored_symbols: 2, total_symbols: 4, ..Default::default() };
    /// assert_eq!(cost.mana_value(), 4);
    /// ```
    pub fn mana_value(&self) -> u32 {
        [
            self.generic,
            self.white,
            self.blue,
            self.black,
            self.red,
            self.green,
            self.colorless,
            self.snow,
            self.hybrid,
            self.phyrexian,
        ]
        .into_iter()
        .fold(0u32, u32::saturating_add)
    }

    /// Whether no symbol was recognised
    pub fn is_empty(&self) -> bool {
        self.total_symbols == 0
    }
}
