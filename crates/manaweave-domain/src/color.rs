//! Colors and color sets

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five colors of mana
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// White ({W})
    White,
    /// Blue ({U})
    Blue,
    /// Black ({B})
    Black,
    /// Red ({R})
    Red,
    /// Green ({G})
    Green,
}

impl Color {
    /// All colors in WUBRG order
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Single-letter mana symbol for this color
    pub fn symbol(&self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Lower-case color name
    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
        }
    }

    /// Parse a color from a mana letter or a color name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::Color;
    ///
    /// assert_eq!(Color::parse("R"), Some(Color::Red));
    /// assert_eq!(Color::parse("blue"), Some(Color::Blue));
    /// assert_eq!(Color::parse("purple"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "w" | "white" => Some(Color::White),
            "u" | "blue" => Some(Color::Blue),
            "b" | "black" => Some(Color::Black),
            "r" | "red" => Some(Color::Red),
            "g" | "green" => Some(Color::Green),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Color::White => 1 << 0,
            Color::Blue => 1 << 1,
            Color::Black => 1 << 2,
            Color::Red => 1 << 3,
            Color::Green => 1 << 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A set of colors stored as bit flags
///
/// Serializes as a list of mana letters (`["R", "G"]`), the same shape
/// card data providers use for `colors` and `color_identity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct ColorSet(u8);

impl ColorSet {
    /// The empty (colorless) set
    pub const COLORLESS: Self = Self(0);

    /// Create an empty set
    pub const fn new() -> Self {
        Self(0)
    }

    /// Build a set from color letters or names, ignoring anything unrecognised
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::{Color, ColorSet};
    ///
    /// let set = ColorSet::from_symbols(["R", "g", "purple"]);
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(Color::Green));
    /// ```
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symbols
            .into_iter()
            .filter_map(|s| Color::parse(s.as_ref()))
            .fold(Self::new(), |set, color| set.with(color))
    }

    /// Return this set with `color` added
    pub const fn with(self, color: Color) -> Self {
        Self(self.0 | color.bit())
    }

    /// Add a color in place
    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    /// Whether the set contains `color`
    pub const fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    /// Whether every color of `other` is also in this set
    pub const fn is_superset(self, other: ColorSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether every color of this set is also in `other`
    pub const fn is_subset(self, other: ColorSet) -> bool {
        other.is_superset(self)
    }

    /// Colors present in both sets
    pub const fn intersection(self, other: ColorSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Colors present in either set
    pub const fn union(self, other: ColorSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of colors in the set (0-5)
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set holds two or more colors
    pub const fn is_multicolor(self) -> bool {
        self.len() >= 2
    }

    /// Iterate the colors in WUBRG order
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), |set, c| set.with(c))
    }
}

impl From<ColorSet> for Vec<String> {
    fn from(set: ColorSet) -> Self {
        set.iter().map(|c| c.symbol().to_string()).collect()
    }
}

impl From<Vec<String>> for ColorSet {
    fn from(symbols: Vec<String>) -> Self {
        ColorSet::from_symbols(symbols)
    }
}
