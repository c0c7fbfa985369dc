//! Mana cost parsing

use manaweave_domain::{Color, ManaBreakdown};
use tracing::debug;

/// Contents of every `{...}` group in `s`, in order
///
/// An unterminated group at the end is ignored.
pub(crate) fn symbols(s: &str) -> impl Iterator<Item = &str> {
    s.split('{')
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(inner, _)| inner.trim()))
}

/// Classification of one mana symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ManaSymbol {
    Generic(u32),
    Colored(Color),
    Colorless,
    Snow,
    Variable,
    Hybrid(Option<Color>),
    Phyrexian(Option<Color>),
}

impl ManaSymbol {
    /// Classify the inside of a `{...}` group, `None` if it is not a mana symbol
    pub(crate) fn classify(inner: &str) -> Option<Self> {
        let upper = inner.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }
        if upper.chars().all(|c| c.is_ascii_digit()) {
            let amount = upper.parse::<u64>().map_or(u32::MAX, |n| u32::try_from(n).unwrap_or(u32::MAX));
            return Some(ManaSymbol::Generic(amount));
        }
        match upper.as_str() {
            "C" => return Some(ManaSymbol::Colorless),
            "S" => return Some(ManaSymbol::Snow),
            "X" | "Y" | "Z" => return Some(ManaSymbol::Variable),
            _ => {}
        }
        if upper.contains('/') {
            let parts: Vec<&str> = upper.split('/').map(str::trim).collect();
            let valid = parts
                .iter()
                .all(|p| *p == "P" || *p == "C" || p.parse::<u32>().is_ok() || single_color(p).is_some());
            if !valid {
                return None;
            }
            let color = parts.iter().find_map(|p| single_color(p));
            return if parts.contains(&"P") {
                Some(ManaSymbol::Phyrexian(color))
            } else {
                Some(ManaSymbol::Hybrid(color))
            };
        }
        single_color(&upper).map(ManaSymbol::Colored)
    }

    /// Color carried by the symbol, if any
    pub(crate) fn color(&self) -> Option<Color> {
        match self {
            ManaSymbol::Colored(c) => Some(*c),
            ManaSymbol::Hybrid(c) | ManaSymbol::Phyrexian(c) => *c,
            _ => None,
        }
    }
}

fn single_color(s: &str) -> Option<Color> {
    if s.len() == 1 {
        Color::parse(s)
    } else {
        None
    }
}

/// Parse a mana cost such as `{2}{W}{W}` into symbol counts
///
/// Unknown symbols are skipped and logged at debug level; an empty cost
/// is the all-zero breakdown.
///
/// # Examples
///
/// ```
/// use manaweave_extractor::parse_mana_cost;
///
/// let cost = parse_mana_cost("{2}{W}{W}");
/// assert_eq!(cost.generic, 2);
/// assert_eq!(cost.white, 2);
/// assert_eq!(cost.colored_symbols, 2);
/// assert_eq!(cost.total_symbols, 4);
/// ```
pub fn parse_mana_cost(cost: &str) -> ManaBreakdown {
    let mut mana = ManaBreakdown::default();

    for inner in symbols(cost) {
        let Some(symbol) = ManaSymbol::classify(inner) else {
            debug!(symbol = inner, cost, "Skipping unrecognised mana symbol");
            continue;
        };

        match symbol {
            ManaSymbol::Generic(n) => {
                mana.generic = mana.generic.saturating_add(n);
                mana.total_symbols = mana.total_symbols.saturating_add(n);
                continue;
            }
            ManaSymbol::Colored(color) => mana.add_color(color),
            ManaSymbol::Colorless => mana.colorless += 1,
            ManaSymbol::Snow => mana.snow += 1,
            ManaSymbol::Variable => mana.x_count += 1,
            ManaSymbol::Hybrid(_) => mana.hybrid += 1,
            ManaSymbol::Phyrexian(_) => mana.phyrexian += 1,
        }

        if symbol.color().is_some() {
            mana.colored_symbols += 1;
        }
        mana.total_symbols = mana.total_symbols.saturating_add(1);
    }

    mana
}
