//! Multi-dimensional synergy scores

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of scoring two feature sets
///
/// Every component is non-negative and `total` is a positive linear
/// combination of the components, so it is non-negative as well.
/// `matches` holds `category:detail` explanations in calculator order
/// (tribal, color, keyword, archetype, combo, type, mana curve, format).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynergyScore {
    /// Weighted total
    pub total: f64,
    /// Shared and supported creature types
    pub tribal: f64,
    /// Color and color identity overlap
    pub color: f64,
    /// Shared and complementary keywords
    pub keyword: f64,
    /// Shared archetype tags
    pub archetype: f64,
    /// Shared combo tags and combo patterns
    pub combo: f64,
    /// Shared card types and subtypes
    #[serde(rename = "type")]
    pub type_score: f64,
    /// Mana value proximity
    pub mana_curve: f64,
    /// Shared legal formats
    pub format: f64,
    /// Human-readable match explanations
    pub matches: Vec<String>,
}

impl SynergyScore {
    /// Value of one field
    pub fn get(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Total => self.total,
            ScoreField::Tribal => self.tribal,
            ScoreField::Color => self.color,
            ScoreField::Keyword => self.keyword,
            ScoreField::Archetype => self.archetype,
            ScoreField::Combo => self.combo,
            ScoreField::Type => self.type_score,
            ScoreField::ManaCurve => self.mana_curve,
            ScoreField::Format => self.format,
        }
    }

    /// Whether any explanation starts with `prefix`
    pub fn has_match(&self, prefix: &str) -> bool {
        self.matches.iter().any(|m| m.starts_with(prefix))
    }
}

/// A named score field: the total or one of the eight components
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    /// Weighted total
    Total,
    /// Tribal component
    Tribal,
    /// Color component
    Color,
    /// Keyword component
    Keyword,
    /// Archetype component
    Archetype,
    /// Combo component
    Combo,
    /// Type component
    Type,
    /// Mana curve component
    ManaCurve,
    /// Format component
    Format,
}

impl ScoreField {
    /// The eight components, in explanation order
    pub const COMPONENTS: [ScoreField; 8] = [
        ScoreField::Tribal,
        ScoreField::Color,
        ScoreField::Keyword,
        ScoreField::Archetype,
        ScoreField::Combo,
        ScoreField::Type,
        ScoreField::ManaCurve,
        ScoreField::Format,
    ];

    /// Get the field name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreField::Total => "total",
            ScoreField::Tribal => "tribal",
            ScoreField::Color => "color",
            ScoreField::Keyword => "keyword",
            ScoreField::Archetype => "archetype",
            ScoreField::Combo => "combo",
            ScoreField::Type => "type",
            ScoreField::ManaCurve => "mana_curve",
            ScoreField::Format => "format",
        }
    }

    /// Parse a field name; accepts `mana-curve` and a trailing `_score`
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::ScoreField;
    ///
    /// assert_eq!(ScoreField::parse("tribal_score"), Some(ScoreField::Tribal));
    /// assert_eq!(ScoreField::parse("Mana-Curve"), Some(ScoreField::ManaCurve));
    /// assert_eq!(ScoreField::parse("power"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase().replace('-', "_");
        let name = lowered.strip_suffix("_score").unwrap_or(&lowered);
        match name {
            "total" => Some(ScoreField::Total),
            "tribal" => Some(ScoreField::Tribal),
            "color" => Some(ScoreField::Color),
            "keyword" => Some(ScoreField::Keyword),
            "archetype" => Some(ScoreField::Archetype),
            "combo" => Some(ScoreField::Combo),
            "type" => Some(ScoreField::Type),
            "mana_curve" => Some(ScoreField::ManaCurve),
            "format" => Some(ScoreField::Format),
            _ => None,
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScoreField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid score field: {}", s))
    }
}
