//! Type line parsing

use crate::vocabulary::{
    self, ARTIFACT_SUBTYPES, CARD_TYPES, ENCHANTMENT_SUBTYPES, LAND_SUBTYPES, SUPERTYPES,
};
use std::collections::BTreeSet;

/// Types and subtypes read from a type line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeLine {
    /// Card types
    pub card_types: BTreeSet<String>,
    /// Supertypes
    pub supertypes: BTreeSet<String>,
    /// Creature types
    pub creature_types: BTreeSet<String>,
    /// Planeswalker types
    pub planeswalker_types: BTreeSet<String>,
    /// Artifact subtypes
    pub artifact_subtypes: BTreeSet<String>,
    /// Enchantment subtypes
    pub enchantment_subtypes: BTreeSet<String>,
    /// Land subtypes
    pub land_types: BTreeSet<String>,
}

impl TypeLine {
    /// Parse a full type line
    ///
    /// Faces of split and double-faced cards (separated by `//`) are
    /// parsed independently and merged. A subtype only lands in a
    /// subtype set when the face's main types say it can: "Elf" on an
    /// "Enchantment — Elf" face is not a creature type.
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_extractor::TypeLine;
    ///
    /// let parsed = TypeLine::parse("Legendary Creature — Elf Druid");
    /// assert!(parsed.card_types.contains("creature"));
    /// assert!(parsed.supertypes.contains("legendary"));
    /// assert!(parsed.creature_types.contains("elf"));
    /// ```
    pub fn parse(type_line: &str) -> Self {
        let mut parsed = TypeLine::default();
        for face in type_line.split("//") {
            parsed.parse_face(face);
        }
        parsed
    }

    fn parse_face(&mut self, face: &str) {
        let (main, subtypes) = split_face(face);
        let main: Vec<String> = main.split_whitespace().map(str::to_lowercase).collect();

        for word in &main {
            if vocabulary::contains(CARD_TYPES, word) {
                self.card_types.insert(word.clone());
            } else if vocabulary::contains(SUPERTYPES, word) {
                self.supertypes.insert(word.clone());
            }
        }

        let has = |t: &str| main.iter().any(|w| w == t);
        let creature = has("creature") || has("kindred") || has("tribal");
        let planeswalker = has("planeswalker");
        let artifact = has("artifact");
        let enchantment = has("enchantment");
        let land = has("land");

        for subtype in subtypes.split_whitespace().map(str::to_lowercase) {
            let is_artifact_subtype = vocabulary::contains(ARTIFACT_SUBTYPES, &subtype);
            let is_enchantment_subtype = vocabulary::contains(ENCHANTMENT_SUBTYPES, &subtype);
            let is_land_subtype = vocabulary::contains(LAND_SUBTYPES, &subtype);

            if artifact && is_artifact_subtype {
                self.artifact_subtypes.insert(subtype.clone());
            }
            if enchantment && is_enchantment_subtype {
                self.enchantment_subtypes.insert(subtype.clone());
            }
            if land && is_land_subtype {
                self.land_types.insert(subtype.clone());
            }

            let claimed = is_artifact_subtype || is_enchantment_subtype || is_land_subtype;
            if planeswalker && !claimed {
                self.planeswalker_types.insert(subtype.clone());
            } else if creature && !claimed {
                self.creature_types.insert(subtype);
            }
        }
    }
}

/// Split a face into main types and subtypes
fn split_face(face: &str) -> (&str, &str) {
    for separator in ['—', '–'] {
        if let Some((main, sub)) = face.split_once(separator) {
            return (main, sub);
        }
    }
    face.split_once(" - ").unwrap_or((face, ""))
}
