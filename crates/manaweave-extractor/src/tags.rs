//! Archetype and combo tag rules
//!
//! Each rule looks at the features already extracted (keywords, actions,
//! zones, types) plus the tokenized text and decides on its own whether
//! its tag applies. A card can carry any number of tags.
//!
//! Combo rules:
//!
//! | Tag | Fires when |
//! |---|---|
//! | mana_generation | text adds mana (`add {G}`, `add one mana`, ...) |
//! | untap_effects | text untaps something (`untap target`, `untap all`, ...) |
//! | infinite_mana | mana generation and an untap effect on the same card |
//! | tutoring | `search your library`, or a search action plus the library zone |
//! | recursion | graveyard zone plus a return/put-onto effect, or a recursion keyword |
//! | mill | mill action, or library cards put into a graveyard |
//! | sacrifice_outlet | `sacrifice a/an/another ...` |
//! | copy_effects | `copy` in any form |
//! | infinite_tokens | creates tokens and copies or creates on a trigger |
//! | extra_turns | `extra turn` |
//!
//! Archetype rules:
//!
//! | Tag | Fires when |
//! |---|---|
//! | aggro | haste/menace/prowess/riot/double strike, a cheap creature with power ≥ 2, or burn to a player |
//! | control | counterspells, targeted or mass removal, bounce |
//! | combo | an infinite, untap, copy, extra-turn or tutor combo tag |
//! | graveyard | graveyard zone, mill, or a graveyard keyword |
//! | tribal | tribal/kindred type, "other X creatures", "creature type", or counts of its own type |
//! | tokens | mentions tokens |
//! | counters | counters named, or a counter keyword |
//! | artifacts | mentions artifacts, an artifact keyword, or has an artifact subtype |
//! | enchantments | mentions enchantments or auras, or has an enchantment subtype |
//! | spellslinger | prowess-style keywords, or cares about instants and sorceries |
//! | lifegain | lifelink, extort, or gaining life |
//! | ramp | mana generation, or fetching or playing extra lands |
//! | sacrifice | sacrifice action |

use crate::tokenizer::Tokens;
use manaweave_domain::{ArchetypeTag, ComboTag, FeatureSet, StatValue};
use std::collections::BTreeSet;

const AGGRO_KEYWORDS: &[&str] = &["haste", "menace", "prowess", "riot", "double strike"];
const GRAVEYARD_KEYWORDS: &[&str] = &[
    "delve", "unearth", "scavenge", "flashback", "dredge", "retrace", "recover",
];
const RECURSION_KEYWORDS: &[&str] = &[
    "unearth", "retrace", "recover", "persist", "undying", "flashback",
];
const COUNTER_KEYWORDS: &[&str] = &[
    "proliferate", "adapt", "outlast", "modular", "graft", "mentor", "undying", "persist",
];
const ARTIFACT_KEYWORDS: &[&str] = &["improvise", "modular", "crew"];
const SPELL_KEYWORDS: &[&str] = &["prowess", "replicate", "overload", "surge", "cipher"];
const UNTAP_OBJECTS: &[&str] = &[
    "target", "all", "each", "another", "up", "it", "that", "those", "two", "three", "x",
    "enchanted", "equipped",
];
const TRIBAL_FILLER: &[&str] = &[
    "target", "attacking", "blocking", "nontoken", "tapped", "untapped", "legendary",
    "artifact", "enchantment", "white", "blue", "black", "red", "green", "colorless",
];

/// Text-level view shared by the rules
struct Facts<'a> {
    features: &'a FeatureSet,
    tokens: &'a Tokens,
    text: &'a str,
}

impl Facts<'_> {
    fn keyword(&self, list: &[&str]) -> bool {
        list.iter().any(|k| self.features.keywords.contains(*k))
    }

    fn action(&self, action: &str) -> bool {
        self.features.actions.contains(action)
    }

    fn zone(&self, zone: &str) -> bool {
        self.features.zones.contains(zone)
    }

    fn phrase(&self, phrase: &str) -> bool {
        self.tokens.has_phrase(phrase)
    }

    fn any_phrase(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.phrase(p))
    }
}

/// Derive combo tags
pub(crate) fn combo_tags(features: &FeatureSet, tokens: &Tokens) -> BTreeSet<ComboTag> {
    let facts = Facts { features, tokens, text: &features.text };
    let mut tags = BTreeSet::new();

    let mana_generation = generates_mana(&facts);
    let untap = untaps(&facts);
    let copy = facts.tokens.has_word("copy");
    let makes_tokens = facts.tokens.has_word("token") && facts.tokens.has_word("create");

    if mana_generation {
        tags.insert(ComboTag::ManaGeneration);
    }
    if untap {
        tags.insert(ComboTag::UntapEffects);
    }
    if mana_generation && untap {
        tags.insert(ComboTag::InfiniteMana);
    }
    if facts.phrase("search your library") || (facts.action("search") && facts.zone("library")) {
        tags.insert(ComboTag::Tutoring);
    }
    if (facts.zone("graveyard")
        && (facts.action("return")
            || facts.phrase("onto the battlefield")
            || facts.phrase("into your hand")))
        || facts.keyword(RECURSION_KEYWORDS)
    {
        tags.insert(ComboTag::Recursion);
    }
    if facts.action("mill")
        || (facts.phrase("of your library") && facts.phrase("into your graveyard"))
    {
        tags.insert(ComboTag::Mill);
    }
    if facts.any_phrase(&["sacrifice a", "sacrifice an", "sacrifice another"]) {
        tags.insert(ComboTag::SacrificeOutlet);
    }
    if copy {
        tags.insert(ComboTag::CopyEffects);
    }
    if makes_tokens && (copy || facts.tokens.has_word("whenever")) {
        tags.insert(ComboTag::InfiniteTokens);
    }
    if facts.phrase("extra turn") {
        tags.insert(ComboTag::ExtraTurns);
    }

    tags
}

/// Derive archetype tags; `combos` are the card's combo tags
pub(crate) fn archetype_tags(
    features: &FeatureSet,
    tokens: &Tokens,
    combos: &BTreeSet<ComboTag>,
) -> BTreeSet<ArchetypeTag> {
    let facts = Facts { features, tokens, text: &features.text };
    let mut tags = BTreeSet::new();

    let cheap_beater = features.is_creature()
        && features.mana_value <= 2.0
        && matches!(features.power, Some(StatValue::Fixed(p)) if p >= 2);
    if facts.keyword(AGGRO_KEYWORDS)
        || cheap_beater
        || facts.any_phrase(&[
            "damage to any target",
            "damage to each opponent",
            "damage to target player",
            "damage to target opponent",
        ])
    {
        tags.insert(ArchetypeTag::Aggro);
    }

    if facts.any_phrase(&[
        "counter target",
        "destroy target",
        "destroy all",
        "exile target",
        "exile all",
        "owner's hand",
    ]) {
        tags.insert(ArchetypeTag::Control);
    }

    if combos.iter().any(|c| {
        matches!(
            c,
            ComboTag::InfiniteMana
                | ComboTag::InfiniteTokens
                | ComboTag::UntapEffects
                | ComboTag::CopyEffects
                | ComboTag::ExtraTurns
                | ComboTag::Tutoring
        )
    }) {
        tags.insert(ArchetypeTag::Combo);
    }

    if facts.zone("graveyard")
        || facts.action("mill")
        || facts.action("reanimate")
        || facts.keyword(GRAVEYARD_KEYWORDS)
    {
        tags.insert(ArchetypeTag::Graveyard);
    }

    if is_tribal(&facts) {
        tags.insert(ArchetypeTag::Tribal);
    }

    if facts.tokens.has_word("token") {
        tags.insert(ArchetypeTag::Tokens);
    }

    if !features.counters.is_empty() || facts.keyword(COUNTER_KEYWORDS) {
        tags.insert(ArchetypeTag::Counters);
    }

    if facts.tokens.has_word("artifact")
        || facts.keyword(ARTIFACT_KEYWORDS)
        || !features.artifact_subtypes.is_empty()
    {
        tags.insert(ArchetypeTag::Artifacts);
    }

    if facts.tokens.has_word("enchantment")
        || facts.tokens.has_word("aura")
        || !features.enchantment_subtypes.is_empty()
    {
        tags.insert(ArchetypeTag::Enchantments);
    }

    if facts.keyword(SPELL_KEYWORDS)
        || facts.any_phrase(&["instant or sorcery", "noncreature spell"])
    {
        tags.insert(ArchetypeTag::Spellslinger);
    }

    if facts.keyword(&["lifelink", "extort"]) || facts.tokens.has_near("gain", "life", 2) {
        tags.insert(ArchetypeTag::Lifegain);
    }

    if combos.contains(&ComboTag::ManaGeneration)
        || (facts.action("search") && facts.tokens.has_word("land"))
        || facts.phrase("additional land")
    {
        tags.insert(ArchetypeTag::Ramp);
    }

    if facts.action("sacrifice") {
        tags.insert(ArchetypeTag::Sacrifice);
    }

    tags
}

fn generates_mana(facts: &Facts<'_>) -> bool {
    facts.text.contains("add {")
        || facts.any_phrase(&[
            "add one mana",
            "add two mana",
            "add three mana",
            "add x mana",
            "add an amount of",
            "mana of any",
        ])
}

fn untaps(facts: &Facts<'_>) -> bool {
    let words = facts.tokens.words();
    words.iter().enumerate().any(|(i, w)| {
        w == "untap"
            && words
                .get(i + 1)
                .is_some_and(|next| UNTAP_OBJECTS.contains(&next.as_str()))
    })
}

fn is_tribal(facts: &Facts<'_>) -> bool {
    let features = facts.features;
    if features.card_types.contains("tribal") || features.card_types.contains("kindred") {
        return true;
    }
    if facts.any_phrase(&["creature type", "creature types"]) {
        return true;
    }

    let words = facts.tokens.words();
    let lords = facts.tokens.phrase_positions("other").any(|i| {
        match (words.get(i + 1), words.get(i + 2)) {
            (Some(kind), Some(noun)) => {
                !TRIBAL_FILLER.contains(&kind.as_str())
                    && crate::tokenizer::word_matches(noun, "creature")
                    && !crate::tokenizer::word_matches(kind, "creature")
            }
            _ => false,
        }
    });
    if lords {
        return true;
    }

    features.creature_types.iter().any(|kind| {
        facts.phrase(&format!("each {} you control", kind))
            || facts.phrase(&format!("number of {}", kind))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(text: &str) -> (FeatureSet, Tokens) {
        let tokens = Tokens::new(text);
        let mut features = FeatureSet {
            text: text.to_lowercase(),
            ..Default::default()
        };
        features.actions = tokens.find_all(crate::vocabulary::ACTIONS).into_iter().collect();
        features.zones = tokens.find_all(crate::vocabulary::ZONES).into_iter().collect();
        (features, tokens)
    }

    #[test]
    fn test_untap_and_mana_is_infinite_mana() {
        let (f, t) = features("{T}: Add {G}. {1}: Untap target land.");
        let combos = combo_tags(&f, &t);
        assert!(combos.contains(&ComboTag::ManaGeneration));
        assert!(combos.contains(&ComboTag::UntapEffects));
        assert!(combos.contains(&ComboTag::InfiniteMana));
    }

    #[test]
    fn test_enters_untapped_is_not_untap_effect() {
        let (f, t) = features("This land enters the battlefield untapped.");
        assert!(!combo_tags(&f, &t).contains(&ComboTag::UntapEffects));
    }

    #[test]
    fn test_tutor() {
        let (f, t) = features(
            "Search your library for a card and put that card into your graveyard. Then shuffle.",
        );
        let combos = combo_tags(&f, &t);
        assert!(combos.contains(&ComboTag::Tutoring));
        let archetypes = archetype_tags(&f, &t, &combos);
        assert!(archetypes.contains(&ArchetypeTag::Graveyard));
        assert!(archetypes.contains(&ArchetypeTag::Combo));
    }

    #[test]
    fn test_reanimation_is_recursion() {
        let (f, t) = features(
            "Put target creature card from a graveyard onto the battlefield under your control.",
        );
        assert!(combo_tags(&f, &t).contains(&ComboTag::Recursion));
    }

    #[test]
    fn test_reanimate_action_is_graveyard() {
        let (f, t) = features("Reanimate target creature card. You lose life equal to its mana value.");
        assert!(f.actions.contains("reanimate"));
        assert!(!f.zones.contains("graveyard"));
        let combos = combo_tags(&f, &t);
        assert!(archetype_tags(&f, &t, &combos).contains(&ArchetypeTag::Graveyard));
    }

    #[test]
    fn test_lord_is_tribal() {
        let (f, t) = features("Other Goblin creatures get +1/+1 and have mountainwalk.");
        let combos = combo_tags(&f, &t);
        assert!(archetype_tags(&f, &t, &combos).contains(&ArchetypeTag::Tribal));

        let (f, t) = features("Other attacking creatures get +1/+0.");
        let combos = combo_tags(&f, &t);
        assert!(!archetype_tags(&f, &t, &combos).contains(&ArchetypeTag::Tribal));
    }

    #[test]
    fn test_counterspell_is_control() {
        let (f, t) = features("Counter target spell.");
        let combos = combo_tags(&f, &t);
        let archetypes = archetype_tags(&f, &t, &combos);
        assert!(archetypes.contains(&ArchetypeTag::Control));
        assert!(!archetypes.contains(&ArchetypeTag::Aggro));
    }

    #[test]
    fn test_lifegain() {
        let (f, t) = features("Whenever a creature enters, you gain 1 life.");
        let combos = combo_tags(&f, &t);
        assert!(archetype_tags(&f, &t, &combos).contains(&ArchetypeTag::Lifegain));
    }

    #[test]
    fn test_no_text_no_tags() {
        let (f, t) = features("");
        let combos = combo_tags(&f, &t);
        assert!(combos.is_empty());
        assert!(archetype_tags(&f, &t, &combos).is_empty());
    }
}
