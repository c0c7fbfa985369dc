//! Closed reference vocabularies
//!
//! Static tables, never mutated. Every entry is lower-case; multi-word
//! entries are matched as consecutive tokens.

/// Ability keywords recognised in rules text
pub const ABILITY_KEYWORDS: &[&str] = &[
    "flying", "first strike", "double strike", "deathtouch", "haste",
    "hexproof", "indestructible", "lifelink", "menace", "protection",
    "reach", "trample", "vigilance", "ward", "defender", "flash",
    "prowess", "afterlife", "mentor", "riot", "adapt", "annihilator",
    "cascade", "cipher", "convoke", "crew", "delve", "emerge", "enrage",
    "evoke", "exalted", "exploit", "extort", "flanking", "graft",
    "improvise", "infect", "kicker", "madness", "modular", "morph",
    "mutate", "ninjutsu", "offering", "outlast", "overload", "persist",
    "proliferate", "provoke", "prowl", "raid", "replicate", "recover",
    "reinforce", "retrace", "scavenge", "shadow", "soulbond", "support",
    "surge", "suspend", "totem armor", "undying", "unearth", "unleash",
    "vanishing", "wither", "phasing", "banding", "flashback", "dredge",
];

/// Game actions
pub const ACTIONS: &[&str] = &[
    "cast", "activate", "counter", "sacrifice", "discard", "exile",
    "destroy", "tap", "untap", "attach", "unattach", "equip", "unequip",
    "transform", "play", "reveal", "search", "shuffle", "scry", "fateseal",
    "proliferate", "draw", "mill", "create", "return", "reanimate",
];

/// Game zones
pub const ZONES: &[&str] = &[
    "battlefield", "library", "graveyard", "hand", "stack", "exile",
    "command", "ante", "sideboard",
];

/// Mana words
pub const MANA_WORDS: &[&str] = &[
    "white", "blue", "black", "red", "green",
    "colorless", "generic", "hybrid", "phyrexian",
];

/// Counter kinds, matched as `"<kind> counter"`
pub const COUNTERS: &[&str] = &[
    "+1/+1", "-1/-1", "loyalty", "poison", "age", "aim", "arrow", "arrowhead",
    "awakening", "blood", "brick", "charge", "coin", "credit", "crystal",
    "cube", "currency", "death", "delay", "depletion", "despair", "devotion",
    "energy", "fade", "level", "lore", "oil", "quest", "shield", "stun",
    "time",
];

/// Card types
pub const CARD_TYPES: &[&str] = &[
    "artifact", "creature", "enchantment", "instant", "land",
    "planeswalker", "sorcery", "tribal", "kindred", "battle", "conspiracy",
    "dungeon", "phenomenon", "plane", "scheme", "vanguard",
];

/// Supertypes
pub const SUPERTYPES: &[&str] = &[
    "basic", "legendary", "snow", "world", "ongoing", "host",
];

/// Artifact subtypes
pub const ARTIFACT_SUBTYPES: &[&str] = &[
    "attraction", "blood", "bobblehead", "clue", "contraption", "equipment",
    "food", "fortification", "gold", "incubator", "junk", "map",
    "powerstone", "treasure", "vehicle",
];

/// Enchantment subtypes
pub const ENCHANTMENT_SUBTYPES: &[&str] = &[
    "aura", "background", "cartouche", "case", "class", "curse", "role",
    "room", "rune", "saga", "shard", "shrine",
];

/// Land subtypes
pub const LAND_SUBTYPES: &[&str] = &[
    "plains", "island", "swamp", "mountain", "forest", "cave", "desert",
    "gate", "lair", "locus", "mine", "power-plant", "sphere", "tower",
    "urza's",
];

/// Words that open a noun phrase
pub const DETERMINERS: &[&str] = &[
    "a", "an", "the", "target", "each", "another", "any", "all", "other",
];

/// Words that close a noun phrase
pub const PHRASE_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "target", "each", "another", "any", "all", "other",
    "of", "to", "from", "into", "onto", "in", "on", "at", "with", "and",
    "or", "you", "your", "its", "their", "it", "that", "this", "gets",
    "get", "gains", "gain", "has", "have", "is", "are", "deals", "deal",
    "can't", "can", "may", "until", "under", "for", "as", "if", "then",
    "where", "when", "whenever", "control", "controls", "attacks",
    "blocks", "enters", "dies", "by", "than", "equal",
];

/// Whether `word` is in `list`
pub fn contains(list: &[&str], word: &str) -> bool {
    list.iter().any(|entry| *entry == word)
}
