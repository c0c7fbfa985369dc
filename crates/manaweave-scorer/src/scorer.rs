//! Pairwise synergy scoring

use crate::config::ScorerConfig;
use crate::error::ScorerError;
use manaweave_domain::{CardId, ComboTag, FeatureSet, SynergyScore};
use std::collections::BTreeSet;

/// Creature types whose plural is not a plain `s`/`es` suffix
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("elf", "elves"),
    ("dwarf", "dwarves"),
    ("wolf", "wolves"),
    ("werewolf", "werewolves"),
    ("ox", "oxen"),
    ("fungus", "fungi"),
    ("cyclops", "cyclopes"),
    ("octopus", "octopuses"),
    ("mouse", "mice"),
    ("thief", "thieves"),
];

/// One component's points plus its explanations
#[derive(Debug, Default)]
struct Partial {
    score: f64,
    matches: Vec<String>,
}

impl Partial {
    fn add(&mut self, points: f64, explanation: String) {
        self.score += points;
        self.matches.push(explanation);
    }
}

/// A candidate returned by [`SynergyScorer::rank_candidates`]
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Candidate card
    pub id: CardId,
    /// Its score against the target
    pub score: SynergyScore,
}

/// Scores pairs of feature sets
///
/// Scoring is pure: the same two feature sets always produce the same
/// score, in either argument order.
#[derive(Debug, Clone)]
pub struct SynergyScorer {
    config: ScorerConfig,
}

impl Default for SynergyScorer {
    fn default() -> Self {
        Self::default_config()
    }
}

impl SynergyScorer {
    /// Create a new SynergyScorer, rejecting invalid weights
    pub fn new(config: ScorerConfig) -> Result<Self, ScorerError> {
        config.validate().map_err(ScorerError::Config)?;
        Ok(Self { config })
    }

    /// Create a SynergyScorer with default weights
    pub fn default_config() -> Self {
        Self {
            config: ScorerConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score two cards
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::{ColorSet, FeatureSet};
    /// use manaweave_scorer::SynergyScorer;
    ///
    /// let bolt = FeatureSet { colors: ColorSet::from_symbols(["R"]), ..Default::default() };
    /// let shock = bolt.clone();
    ///
    /// let score = SynergyScorer::default_config().score(&bolt, &shock);
    /// assert_eq!(score.color, 2.0);
    /// assert_eq!(score.total, 3.0);
    /// assert_eq!(score.matches, vec!["color:exact_match"]);
    /// ```
    pub fn score(&self, a: &FeatureSet, b: &FeatureSet) -> SynergyScore {
        let tribal = tribal(a, b);
        let color = color(a, b);
        let keyword = self.keyword(a, b);
        let archetype = self.archetype(a, b);
        let combo = self.combo(a, b);
        let types = card_types(a, b);
        let curve = mana_curve(a, b);
        let format = self.format(a, b);

        let w = &self.config.weights;
        let total = w.tribal * tribal.score
            + w.archetype * archetype.score
            + w.combo * combo.score
            + w.keyword * keyword.score
            + w.type_score * types.score
            + w.color * color.score
            + w.mana_curve * curve.score
            + w.format * format.score;

        let mut score = SynergyScore {
            total,
            tribal: tribal.score,
            color: color.score,
            keyword: keyword.score,
            archetype: archetype.score,
            combo: combo.score,
            type_score: types.score,
            mana_curve: curve.score,
            format: format.score,
            matches: Vec::new(),
        };
        for partial in [tribal, color, keyword, archetype, combo, types, curve, format] {
            score.matches.extend(partial.matches);
        }
        score
    }

    /// Score `target` against each candidate and keep those at or above
    /// `threshold`, best first
    ///
    /// Ties are broken by ascending candidate id. The target itself is
    /// skipped if it appears among the candidates.
    pub fn rank_candidates<'a, I>(
        &self,
        target: (CardId, &FeatureSet),
        candidates: I,
        threshold: f64,
    ) -> Vec<RankedCandidate>
    where
        I: IntoIterator<Item = (CardId, &'a FeatureSet)>,
    {
        let (target_id, target_features) = target;
        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .filter(|(id, _)| *id != target_id)
            .map(|(id, features)| RankedCandidate {
                id,
                score: self.score(target_features, features),
            })
            .filter(|c| c.score.total >= threshold)
            .collect();

        ranked.sort_by(|x, y| {
            y.score
                .total
                .total_cmp(&x.score.total)
                .then_with(|| x.id.cmp(&y.id))
        });
        ranked
    }

    fn keyword(&self, a: &FeatureSet, b: &FeatureSet) -> Partial {
        let mut partial = Partial::default();

        for shared in a.keywords.intersection(&b.keywords) {
            let points = if self.config.privileged_keywords.iter().any(|k| k == shared) {
                2.0
            } else {
                1.0
            };
            partial.add(points, format!("keyword:{}", shared));
        }

        for (first, second) in &self.config.complementary_keywords {
            let forward = a.keywords.contains(first) && b.keywords.contains(second);
            let backward = a.keywords.contains(second) && b.keywords.contains(first);
            if forward || backward {
                partial.add(1.0, format!("keyword_combo:{}+{}", first, second));
            }
        }

        partial
    }

    fn archetype(&self, a: &FeatureSet, b: &FeatureSet) -> Partial {
        let mut partial = Partial::default();
        for tag in a.archetypes.intersection(&b.archetypes) {
            partial.add(self.config.archetype_weight(*tag), format!("archetype:{}", tag));
        }
        partial
    }

    fn combo(&self, a: &FeatureSet, b: &FeatureSet) -> Partial {
        let mut partial = Partial::default();
        for tag in a.combos.intersection(&b.combos) {
            partial.add(self.config.combo_weight(*tag), format!("combo:{}", tag));
        }

        let crosses = |x: ComboTag, y: ComboTag| {
            (a.combos.contains(&x) && b.combos.contains(&y))
                || (a.combos.contains(&y) && b.combos.contains(&x))
        };
        if crosses(ComboTag::ManaGeneration, ComboTag::UntapEffects) {
            partial.add(
                self.config.mana_untap_bonus,
                "combo_pattern:mana_generation+untap_effects".to_string(),
            );
        }
        if crosses(ComboTag::Tutoring, ComboTag::Recursion) {
            partial.add(
                self.config.tutor_recursion_bonus,
                "combo_pattern:tutoring+recursion".to_string(),
            );
        }

        partial
    }

    fn format(&self, a: &FeatureSet, b: &FeatureSet) -> Partial {
        let mut partial = Partial::default();
        for format in a.legal_formats.intersection(&b.legal_formats) {
            partial.add(self.config.format_weight(format), format!("format:{}", format));
        }
        partial
    }
}

fn tribal(a: &FeatureSet, b: &FeatureSet) -> Partial {
    let mut partial = Partial::default();

    for shared in a.creature_types.intersection(&b.creature_types) {
        partial.add(3.0, format!("tribal:{}", shared));
    }

    // Checked from both sides and merged so (a, b) and (b, a) agree.
    let a_words = words(&a.text);
    let b_words = words(&b.text);
    let supported: BTreeSet<&String> = a
        .creature_types
        .iter()
        .filter(|t| mentions(&b_words, t))
        .chain(b.creature_types.iter().filter(|t| mentions(&a_words, t)))
        .collect();
    for kind in supported {
        partial.add(2.0, format!("tribal_support:{}", kind));
    }

    partial
}

fn color(a: &FeatureSet, b: &FeatureSet) -> Partial {
    let mut partial = Partial::default();

    if !a.colors.is_empty() && a.colors == b.colors {
        partial.add(2.0, "color:exact_match".to_string());
    } else {
        for shared in a.colors.intersection(b.colors).iter() {
            partial.add(1.0, format!("color:shared_{}", shared.name()));
        }
    }

    let (x, y) = (a.color_identity, b.color_identity);
    if !x.is_empty() && !y.is_empty() && (x.is_subset(y) || y.is_subset(x)) {
        partial.add(1.0, "color:identity_subset".to_string());
    }

    if a.colors.is_multicolor() && b.colors.is_multicolor() {
        partial.add(1.0, "color:multicolor".to_string());
    }

    partial
}

fn card_types(a: &FeatureSet, b: &FeatureSet) -> Partial {
    let mut partial = Partial::default();
    for shared in a.card_types.intersection(&b.card_types) {
        partial.add(1.0, format!("type:{}", shared));
    }
    for shared in a.artifact_subtypes.intersection(&b.artifact_subtypes) {
        partial.add(2.0, format!("artifact_subtype:{}", shared));
    }
    for shared in a.enchantment_subtypes.intersection(&b.enchantment_subtypes) {
        partial.add(2.0, format!("enchantment_subtype:{}", shared));
    }
    partial
}

fn mana_curve(a: &FeatureSet, b: &FeatureSet) -> Partial {
    const EPSILON: f64 = 1e-9;
    let mut partial = Partial::default();

    let diff = (a.mana_value - b.mana_value).abs();
    if (diff - 1.0).abs() < EPSILON {
        partial.add(1.0, "mana_curve:adjacent_cost".to_string());
    } else if (diff - 2.0).abs() < EPSILON {
        partial.add(0.5, "mana_curve:two_apart".to_string());
    }

    if a.mana_value > 0.0 && b.mana_value > 0.0 && (a.color_ratio() - b.color_ratio()).abs() < 0.3 {
        partial.add(0.5, "mana_curve:color_ratio".to_string());
    }

    partial
}

/// Lower-cased words of a text, possessives stripped
fn words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '-'))
        .map(|w| w.strip_suffix("'s").unwrap_or(w).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether `kind` (or its plural) appears among `words`
fn mentions(words: &BTreeSet<String>, kind: &str) -> bool {
    words.contains(kind) || words.contains(&plural(kind))
}

fn plural(kind: &str) -> String {
    if let Some((_, irregular)) = IRREGULAR_PLURALS.iter().find(|(s, _)| *s == kind) {
        return irregular.to_string();
    }
    if kind.ends_with('s') || kind.ends_with('x') || kind.ends_with("ch") || kind.ends_with("sh") {
        return format!("{}es", kind);
    }
    if let Some(stem) = kind.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", kind)
}
