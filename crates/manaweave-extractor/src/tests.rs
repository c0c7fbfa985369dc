//! End-to-end tests for the FeatureExtractor

#[cfg(test)]
mod tests {
    use crate::{parse_mana_cost, ExtractorConfig, FeatureExtractor};
    use manaweave_domain::traits::FeatureSource;
    use manaweave_domain::{
        ArchetypeTag, CardId, CardMetadata, CardRecord, Color, ComboTag, FeatureSet, StatValue,
    };
    use proptest::prelude::*;

    fn metadata(json: &str) -> CardMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_absent_inputs_give_empty_features() {
        let extractor = FeatureExtractor::default();
        assert_eq!(extractor.extract(None, None), FeatureSet::default());
    }

    #[test]
    fn test_goblin_guide() {
        let extractor = FeatureExtractor::default();
        let meta = metadata(
            r#"{
                "name": "Goblin Guide",
                "mana_cost": "{R}",
                "cmc": 1.0,
                "type_line": "Creature — Goblin Berserker Warrior",
                "colors": ["R"],
                "color_identity": ["R"],
                "keywords": ["Haste"],
                "power": "2",
                "toughness": "2",
                "legalities": {"modern": "legal", "standard": "not_legal", "vintage": "restricted"}
            }"#,
        );
        let features = extractor.extract(
            Some("Haste\nWhenever Goblin Guide attacks, defending player reveals the top card of their library. If it's a land card, that player puts it into their hand."),
            Some(&meta),
        );

        assert_eq!(features.name.as_deref(), Some("Goblin Guide"));
        assert!(features.keywords.contains("haste"));
        assert!(features.actions.contains("reveal"));
        assert!(features.zones.contains("library"));
        assert!(features.zones.contains("hand"));
        assert!(features.creature_types.contains("goblin"));
        assert!(features.creature_types.contains("warrior"));
        assert!(features.colors.contains(Color::Red));
        assert_eq!(features.power, Some(StatValue::Fixed(2)));
        assert_eq!(features.mana_value, 1.0);
        assert!(features.legal_formats.contains("modern"));
        assert!(features.legal_formats.contains("vintage"));
        assert!(!features.legal_formats.contains("standard"));
        assert!(features.archetypes.contains(&ArchetypeTag::Aggro));
        assert!(features.named_entities.contains(&"Goblin Guide".to_string()));
    }

    #[test]
    fn test_llanowar_elves_makes_mana() {
        let extractor = FeatureExtractor::default();
        let meta = metadata(
            r#"{"mana_cost": "{G}", "type_line": "Creature — Elf Druid", "colors": ["G"]}"#,
        );
        let features = extractor.extract(Some("{T}: Add {G}."), Some(&meta));

        assert!(features.mana_references.contains("green"));
        assert!(features.combos.contains(&ComboTag::ManaGeneration));
        assert!(features.archetypes.contains(&ArchetypeTag::Ramp));
        assert_eq!(features.mana_value, 1.0);
    }

    #[test]
    fn test_grindstone_mills() {
        let extractor = FeatureExtractor::default();
        let meta = metadata(r#"{"mana_cost": "{1}", "type_line": "Artifact"}"#);
        let features = extractor.extract(
            Some("{3}, {T}: Target player mills two cards. If two cards that share a color were milled this way, repeat this process."),
            Some(&meta),
        );

        assert!(features.actions.contains("mill"));
        assert!(features.combos.contains(&ComboTag::Mill));
        assert!(features.archetypes.contains(&ArchetypeTag::Graveyard));
        assert!(features.colors.is_empty());
    }

    #[test]
    fn test_reanimating_card_is_graveyard() {
        let extractor = FeatureExtractor::default();
        let meta = metadata(r#"{"mana_cost": "{2}{B}", "type_line": "Sorcery"}"#);
        let features = extractor.extract(
            Some("Reanimate target creature card. Draw a card."),
            Some(&meta),
        );

        assert!(features.actions.contains("reanimate"));
        assert!(features.archetypes.contains(&ArchetypeTag::Graveyard));
    }

    #[test]
    fn test_counters_need_the_word_counter() {
        let extractor = FeatureExtractor::default();
        let features = extractor.extract(
            Some("Put two +1/+1 counters on target creature. Its age is irrelevant."),
            None,
        );
        assert!(features.counters.contains("+1/+1"));
        assert!(!features.counters.contains("age"));
        assert!(features.archetypes.contains(&ArchetypeTag::Counters));
    }

    #[test]
    fn test_ward_is_not_matched_inside_toward() {
        let extractor = FeatureExtractor::default();
        let features = extractor.extract(Some("Move it toward the exit."), None);
        assert!(!features.keywords.contains("ward"));
    }

    #[test]
    fn test_text_is_truncated() {
        let extractor = FeatureExtractor::new(ExtractorConfig {
            max_text_length: 5,
            ..Default::default()
        });
        let features = extractor.extract(Some("Flying"), None);
        assert!(features.keywords.is_empty());
        assert_eq!(features.text, "flyin");
    }

    #[test]
    fn test_mana_value_falls_back_to_cost() {
        let extractor = FeatureExtractor::default();
        let meta = metadata(r#"{"mana_cost": "{4}{B}{B}{B}{B}"}"#);
        let features = extractor.extract(None, Some(&meta));
        assert_eq!(features.mana_value, 8.0);
        assert_eq!(features.mana.black, 4);
    }

    #[test]
    fn test_oversized_generic_cost_does_not_overflow() {
        let extractor = FeatureExtractor::default();
        let meta = CardMetadata {
            mana_cost: Some("{99999999999}{R}".to_string()),
            ..Default::default()
        };
        let features = extractor.extract(Some(""), Some(&meta));
        assert_eq!(features.mana_value, f64::from(u32::MAX));
        assert_eq!(features.mana.red, 1);
    }

    #[test]
    fn test_metadata_keywords_are_merged() {
        let extractor = FeatureExtractor::default();
        let meta = metadata(r#"{"keywords": ["Flash", "Flashback"]}"#);
        let features = extractor.extract(Some("Flash"), Some(&meta));
        assert!(features.keywords.contains("flash"));
        assert!(features.keywords.contains("flashback"));
    }

    #[test]
    fn test_raw_tokens_are_config_gated() {
        let text = Some("Draw a card.");
        assert!(FeatureExtractor::default().extract(text, None).raw_tokens.is_empty());

        let verbose = FeatureExtractor::new(ExtractorConfig::verbose());
        assert_eq!(verbose.extract(text, None).raw_tokens, vec!["draw", "a", "card"]);

        let minimal = FeatureExtractor::new(ExtractorConfig::minimal());
        assert!(minimal.extract(text, None).noun_phrases.is_empty());
    }

    #[test]
    fn test_feature_source_uses_card_name() {
        let extractor = FeatureExtractor::default();
        let card = CardRecord::new(CardId::from_value(1), "Counterspell").with_text("Counter target spell.");
        let features = extractor.features_for(&card);
        assert_eq!(features.name.as_deref(), Some("Counterspell"));
        assert!(features.archetypes.contains(&ArchetypeTag::Control));
    }

    #[test]
    fn test_extract_json_rejects_garbage() {
        let extractor = FeatureExtractor::default();
        assert!(extractor.extract_json(None, "not json").is_err());
        assert!(extractor.extract_json(None, r#"{"type_line": "Instant"}"#).is_ok());
    }

    proptest! {
        #[test]
        fn extraction_never_panics(text in "\\PC{0,200}", cost in "[{}0-9WUBRGCSXP/]{0,20}") {
            let extractor = FeatureExtractor::default();
            let meta = CardMetadata { mana_cost: Some(cost), ..Default::default() };
            let features = extractor.extract(Some(text.as_str()), Some(&meta));
            prop_assert!(features.mana_value >= 0.0);
        }

        #[test]
        fn huge_generic_costs_never_panic(generic in 1_000_000_000u64..100_000_000_000, pips in "[WUBRG]{0,6}") {
            let cost: String = std::iter::once(format!("{{{}}}", generic))
                .chain(pips.chars().map(|c| format!("{{{}}}", c)))
                .collect();
            let meta = CardMetadata { mana_cost: Some(cost), ..Default::default() };
            let features = FeatureExtractor::default().extract(None, Some(&meta));
            prop_assert!(features.mana_value >= 1_000_000_000.0);
        }

        #[test]
        fn colored_symbols_never_exceed_total(cost in "(\\{[0-9WUBRGCX/P]{1,3}\\}){0,8}") {
            let mana = parse_mana_cost(&cost);
            prop_assert!(mana.colored_symbols <= mana.total_symbols);
            prop_assert!(mana.x_count <= mana.total_symbols);
        }
    }
}
