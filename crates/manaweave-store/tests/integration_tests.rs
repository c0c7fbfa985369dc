//! Integration tests for manaweave-store
//!
//! These tests cover the synergy edge cache and the card catalog.

use manaweave_domain::traits::{CardCatalog, SynergyStore};
use manaweave_domain::{
    CardId, CardMetadata, CardPair, CardRecord, FeatureSet, ScoreField, SynergyScore,
    ANALYSIS_VERSION,
};
use manaweave_store::{SqliteStore, StoreError};
use proptest::prelude::*;

fn id(v: i64) -> CardId {
    CardId::from_value(v)
}

fn pair(x: i64, y: i64) -> CardPair {
    CardPair::new(id(x), id(y)).unwrap()
}

fn score(total: f64) -> SynergyScore {
    SynergyScore {
        total,
        matches: vec![format!("total:{}", total)],
        ..Default::default()
    }
}

fn memory_store() -> SqliteStore {
    SqliteStore::new(":memory:").unwrap()
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().count().unwrap(), 0);
}

#[test]
fn test_put_and_get_full_score() {
    let mut store = memory_store();
    let stored = SynergyScore {
        total: 27.5,
        tribal: 5.0,
        color: 1.0,
        keyword: 0.0,
        archetype: 0.5,
        combo: 0.0,
        type_score: 1.0,
        mana_curve: 1.5,
        format: 1.2,
        matches: vec!["tribal:goblin".to_string(), "shared_color:R".to_string()],
    };

    store.put(id(1), id(2), &stored).unwrap();

    assert_eq!(store.get(id(1), id(2)).unwrap(), Some(stored));
}

#[test]
fn test_order_independence() {
    let mut store = memory_store();
    store.put(id(9), id(4), &score(12.0)).unwrap();

    assert_eq!(store.get(id(4), id(9)).unwrap(), Some(score(12.0)));
    assert_eq!(store.get(id(9), id(4)).unwrap(), Some(score(12.0)));
    assert!(store.contains(id(4), id(9)).unwrap());

    let edge = store.get_edge(id(9), id(4)).unwrap().unwrap();
    assert_eq!(edge.pair.low(), id(4));
    assert_eq!(edge.pair.high(), id(9));
    assert_eq!(edge.analysis_version, ANALYSIS_VERSION);
}

#[test]
fn test_put_overwrites_existing_edge() {
    let mut store = memory_store();
    store.put(id(1), id(2), &score(5.0)).unwrap();
    store.put(id(2), id(1), &score(8.0)).unwrap();

    assert_eq!(store.count().unwrap(), 1, "Reversed put must not duplicate");
    assert_eq!(store.get(id(1), id(2)).unwrap(), Some(score(8.0)));
}

#[test]
fn test_self_pair_rejected() {
    let mut store = memory_store();
    let result = store.put(id(3), id(3), &score(1.0));
    assert!(matches!(result, Err(StoreError::SelfPair(c)) if c == id(3)));

    assert_eq!(store.get(id(3), id(3)).unwrap(), None);
    assert!(!store.contains(id(3), id(3)).unwrap());
}

#[test]
fn test_missing_edge() {
    let store = memory_store();
    assert_eq!(store.get(id(1), id(2)).unwrap(), None);
    assert!(!store.contains(id(1), id(2)).unwrap());
}

#[test]
fn test_top_n_ordering_and_floor() {
    let mut store = memory_store();
    store.put(id(1), id(2), &score(10.0)).unwrap();
    store.put(id(1), id(3), &score(30.0)).unwrap();
    store.put(id(2), id(3), &score(20.0)).unwrap();
    store.put(id(3), id(4), &score(2.0)).unwrap();

    let top = store.top_n(10, 5.0).unwrap();
    let totals: Vec<f64> = top.iter().map(|e| e.total()).collect();
    assert_eq!(totals, vec![30.0, 20.0, 10.0]);

    let limited = store.top_n(1, 0.0).unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].pair, pair(1, 3));
}

#[test]
fn test_for_card_matches_either_endpoint() {
    let mut store = memory_store();
    store.put(id(5), id(1), &score(10.0)).unwrap();
    store.put(id(5), id(9), &score(15.0)).unwrap();
    store.put(id(1), id(9), &score(50.0)).unwrap();

    let edges = store.for_card(id(5), 0.0, 10).unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].pair, pair(5, 9));
    assert_eq!(edges[1].pair, pair(1, 5));
    assert!(edges.iter().all(|e| e.pair.contains(id(5))));

    assert!(store.for_card(id(5), 12.0, 10).unwrap().len() == 1);
    assert!(store.for_card(id(404), 0.0, 10).unwrap().is_empty());
}

#[test]
fn test_filter_by_component() {
    let mut store = memory_store();
    let tribal = SynergyScore {
        total: 15.0,
        tribal: 3.0,
        ..Default::default()
    };
    let combo = SynergyScore {
        total: 40.0,
        combo: 10.0,
        ..Default::default()
    };
    store.put(id(1), id(2), &tribal).unwrap();
    store.put(id(3), id(4), &combo).unwrap();

    let edges = store.filter_by_component(ScoreField::Tribal, 1.0, 10).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].pair, pair(1, 2));

    let edges = store.filter_by_component(ScoreField::Combo, 5.0, 10).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].score.combo, 10.0);

    let edges = store.filter_by_component(ScoreField::Total, 0.0, 10).unwrap();
    assert_eq!(edges[0].pair, pair(3, 4));
}

#[test]
fn test_edges_at_least_sorted_by_pair() {
    let mut store = memory_store();
    store.put(id(3), id(4), &score(25.0)).unwrap();
    store.put(id(1), id(2), &score(21.0)).unwrap();
    store.put(id(1), id(4), &score(3.0)).unwrap();

    let edges = store.edges_at_least(20.0).unwrap();
    let pairs: Vec<CardPair> = edges.iter().map(|e| e.pair).collect();
    assert_eq!(pairs, vec![pair(1, 2), pair(3, 4)]);
}

#[test]
fn test_count_at_least() {
    let mut store = memory_store();
    store.put(id(1), id(2), &score(35.0)).unwrap();
    store.put(id(1), id(3), &score(20.0)).unwrap();
    store.put(id(2), id(3), &score(4.0)).unwrap();

    assert_eq!(store.count_at_least(ScoreField::Total, 30.0).unwrap(), 1);
    assert_eq!(store.count_at_least(ScoreField::Total, 15.0).unwrap(), 2);
    assert_eq!(store.count_at_least(ScoreField::Tribal, 1.0).unwrap(), 0);
}

#[test]
fn test_clear_removes_all_edges() {
    let mut store = memory_store();
    store.put(id(1), id(2), &score(1.0)).unwrap();
    store.put(id(1), id(3), &score(1.0)).unwrap();

    assert_eq!(store.clear().unwrap(), 2);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_put_batch_commits_all() {
    let mut store = memory_store();
    let entries = vec![(pair(1, 2), score(3.0)), (pair(2, 3), score(4.0)), (pair(1, 3), score(5.0))];

    assert_eq!(store.put_batch(&entries).unwrap(), 3);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_put_batch_rolls_back_on_failure() {
    let mut store = memory_store();
    store.put(id(1), id(2), &score(3.0)).unwrap();

    // SQLite binds NaN as NULL, which violates NOT NULL on total_score
    let entries = vec![(pair(3, 4), score(4.0)), (pair(5, 6), score(f64::NAN))];
    assert!(store.put_batch(&entries).is_err());

    assert_eq!(store.count().unwrap(), 1, "Failed batch must not leave partial rows");
    assert!(!store.contains(id(3), id(4)).unwrap());
}

fn goblin_card(v: i64) -> CardRecord {
    let metadata = CardMetadata {
        type_line: Some("Creature — Goblin Scout".to_string()),
        mana_cost: Some("{R}".to_string()),
        colors: vec!["R".to_string()],
        cmc: Some(1.0),
        ..Default::default()
    };
    CardRecord::new(id(v), "Goblin Guide")
        .with_text("Haste")
        .with_metadata(metadata)
}

#[test]
fn test_catalog_upsert_and_get() {
    let mut store = memory_store();
    let card = goblin_card(10);
    store.upsert_card(&card).unwrap();

    assert_eq!(store.get_card(id(10)).unwrap(), Some(card));
    assert_eq!(store.get_card(id(11)).unwrap(), None);
    assert_eq!(store.card_count().unwrap(), 1);
}

#[test]
fn test_catalog_upsert_replaces_card_but_keeps_features() {
    let mut store = memory_store();
    store.upsert_card(&goblin_card(10)).unwrap();

    let features = FeatureSet {
        text: "haste".to_string(),
        ..Default::default()
    };
    store.save_features(id(10), &features).unwrap();

    let renamed = CardRecord::new(id(10), "Goblin Guide (Reprint)");
    store.upsert_card(&renamed).unwrap();

    assert_eq!(store.get_card(id(10)).unwrap().unwrap().name, "Goblin Guide (Reprint)");
    assert_eq!(store.load_features(id(10)).unwrap(), Some(features));
    assert_eq!(store.card_count().unwrap(), 1);
}

#[test]
fn test_catalog_find_by_name() {
    let mut store = memory_store();
    store.upsert_card(&CardRecord::new(id(1), "Goblin King")).unwrap();
    store.upsert_card(&CardRecord::new(id(2), "Goblin Guide")).unwrap();
    store.upsert_card(&CardRecord::new(id(3), "Llanowar Elves")).unwrap();
    store.upsert_card(&CardRecord::new(id(4), "100% Goblin")).unwrap();

    let found = store.find_cards_by_name("goblin", 10).unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["100% Goblin", "Goblin Guide", "Goblin King"]);

    assert_eq!(store.find_cards_by_name("goblin", 1).unwrap().len(), 1);
    assert_eq!(store.find_cards_by_name("%", 10).unwrap().len(), 1);
    assert!(store.find_cards_by_name("sliver", 10).unwrap().is_empty());
}

#[test]
fn test_catalog_features() {
    let mut store = memory_store();
    store.upsert_card(&CardRecord::new(id(2), "B")).unwrap();
    store.upsert_card(&CardRecord::new(id(1), "A")).unwrap();
    store.upsert_card(&CardRecord::new(id(3), "C")).unwrap();

    assert_eq!(store.analyzed_count().unwrap(), 0);
    assert_eq!(store.load_features(id(1)).unwrap(), None);

    let features = FeatureSet {
        name: Some("A".to_string()),
        ..Default::default()
    };
    store.save_features(id(2), &features).unwrap();
    store.save_features(id(1), &features).unwrap();

    let analyzed = store.analyzed_cards().unwrap();
    let ids: Vec<CardId> = analyzed.iter().map(|(c, _)| *c).collect();
    assert_eq!(ids, vec![id(1), id(2)]);
    assert_eq!(store.analyzed_count().unwrap(), 2);

    let all: Vec<CardId> = store.all_cards().unwrap().iter().map(|c| c.id).collect();
    assert_eq!(all, vec![id(1), id(2), id(3)]);
}

#[test]
fn test_save_features_unknown_card() {
    let mut store = memory_store();
    let result = store.save_features(id(77), &FeatureSet::default());
    assert!(matches!(result, Err(StoreError::CardNotFound(c)) if c == id(77)));
}

#[test]
fn test_persistence_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manaweave.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.upsert_card(&goblin_card(1)).unwrap();
        store.put(id(2), id(1), &score(9.0)).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.card_count().unwrap(), 1);
    assert_eq!(store.get(id(1), id(2)).unwrap(), Some(score(9.0)));
}

proptest! {
    #[test]
    fn prop_put_get_order_independent(x in -1000i64..1000, y in -1000i64..1000, total in 0.0f64..100.0) {
        prop_assume!(x != y);
        let mut store = memory_store();
        store.put(id(x), id(y), &score(total)).unwrap();

        prop_assert_eq!(store.get(id(y), id(x)).unwrap(), Some(score(total)));
        prop_assert_eq!(store.count().unwrap(), 1);
    }
}
