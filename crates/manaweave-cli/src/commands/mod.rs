//! Command implementations.

pub mod analyze;
pub mod compute;
pub mod graph;
pub mod import;
pub mod query;
pub mod reset;
pub mod score;

pub use self::analyze::execute_analyze;
pub use self::compute::execute_compute;
pub use self::graph::{
    execute_anchors, execute_clusters, execute_cores, execute_hubs, execute_neighbors,
    execute_status,
};
pub use self::import::execute_import;
pub use self::query::{execute_card, execute_filter, execute_top};
pub use self::reset::execute_reset;
pub use self::score::{execute_candidates, execute_score};

use crate::error::{CliError, Result};
use crate::output::CardNames;
use manaweave_domain::traits::CardCatalog;
use manaweave_domain::{CardId, CardRecord};
use manaweave_store::SqliteStore;

/// Look a card up by id, then by name.
///
/// A name matches exactly (ignoring case) before it matches as a
/// fragment; a fragment matching several cards is rejected.
pub fn resolve_card(store: &SqliteStore, query: &str) -> Result<CardRecord> {
    if let Ok(id) = query.parse::<CardId>() {
        if let Some(card) = store.get_card(id)? {
            return Ok(card);
        }
    }

    let mut matches = store.find_cards_by_name(query.trim(), 10)?;
    if let Some(pos) = matches
        .iter()
        .position(|c| c.name.eq_ignore_ascii_case(query.trim()))
    {
        return Ok(matches.swap_remove(pos));
    }

    match matches.len() {
        0 => Err(CliError::CardNotFound(query.to_string())),
        1 => Ok(matches.remove(0)),
        _ => {
            let names: Vec<String> = matches.iter().map(|c| c.name.clone()).collect();
            Err(CliError::InvalidInput(format!(
                "'{}' matches several cards: {}",
                query,
                names.join(", ")
            )))
        }
    }
}

/// Names for the given card ids; unknown ids are left out.
pub fn names_for<I>(store: &SqliteStore, ids: I) -> Result<CardNames>
where
    I: IntoIterator<Item = CardId>,
{
    let mut names = CardNames::new();
    for id in ids {
        if names.contains_key(&id) {
            continue;
        }
        if let Some(card) = store.get_card(id)? {
            names.insert(id, card.name);
        }
    }
    Ok(names)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn store_with_cards(names: &[&str]) -> SqliteStore {
        let mut store = SqliteStore::new(":memory:").unwrap();
        for (i, name) in names.iter().enumerate() {
            let card = CardRecord::new(CardId::from_value(i as i64 + 1), *name);
            store.upsert_card(&card).unwrap();
        }
        store
    }

    #[test]
    fn test_resolve_by_id_and_name() {
        let store = store_with_cards(&["Goblin Guide", "Goblin Guide Scout", "Llanowar Elves"]);

        assert_eq!(resolve_card(&store, "3").unwrap().name, "Llanowar Elves");
        assert_eq!(resolve_card(&store, "goblin guide").unwrap().id, CardId::from_value(1));
        assert_eq!(resolve_card(&store, "llanowar").unwrap().id, CardId::from_value(3));
    }

    #[test]
    fn test_resolve_ambiguous_and_missing() {
        let store = store_with_cards(&["Goblin Guide", "Goblin Lackey"]);

        assert!(matches!(
            resolve_card(&store, "goblin"),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_card(&store, "Shivan Dragon"),
            Err(CliError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_names_for_skips_unknown() {
        let store = store_with_cards(&["Goblin Guide"]);
        let names = names_for(&store, [CardId::from_value(1), CardId::from_value(7)]).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[&CardId::from_value(1)], "Goblin Guide");
    }
}
