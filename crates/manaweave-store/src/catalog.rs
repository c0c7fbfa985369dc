//! CardCatalog implementation

use crate::{conversion_error, limit_param, now, SqliteStore, StoreError};
use manaweave_domain::traits::CardCatalog;
use manaweave_domain::{CardId, CardMetadata, CardRecord, FeatureSet};
use rusqlite::{params, OptionalExtension, Row};

fn read_card(row: &Row<'_>) -> rusqlite::Result<CardRecord> {
    let metadata_json: String = row.get(3)?;
    let metadata: CardMetadata =
        serde_json::from_str(&metadata_json).map_err(|e| conversion_error(3, e))?;
    Ok(CardRecord {
        id: CardId::from_value(row.get(0)?),
        name: row.get(1)?,
        oracle_text: row.get(2)?,
        metadata,
    })
}

fn read_features(column: usize, json: &str) -> rusqlite::Result<FeatureSet> {
    serde_json::from_str(json).map_err(|e| conversion_error(column, e))
}

/// Escape `%`, `_` and `\` for a LIKE pattern
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl CardCatalog for SqliteStore {
    type Error = StoreError;

    fn upsert_card(&mut self, card: &CardRecord) -> Result<(), Self::Error> {
        let metadata = serde_json::to_string(&card.metadata)?;
        let timestamp = now();
        self.conn.execute(
            "INSERT INTO cards (id, name, oracle_text, metadata, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                oracle_text = excluded.oracle_text,
                metadata = excluded.metadata,
                updated_at = excluded.updated_at",
            params![card.id.value(), card.name, card.oracle_text, metadata, timestamp],
        )?;
        Ok(())
    }

    fn get_card(&self, id: CardId) -> Result<Option<CardRecord>, Self::Error> {
        let card = self
            .conn
            .query_row(
                "SELECT id, name, oracle_text, metadata FROM cards WHERE id = ?1",
                params![id.value()],
                read_card,
            )
            .optional()?;
        Ok(card)
    }

    fn find_cards_by_name(&self, fragment: &str, limit: usize) -> Result<Vec<CardRecord>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, oracle_text, metadata FROM cards
             WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY name COLLATE NOCASE, id LIMIT ?2",
        )?;
        let cards = stmt
            .query_map(params![like_pattern(fragment), limit_param(limit)], read_card)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    fn all_cards(&self) -> Result<Vec<CardRecord>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, oracle_text, metadata FROM cards ORDER BY id")?;
        let cards = stmt.query_map([], read_card)?.collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    fn save_features(&mut self, id: CardId, features: &FeatureSet) -> Result<(), Self::Error> {
        let json = serde_json::to_string(features)?;
        let updated = self.conn.execute(
            "UPDATE cards SET features = ?1, analyzed_at = ?2 WHERE id = ?3",
            params![json, now(), id.value()],
        )?;
        if updated == 0 {
            return Err(StoreError::CardNotFound(id));
        }
        Ok(())
    }

    fn load_features(&self, id: CardId) -> Result<Option<FeatureSet>, Self::Error> {
        let json: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT features FROM cards WHERE id = ?1",
                params![id.value()],
                |row| row.get(0),
            )
            .optional()?;
        match json.flatten() {
            Some(json) => Ok(Some(read_features(0, &json)?)),
            None => Ok(None),
        }
    }

    fn analyzed_cards(&self) -> Result<Vec<(CardId, FeatureSet)>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, features FROM cards WHERE features IS NOT NULL ORDER BY id")?;
        let cards = stmt
            .query_map([], |row| {
                let json: String = row.get(1)?;
                Ok((CardId::from_value(row.get(0)?), read_features(1, &json)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    fn card_count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn analyzed_count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE features IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
