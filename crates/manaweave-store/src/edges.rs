//! SynergyStore implementation

use crate::{conversion_error, limit_param, now, SqliteStore, StoreError};
use manaweave_domain::traits::SynergyStore;
use manaweave_domain::{CardId, CardPair, ScoreField, SynergyEdge, SynergyScore, ANALYSIS_VERSION};
use rusqlite::{params, Connection, OptionalExtension, Row};

const EDGE_COLUMNS: &str = "card_low, card_high, total_score, tribal_score, color_score, \
     keyword_score, archetype_score, combo_score, type_score, mana_curve_score, format_score, \
     matches, analysis_version, updated_at";

const UPSERT_EDGE: &str = "INSERT INTO synergy_edges (
        card_low, card_high, total_score, tribal_score, color_score, keyword_score,
        archetype_score, combo_score, type_score, mana_curve_score, format_score,
        matches, analysis_version, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)
     ON CONFLICT(card_low, card_high) DO UPDATE SET
        total_score = excluded.total_score,
        tribal_score = excluded.tribal_score,
        color_score = excluded.color_score,
        keyword_score = excluded.keyword_score,
        archetype_score = excluded.archetype_score,
        combo_score = excluded.combo_score,
        type_score = excluded.type_score,
        mana_curve_score = excluded.mana_curve_score,
        format_score = excluded.format_score,
        matches = excluded.matches,
        analysis_version = excluded.analysis_version,
        updated_at = excluded.updated_at";

/// Column holding a score field
fn column(field: ScoreField) -> &'static str {
    match field {
        ScoreField::Total => "total_score",
        ScoreField::Tribal => "tribal_score",
        ScoreField::Color => "color_score",
        ScoreField::Keyword => "keyword_score",
        ScoreField::Archetype => "archetype_score",
        ScoreField::Combo => "combo_score",
        ScoreField::Type => "type_score",
        ScoreField::ManaCurve => "mana_curve_score",
        ScoreField::Format => "format_score",
    }
}

fn write_edge(conn: &Connection, pair: CardPair, score: &SynergyScore) -> Result<(), StoreError> {
    let matches = serde_json::to_string(&score.matches)?;
    let mut stmt = conn.prepare_cached(UPSERT_EDGE)?;
    stmt.execute(params![
        pair.low().value(),
        pair.high().value(),
        score.total,
        score.tribal,
        score.color,
        score.keyword,
        score.archetype,
        score.combo,
        score.type_score,
        score.mana_curve,
        score.format,
        matches,
        ANALYSIS_VERSION,
        now(),
    ])?;
    Ok(())
}

fn read_edge(row: &Row<'_>) -> rusqlite::Result<SynergyEdge> {
    let low = CardId::from_value(row.get(0)?);
    let high = CardId::from_value(row.get(1)?);
    let pair = CardPair::new(low, high).ok_or_else(|| {
        conversion_error(1, StoreError::InvalidData(format!("self pair {}", low)))
    })?;

    let matches_json: String = row.get(11)?;
    let matches: Vec<String> =
        serde_json::from_str(&matches_json).map_err(|e| conversion_error(11, e))?;

    Ok(SynergyEdge {
        pair,
        score: SynergyScore {
            total: row.get(2)?,
            tribal: row.get(3)?,
            color: row.get(4)?,
            keyword: row.get(5)?,
            archetype: row.get(6)?,
            combo: row.get(7)?,
            type_score: row.get(8)?,
            mana_curve: row.get(9)?,
            format: row.get(10)?,
            matches,
        },
        analysis_version: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

impl SqliteStore {
    fn query_edges<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<SynergyEdge>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let edges = stmt
            .query_map(params, read_edge)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    /// Get the full stored edge for a pair
    pub fn get_edge(&self, x: CardId, y: CardId) -> Result<Option<SynergyEdge>, StoreError> {
        let Some(pair) = CardPair::new(x, y) else {
            return Ok(None);
        };
        let edge = self
            .conn
            .query_row(
                &format!("SELECT {} FROM synergy_edges WHERE card_low = ?1 AND card_high = ?2", EDGE_COLUMNS),
                params![pair.low().value(), pair.high().value()],
                read_edge,
            )
            .optional()?;
        Ok(edge)
    }
}

impl SynergyStore for SqliteStore {
    type Error = StoreError;

    fn put(&mut self, x: CardId, y: CardId, score: &SynergyScore) -> Result<(), Self::Error> {
        let pair = CardPair::new(x, y).ok_or(StoreError::SelfPair(x))?;
        write_edge(&self.conn, pair, score)
    }

    fn put_batch(&mut self, entries: &[(CardPair, SynergyScore)]) -> Result<usize, Self::Error> {
        let tx = self.conn.transaction()?;
        for (pair, score) in entries {
            write_edge(&tx, *pair, score)?;
        }
        tx.commit()?;
        Ok(entries.len())
    }

    fn get(&self, x: CardId, y: CardId) -> Result<Option<SynergyScore>, Self::Error> {
        Ok(self.get_edge(x, y)?.map(|edge| edge.score))
    }

    fn contains(&self, x: CardId, y: CardId) -> Result<bool, Self::Error> {
        let Some(pair) = CardPair::new(x, y) else {
            return Ok(false);
        };
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM synergy_edges WHERE card_low = ?1 AND card_high = ?2",
                params![pair.low().value(), pair.high().value()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn top_n(&self, limit: usize, min_score: f64) -> Result<Vec<SynergyEdge>, Self::Error> {
        self.query_edges(
            &format!(
                "SELECT {} FROM synergy_edges WHERE total_score >= ?1
                 ORDER BY total_score DESC, card_low, card_high LIMIT ?2",
                EDGE_COLUMNS
            ),
            params![min_score, limit_param(limit)],
        )
    }

    fn for_card(&self, id: CardId, min_score: f64, limit: usize) -> Result<Vec<SynergyEdge>, Self::Error> {
        self.query_edges(
            &format!(
                "SELECT {} FROM synergy_edges
                 WHERE (card_low = ?1 OR card_high = ?1) AND total_score >= ?2
                 ORDER BY total_score DESC, card_low, card_high LIMIT ?3",
                EDGE_COLUMNS
            ),
            params![id.value(), min_score, limit_param(limit)],
        )
    }

    fn filter_by_component(
        &self,
        field: ScoreField,
        min_score: f64,
        limit: usize,
    ) -> Result<Vec<SynergyEdge>, Self::Error> {
        let col = column(field);
        self.query_edges(
            &format!(
                "SELECT {} FROM synergy_edges WHERE {col} >= ?1
                 ORDER BY {col} DESC, total_score DESC, card_low, card_high LIMIT ?2",
                EDGE_COLUMNS
            ),
            params![min_score, limit_param(limit)],
        )
    }

    fn edges_at_least(&self, min_score: f64) -> Result<Vec<SynergyEdge>, Self::Error> {
        self.query_edges(
            &format!(
                "SELECT {} FROM synergy_edges WHERE total_score >= ?1 ORDER BY card_low, card_high",
                EDGE_COLUMNS
            ),
            params![min_score],
        )
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM synergy_edges", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn count_at_least(&self, field: ScoreField, min_score: f64) -> Result<usize, Self::Error> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM synergy_edges WHERE {} >= ?1", column(field)),
            params![min_score],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn clear(&mut self) -> Result<usize, Self::Error> {
        let removed = self.conn.execute("DELETE FROM synergy_edges", [])?;
        Ok(removed)
    }
}
