//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use manaweave_batch::BatchStats;
use manaweave_domain::{CardId, CardRecord, ScoreField, SynergyEdge, SynergyScore};
use manaweave_graph::{Anchor, Cluster, DeckCore, GraphStatus, Hub};
use manaweave_scorer::RankedCandidate;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Card names by id, for labelling report rows.
pub type CardNames = BTreeMap<CardId, String>;

/// Display label for a card: its name, or `#id` when unknown.
pub fn label(names: &CardNames, id: CardId) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("#{}", id))
}

fn labels(names: &CardNames, ids: &[CardId]) -> String {
    ids.iter()
        .map(|id| label(names, *id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn ids_line(ids: &[CardId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Nonzero components of a score, largest first, as `name=value`.
fn component_summary(score: &SynergyScore) -> String {
    let mut parts: Vec<(ScoreField, f64)> = ScoreField::COMPONENTS
        .iter()
        .map(|f| (*f, score.get(*f)))
        .filter(|(_, v)| *v > 0.0)
        .collect();
    parts.sort_by(|a, b| b.1.total_cmp(&a.1));
    parts
        .iter()
        .map(|(f, v)| format!("{}={:.1}", f.as_str(), v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format stored synergy edges.
    pub fn format_edges(&self, edges: &[SynergyEdge], names: &CardNames) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = edges
                    .iter()
                    .map(|e| {
                        json!({
                            "card_a": { "id": e.pair.low(), "name": names.get(&e.pair.low()) },
                            "card_b": { "id": e.pair.high(), "name": names.get(&e.pair.high()) },
                            "score": e.score,
                            "analysis_version": e.analysis_version,
                            "updated_at": e.updated_at,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(edges
                .iter()
                .map(|e| format!("{} {} {:.2}", e.pair.low(), e.pair.high(), e.total()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if edges.is_empty() {
                    return Ok(self.colorize("No synergies found.", "yellow"));
                }
                let rows = edges
                    .iter()
                    .map(|e| {
                        vec![
                            label(names, e.pair.low()),
                            label(names, e.pair.high()),
                            format!("{:.2}", e.total()),
                            component_summary(&e.score),
                        ]
                    })
                    .collect();
                Ok(table(&["Card A", "Card B", "Total", "Components"], rows))
            }
        }
    }

    /// Format a freshly computed score with its explanations.
    pub fn format_score(
        &self,
        first: &CardRecord,
        second: &CardRecord,
        score: &SynergyScore,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "card_a": { "id": first.id, "name": first.name },
                "card_b": { "id": second.id, "name": second.name },
                "score": score,
            }))?),
            OutputFormat::Quiet => Ok(format!("{:.2}", score.total)),
            OutputFormat::Table => {
                let mut rows: Vec<Vec<String>> = ScoreField::COMPONENTS
                    .iter()
                    .map(|f| vec![f.as_str().to_string(), format!("{:.2}", score.get(*f))])
                    .collect();
                rows.push(vec!["total".to_string(), format!("{:.2}", score.total)]);

                let mut out = format!(
                    "{} + {}\n{}",
                    first.name,
                    second.name,
                    table(&["Component", "Score"], rows)
                );
                if !score.matches.is_empty() {
                    out.push_str("\nMatches:");
                    for m in &score.matches {
                        out.push_str(&format!("\n  - {}", m));
                    }
                }
                Ok(out)
            }
        }
    }

    /// Format card records.
    pub fn format_cards(&self, cards: &[CardRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(cards)?),
            OutputFormat::Quiet => Ok(ids_line(&cards.iter().map(|c| c.id).collect::<Vec<_>>())),
            OutputFormat::Table => {
                if cards.is_empty() {
                    return Ok(self.colorize("No cards found.", "yellow"));
                }
                let rows = cards
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.metadata.type_line.clone().unwrap_or_default(),
                            c.metadata.mana_cost.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                Ok(table(&["ID", "Name", "Type", "Cost"], rows))
            }
        }
    }

    /// Format candidates ranked against one card.
    pub fn format_candidates(
        &self,
        candidates: &[RankedCandidate],
        names: &CardNames,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = candidates
                    .iter()
                    .map(|c| json!({ "id": c.id, "name": names.get(&c.id), "score": c.score }))
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(ids_line(&candidates.iter().map(|c| c.id).collect::<Vec<_>>())),
            OutputFormat::Table => {
                if candidates.is_empty() {
                    return Ok(self.colorize("No candidates found.", "yellow"));
                }
                let rows = candidates
                    .iter()
                    .map(|c| {
                        vec![
                            label(names, c.id),
                            format!("{:.2}", c.score.total),
                            component_summary(&c.score),
                        ]
                    })
                    .collect();
                Ok(table(&["Card", "Total", "Components"], rows))
            }
        }
    }

    /// Format graph neighbors as `(card, edge total)`.
    pub fn format_neighbors(&self, neighbors: &[(CardId, f64)], names: &CardNames) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = neighbors
                    .iter()
                    .map(|(id, total)| json!({ "id": id, "name": names.get(id), "total": total }))
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(ids_line(&neighbors.iter().map(|(id, _)| *id).collect::<Vec<_>>())),
            OutputFormat::Table => {
                if neighbors.is_empty() {
                    return Ok(self.colorize("No neighbors found.", "yellow"));
                }
                let rows = neighbors
                    .iter()
                    .map(|(id, total)| vec![label(names, *id), format!("{:.2}", total)])
                    .collect();
                Ok(table(&["Card", "Total"], rows))
            }
        }
    }

    /// Format synergy clusters.
    pub fn format_clusters(&self, clusters: &[Cluster], names: &CardNames) -> Result<String> {
        self.format_groups(
            clusters,
            clusters
                .iter()
                .map(|c| (&c.members[..], c.average_score, c.internal_edges))
                .collect(),
            "No clusters found.",
            names,
        )
    }

    /// Format deck cores.
    pub fn format_cores(&self, cores: &[DeckCore], names: &CardNames) -> Result<String> {
        self.format_groups(
            cores,
            cores
                .iter()
                .map(|c| (&c.members[..], c.average_score, c.internal_edges))
                .collect(),
            "No deck cores found.",
            names,
        )
    }

    fn format_groups<T: Serialize>(
        &self,
        reports: &[T],
        groups: Vec<(&[CardId], f64, usize)>,
        empty: &str,
        names: &CardNames,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
            OutputFormat::Quiet => Ok(groups
                .iter()
                .map(|(members, _, _)| ids_line(members))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if groups.is_empty() {
                    return Ok(self.colorize(empty, "yellow"));
                }
                let rows = groups
                    .iter()
                    .enumerate()
                    .map(|(i, (members, average, edges))| {
                        vec![
                            (i + 1).to_string(),
                            members.len().to_string(),
                            format!("{:.2}", average),
                            edges.to_string(),
                            labels(names, members),
                        ]
                    })
                    .collect();
                Ok(table(&["#", "Size", "Average", "Edges", "Cards"], rows))
            }
        }
    }

    /// Format synergy hubs.
    pub fn format_hubs(&self, hubs: &[Hub], names: &CardNames) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(hubs)?),
            OutputFormat::Quiet => Ok(ids_line(&hubs.iter().map(|h| h.id).collect::<Vec<_>>())),
            OutputFormat::Table => {
                if hubs.is_empty() {
                    return Ok(self.colorize("No hubs found.", "yellow"));
                }
                let rows = hubs
                    .iter()
                    .map(|h| {
                        vec![
                            label(names, h.id),
                            h.edge_count.to_string(),
                            format!("{:.2}", h.average_score),
                            format!("{:.2}", h.max_score),
                            h.tribal_edges.to_string(),
                            h.combo_edges.to_string(),
                        ]
                    })
                    .collect();
                Ok(table(&["Card", "Edges", "Average", "Max", "Tribal", "Combo"], rows))
            }
        }
    }

    /// Format strategy anchors.
    pub fn format_anchors(&self, anchors: &[Anchor], names: &CardNames) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(anchors)?),
            OutputFormat::Quiet => Ok(ids_line(&anchors.iter().map(|a| a.id).collect::<Vec<_>>())),
            OutputFormat::Table => {
                if anchors.is_empty() {
                    return Ok(self.colorize("No anchors found.", "yellow"));
                }
                let rows = anchors
                    .iter()
                    .map(|a| {
                        vec![
                            label(names, a.id),
                            a.appearances.to_string(),
                            format!("{:.2}", a.average_score),
                            format!("{:.2}", a.total_score),
                        ]
                    })
                    .collect();
                Ok(table(&["Card", "Appearances", "Average", "Total"], rows))
            }
        }
    }

    /// Format collection and graph statistics.
    pub fn format_status(&self, status: &GraphStatus, names: &CardNames) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(status)?),
            OutputFormat::Quiet => Ok(format!(
                "{} {} {}",
                status.analyzed_cards, status.total_edges, status.expected_pairs
            )),
            OutputFormat::Table => {
                let d = &status.distribution;
                let c = &status.components;
                let mut rows = vec![
                    vec!["Cards".to_string(), status.total_cards.to_string()],
                    vec!["Analyzed cards".to_string(), status.analyzed_cards.to_string()],
                    vec!["Stored synergies".to_string(), status.total_edges.to_string()],
                    vec!["Possible pairs".to_string(), status.expected_pairs.to_string()],
                    vec!["Completion".to_string(), format!("{:.1}%", status.completion_rate)],
                    vec!["High (≥ 30)".to_string(), d.high.to_string()],
                    vec!["Good (15-30)".to_string(), d.good.to_string()],
                    vec!["Moderate (5-15)".to_string(), d.moderate.to_string()],
                    vec!["Low (< 5)".to_string(), d.low.to_string()],
                    vec!["Strong tribal".to_string(), c.tribal.to_string()],
                    vec!["Strong combo".to_string(), c.combo.to_string()],
                    vec!["Strong archetype".to_string(), c.archetype.to_string()],
                    vec!["Keyword".to_string(), c.keyword.to_string()],
                    vec!["Type".to_string(), c.type_score.to_string()],
                ];
                if let Some(top) = &status.top_edge {
                    rows.push(vec![
                        "Top synergy".to_string(),
                        format!(
                            "{} + {} ({:.2})",
                            label(names, top.pair.low()),
                            label(names, top.pair.high()),
                            top.total()
                        ),
                    ]);
                }
                Ok(table(&["Metric", "Value"], rows))
            }
        }
    }

    /// Format the outcome of a batch computation.
    pub fn format_batch_stats(&self, stats: &BatchStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Quiet => Ok(stats.stored.to_string()),
            OutputFormat::Table => Ok(stats.summary()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn table(header: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(header.iter().copied());
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
