//! Manaweave Graph Analysis
//!
//! Read-only reports over the stored synergy graph: cards are vertices,
//! stored edges are weighted by their total score.
//!
//! # Reports
//!
//! | Report | Projection | Result |
//! |--------|-----------|--------|
//! | Clusters | total ≥ 15 | Greedy clique growth, groups of ≥ 3 |
//! | Hubs | total ≥ 5 | Cards with ≥ 10 incident edges |
//! | Deck cores | total ≥ 20 | Connected components of ≥ 3 cards |
//! | Anchors | total ≥ 20, top 200 | Cards recurring ≥ 3 times, top 20 |
//! | Status | all edges | Counts, score bands, completion |
//!
//! Every report only reads from the store. Traversals run over a
//! [`Projection`] whose vertices and neighbor lists are ordered by card id,
//! and use explicit stacks, so large dense components cannot exhaust the
//! call stack.
//!
//! ## Clustering is approximate
//!
//! A candidate cluster admits a neighbor only if it is adjacent to every
//! current member. Growth is greedy and depends on visitation order: the
//! clusters reported are cliques, but not necessarily maximum ones, and a
//! clique can be missed when an earlier candidate claims one of its cards.
//!
//! # Examples
//!
//! ```
//! use manaweave_domain::traits::SynergyStore;
//! use manaweave_domain::{CardId, SynergyScore};
//! use manaweave_graph::{CoreQuery, GraphAnalyzer};
//! use manaweave_store::SqliteStore;
//!
//! let mut store = SqliteStore::new(":memory:").unwrap();
//! let strong = SynergyScore { total: 25.0, ..Default::default() };
//! for (x, y) in [(1, 2), (2, 3), (3, 4)] {
//!     store.put(CardId::from_value(x), CardId::from_value(y), &strong).unwrap();
//! }
//!
//! let cores = GraphAnalyzer::new(&store).deck_cores(&CoreQuery::default()).unwrap();
//! assert_eq!(cores[0].size(), 4);
//! ```

#![warn(missing_docs)]

mod analyzer;
mod anchors;
mod clusters;
mod config;
mod cores;
mod error;
mod hubs;
mod projection;
mod status;

pub use analyzer::GraphAnalyzer;
pub use anchors::{Anchor, AnchorFocus, AnchorQuery};
pub use clusters::{Cluster, ClusterQuery};
pub use config::GraphConfig;
pub use cores::{CoreQuery, DeckCore};
pub use error::{GraphError, Result};
pub use hubs::{Hub, HubQuery};
pub use projection::Projection;
pub use status::{ComponentCounts, GraphStatus, ScoreDistribution};
