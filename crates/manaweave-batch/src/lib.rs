//! Manaweave Batch Computation
//!
//! Scores every unordered pair of an analyzed card set and persists the
//! results through a [`SynergyStore`](manaweave_domain::traits::SynergyStore).
//!
//! # Overview
//!
//! A batch run is responsible for:
//! - **Idempotence**: pairs with a stored edge are skipped unless
//!   `recompute` is set, so re-running over an unchanged card set stores
//!   nothing new
//! - **Sparsity**: scores below `min_score` are counted but not stored
//! - **Bounded loss**: pairs are scored and committed in batches, each
//!   batch one atomic `put_batch`; a failure rolls back that batch only
//! - **Cancellation**: a shared flag is checked before every pair and the
//!   pending batch is committed before returning
//!
//! Pairs within a batch are scored on the rayon thread pool; writes stay
//! serialized through the single store handle.
//!
//! # Usage
//!
//! ## One-shot Run
//!
//! ```no_run
//! use manaweave_batch::{AnalyzedCard, CancellationFlag, SynergyComputer};
//! use manaweave_domain::traits::CardCatalog;
//! use manaweave_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("manaweave.db")?;
//! let cards: Vec<AnalyzedCard> = store
//!     .analyzed_cards()?
//!     .into_iter()
//!     .map(AnalyzedCard::from)
//!     .collect();
//!
//! let computer = SynergyComputer::default_config();
//! let stats = computer.run(&cards, &mut store, &CancellationFlag::new(), |_| {})?;
//! println!("{}", stats.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! [`BatchWorker`] runs the same computation on tokio's blocking pool and
//! turns Ctrl+C into a cancellation.
//!
//! # Configuration
//!
//! ```toml
//! [batch]
//! batch_size = 1000
//! min_score = 1.0
//! recompute = false
//! parallel = true
//! progress_every_batches = 1
//! ```

#![warn(missing_docs)]

mod cancel;
mod computer;
mod config;
mod error;
mod stats;
mod worker;

pub use cancel::CancellationFlag;
pub use computer::{AnalyzedCard, SynergyComputer};
pub use config::BatchConfig;
pub use error::BatchError;
pub use stats::BatchStats;
pub use worker::BatchWorker;
