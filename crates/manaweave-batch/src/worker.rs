//! Async wrapper that runs a batch off the runtime and handles Ctrl+C

use crate::{AnalyzedCard, BatchError, BatchStats, CancellationFlag, SynergyComputer};
use manaweave_domain::traits::SynergyStore;
use std::fmt::Display;

/// Runs a [`SynergyComputer`] on the blocking thread pool
///
/// A Ctrl+C received while the batch runs flips the cancellation flag;
/// the computer commits its pending batch and returns with `cancelled`
/// set, so a later run resumes from the stored edges.
///
/// # Examples
///
/// ```no_run
/// use manaweave_batch::{BatchWorker, SynergyComputer};
/// use manaweave_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SqliteStore::new("manaweave.db")?;
///     let worker = BatchWorker::new(SynergyComputer::default_config());
///
///     let (_store, stats) = worker.run(store, Vec::new()).await?;
///     println!("{}", stats.summary());
///     Ok(())
/// }
/// ```
pub struct BatchWorker {
    computer: SynergyComputer,
    cancel: CancellationFlag,
}

impl BatchWorker {
    /// Create a worker around a configured computer
    pub fn new(computer: SynergyComputer) -> Self {
        Self {
            computer,
            cancel: CancellationFlag::new(),
        }
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::new(SynergyComputer::default_config())
    }

    /// Flag shared with the running computation
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Run the batch until it finishes or a shutdown signal arrives
    ///
    /// The store is moved into the blocking task and handed back with the
    /// statistics.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Commit`] if a batch fails to commit, or
    /// [`BatchError::Worker`] if the blocking task panics.
    pub async fn run<S>(&self, store: S, cards: Vec<AnalyzedCard>) -> Result<(S, BatchStats), BatchError>
    where
        S: SynergyStore + Send + 'static,
        S::Error: Display,
    {
        let computer = self.computer.clone();
        let cancel = self.cancel.clone();

        tracing::info!("Batch worker started ({} cards)", cards.len());

        let mut handle = tokio::task::spawn_blocking(move || {
            let mut store = store;
            let result = computer.run(&cards, &mut store, &cancel, |stats| {
                tracing::info!(
                    "Progress: {}/{} pairs, {} stored",
                    stats.processed,
                    stats.total_pairs,
                    stats.stored
                );
            });
            (store, result)
        });

        let joined = tokio::select! {
            joined = &mut handle => joined,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received, committing pending batch");
                self.cancel.cancel();
                handle.await
            }
        };

        let (store, result) = joined.map_err(|e| BatchError::Worker(e.to_string()))?;
        let stats = result?;
        tracing::info!("Batch worker stopped. Final stats:\n{}", stats.summary());

        Ok((store, stats))
    }
}
