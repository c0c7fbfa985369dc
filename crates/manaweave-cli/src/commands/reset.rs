//! Reset command implementation.

use crate::cli::ResetArgs;
use crate::error::Result;
use crate::output::Formatter;
use manaweave_domain::traits::SynergyStore;
use manaweave_store::SqliteStore;
use std::io::{self, Write};

/// Execute the reset command.
///
/// Removes stored synergies only; cards and their features are kept.
pub async fn execute_reset(
    args: ResetArgs,
    store: &mut SqliteStore,
    formatter: &Formatter,
) -> Result<()> {
    let count = store.count()?;
    if count == 0 {
        println!("{}", formatter.info("No stored synergies"));
        return Ok(());
    }

    // Confirm deletion unless --yes is specified
    if !args.yes {
        print!("About to delete {} stored synergies. Continue? [y/N] ", count);
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let removed = store.clear()?;
    println!("{}", formatter.success(&format!("Removed {} synergies", removed)));
    Ok(())
}
