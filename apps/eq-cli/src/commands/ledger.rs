// ledger.rs - Export and import of whole ledgers.

use std::path::Path;

use crate::config::QuestConfig;

/// Write the working ledger to `file`.
pub fn save(config: &QuestConfig, file: &Path) -> anyhow::Result<()> {
    let ledger = config.open_ledger()?;
    ledger.save(file)?;
    println!("Goals saved successfully.");
    Ok(())
}

/// Make `file` the working ledger. The working ledger is untouched if
/// `file` cannot be loaded.
pub fn load(config: &QuestConfig, file: &Path) -> anyhow::Result<()> {
    let mut ledger = config.new_ledger();
    ledger.load(file)?;
    ledger.save(&config.ledger_file)?;
    println!("Goals loaded successfully.");
    println!("Total Points: {}", ledger.total_points());
    Ok(())
}
