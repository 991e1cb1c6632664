//! `capsule locate`: resolve an item's explanation file.

use std::path::Path;

use console::style;

use capsule::explanation::locate_explanation_with_tier;
use capsule::open_storage;

pub async fn cmd_locate(path: &Path, filename: &str) -> anyhow::Result<()> {
    let storage = open_storage(path)?;
    let listing = storage.list_files().await?;

    match locate_explanation_with_tier(filename, &listing) {
        Some((found, tier)) => {
            println!("{} {} ({:?} match)", style("✓").green(), found, tier);
            Ok(())
        }
        None => {
            println!(
                "{} No explanation file for {}",
                style("✗").red(),
                filename
            );
            std::process::exit(1);
        }
    }
}
