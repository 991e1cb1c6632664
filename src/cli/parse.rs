//! `capsule parse`: parse a manifest file without an archive.

use std::path::Path;

use console::style;

use capsule::parse_manifest;

use super::output::print_errors;

pub async fn cmd_parse(manifest: &Path, json: bool) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(manifest)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", manifest.display(), e))?;
    let parsed = parse_manifest(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("\n{}", style("Items:").cyan());
        for item in &parsed.items {
            println!(
                "  {:<32} {:<10} {:<12} {} tags",
                item.filename,
                item.item_type,
                item.date,
                item.tags.len()
            );
        }
        if parsed.items.is_empty() {
            println!("  {}", style("none").dim());
        }

        if !parsed.is_valid() {
            print_errors(&parsed.errors);
        }
    }

    if !parsed.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}
