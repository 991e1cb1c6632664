//! `capsule check`: inspect a whole capsule.

use std::path::Path;
use std::sync::Arc;

use capsule::metadata::PdfInfoExtractor;
use capsule::{open_storage, CapsuleInspector, Config, TracingObserver};

use super::output::{print_errors, print_report};

pub async fn cmd_check(
    config: Config,
    path: &Path,
    metadata: bool,
    json: bool,
) -> anyhow::Result<()> {
    let storage = open_storage(path)?;
    let mut inspector = CapsuleInspector::new(storage)
        .with_observer(Arc::new(TracingObserver))
        .with_config(config);
    if metadata {
        inspector = inspector.with_metadata(Box::new(PdfInfoExtractor::new()));
    }

    let inspection = inspector.inspect().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        println!("Capsule:  {}", path.display());
        println!("Manifest: {}", inspection.manifest_filename);
        println!("Items:    {}", inspection.items.len());

        if !inspection.errors.is_empty() {
            print_errors(&inspection.errors);
        }
        if let Some(ref report) = inspection.report {
            print_report(report);
        }
    }

    if !inspection.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}
