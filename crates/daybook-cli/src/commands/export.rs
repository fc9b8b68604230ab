//! Export command handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use daybook_core::{export_filename, Config, EntryStore, Exporter};

use crate::output::Output;

/// Render an entry as PDF and write it into the output directory
pub fn export(
    store: &EntryStore,
    config: &Config,
    id: i64,
    out_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    // Re-fetch immediately before rendering so a concurrently deleted
    // entry fails with not-found instead of exporting stale data
    let entry = store.get(id)?;

    let exporter = Exporter::new(config)?;
    let bytes = exporter.render(&entry).context("Failed to render PDF")?;

    let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(export_filename(entry.id, Utc::now()));
    std::fs::write(&path, &bytes).with_context(|| format!("Failed to write {:?}", path))?;

    output.success(&format!("Exported entry {} to {}", id, path.display()));
    if output.is_quiet() {
        println!("{}", path.display());
    }

    Ok(())
}
