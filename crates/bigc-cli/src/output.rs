//! JSON snapshot sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use bigc_core::CatalogSnapshot;

/// Writes the snapshot's records as a JSON array with four-space
/// indentation. Non-ASCII text is written as UTF-8, not escaped.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_snapshot(path: &Path, snapshot: &CatalogSnapshot) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create snapshot file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    snapshot
        .records
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize snapshot to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write snapshot file {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        records = snapshot.len(),
        cancelled = snapshot.cancelled,
        "snapshot written"
    );
    Ok(())
}
