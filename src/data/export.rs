use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::CarRecord;

// ---------------------------------------------------------------------------
// Export of the filtered view
// ---------------------------------------------------------------------------

/// Write `rows` to `path`, picking the format by extension (`.csv` or
/// `.json`). Returns the number of rows written.
pub fn export_file(path: &Path, rows: &[&CarRecord]) -> Result<usize> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if !matches!(ext.as_str(), "csv" | "json") {
        bail!("Unsupported export extension: .{ext}");
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let writer = BufWriter::new(file);
    if ext == "json" {
        write_json(writer, rows)?;
    } else {
        write_csv(writer, rows)?;
    }
    log::info!("Exported {} cars to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// CSV with the same header names the loader expects.
pub fn write_csv<W: Write>(writer: W, rows: &[&CarRecord]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for row in rows {
        out.serialize(row).context("writing CSV row")?;
    }
    out.flush().context("flushing CSV")?;
    Ok(())
}

/// Records-oriented JSON array.
pub fn write_json<W: Write>(mut writer: W, rows: &[&CarRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows).context("writing JSON")?;
    writer.flush().context("flushing JSON")?;
    Ok(())
}
