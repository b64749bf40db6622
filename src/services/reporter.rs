use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer};

use crate::domain::bid_record::BidRecord;

/// Pretty JSON with 4-space indentation, non-ASCII written as-is.
pub fn write_json<W: Write>(records: &[BidRecord], writer: W) -> serde_json::Result<()> {
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)
}

fn save(records: &[BidRecord], path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_json(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the records to `path`. Nothing is written for an empty list and a
/// failed write is only logged.
pub fn write_to_json(records: &[BidRecord], path: &Path) {
    if records.is_empty() {
        log::info!("No data to write to JSON file.");
        return;
    }

    log::info!("Writing data to {}", path.display());
    match save(records, path) {
        Ok(()) => log::info!("JSON file created successfully."),
        Err(e) => log::error!("Failed to write JSON file: {:#}", e),
    }
}

pub fn print_to<W: Write>(records: &[BidRecord], mut out: W) {
    if records.is_empty() {
        log::info!("No data to print to console.");
        return;
    }

    let printed = write_json(records, &mut out)
        .map_err(anyhow::Error::from)
        .and_then(|_| writeln!(out).map_err(anyhow::Error::from));
    match printed {
        Ok(()) => log::info!("Data printed to console."),
        Err(e) => log::error!("Failed to print data to console: {:#}", e),
    }
}

pub fn report(records: &[BidRecord], path: &Path) {
    write_to_json(records, path);
    print_to(records, std::io::stdout().lock());
}
