//! CSV export for the history log and per-tick summaries.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::monitor::history::HistoryEntry;
use crate::monitor::types::TickReport;

/// Column header for history export.
const HISTORY_HEADER: &str = "time,total_current_a,total_power_w";

/// Column header for per-tick summary export.
const TICK_HEADER: &str = "tick,time,total_current_a,power_w,energy_kwh,cost,\
                           house_status,alerts,recommendations";

/// Exports history entries to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_history_csv<'a>(
    entries: impl IntoIterator<Item = &'a HistoryEntry>,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    write_history_csv(entries, io::BufWriter::new(file))
}

/// Writes history entries as CSV to any writer, oldest first.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_history_csv<'a>(
    entries: impl IntoIterator<Item = &'a HistoryEntry>,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HISTORY_HEADER.split(','))?;

    for e in entries {
        wtr.write_record(&[
            e.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            format!("{:.4}", e.total_current_a),
            format!("{:.2}", e.total_power_w),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports per-tick summaries to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_ticks_csv(reports: &[TickReport], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_ticks_csv(reports, io::BufWriter::new(file))
}

/// Writes one summary row per tick. Alerts and recommendations are joined
/// with `"; "` into single columns.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_ticks_csv(reports: &[TickReport], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(TICK_HEADER.split(',').map(str::trim))?;

    for r in reports {
        wtr.write_record(&[
            r.tick.to_string(),
            r.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            format!("{:.4}", r.summary.total_current_a),
            format!("{:.2}", r.summary.power_w),
            format!("{:.6}", r.summary.energy_kwh),
            format!("{:.6}", r.summary.cost),
            r.house_status.to_string(),
            r.alert_messages().join("; "),
            r.recommendation_messages().join("; "),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
