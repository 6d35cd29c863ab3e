use std::borrow::Cow;
use std::io::Write;

use crate::error::{ReportError, Result};

use super::Report;

/// Header line of the room-wall report.
pub const HEADER: &str =
    "Room Number,Room Name,Wall Id,Wall Length (ft),Wall Area (sqft),Wall Orientation";

/// Writes the report as comma-separated text, one line per row.
///
/// Lengths and areas are written with two decimals. Text fields that
/// contain a comma, a quote or a line break are quoted.
///
/// # Errors
///
/// Returns `ReportError::Io` if writing fails.
pub fn write_csv<W: Write>(report: &Report, mut out: W) -> Result<()> {
    writeln!(out, "{HEADER}").map_err(ReportError::from)?;
    for row in report.rows() {
        writeln!(
            out,
            "{},{},{},{:.2},{:.2},{}",
            escape(&row.room_number),
            escape(&row.room_name),
            row.wall,
            row.length,
            row.area,
            row.orientation
        )
        .map_err(ReportError::from)?;
    }
    out.flush().map_err(ReportError::from)?;
    Ok(())
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
