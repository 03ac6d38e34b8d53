//! Report serialization.
//!
//! The text format has two comma-separated sections separated by one blank
//! line, each with a title and a header row. Rows follow the report's own
//! order. JSON output mirrors the `Report` structure.

mod layout;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::Report;

use layout::{
    FIELD_SEPARATOR, PORT_PROTOCOL_HEADER, PORT_PROTOCOL_SECTION_TITLE, TAG_HEADER,
    TAG_SECTION_TITLE,
};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the text report to `sink`.
pub fn write_report<W: Write>(sink: &mut W, report: &Report) -> io::Result<()> {
    writeln!(sink, "{TAG_SECTION_TITLE}")?;
    writeln!(sink, "{TAG_HEADER}")?;
    for entry in &report.tag_counts {
        writeln!(sink, "{}{FIELD_SEPARATOR}{}", entry.tag, entry.count)?;
    }
    writeln!(sink)?;

    writeln!(sink, "{PORT_PROTOCOL_SECTION_TITLE}")?;
    writeln!(sink, "{PORT_PROTOCOL_HEADER}")?;
    for entry in &report.port_protocol_counts {
        writeln!(
            sink,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            entry.port, entry.protocol, entry.count
        )?;
    }
    Ok(())
}

/// Render the text report into a string.
///
/// # Examples
/// ```
/// use flowtag_core::{Report, render_report};
///
/// let text = render_report(&Report::default());
/// assert_eq!(
///     text,
///     "Tag Counts:\nTag,Count\n\nPort/Protocol Combination Counts:\nPort,Protocol,Count\n"
/// );
/// ```
pub fn render_report(report: &Report) -> String {
    let mut buf = Vec::new();
    write_report(&mut buf, report).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the text report to `path`, replacing any existing file.
pub fn write_report_file(path: &Path, report: &Report) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

/// Write the report as JSON to `path`, replacing any existing file.
pub fn write_report_json_file(
    path: &Path,
    report: &Report,
    pretty: bool,
) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_report_json(&mut writer, report, pretty)?;
    writer.flush()?;
    Ok(())
}

/// Write the report as JSON to `sink`.
pub fn write_report_json<W: Write>(
    sink: &mut W,
    report: &Report,
    pretty: bool,
) -> Result<(), ReportError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *sink, report)?;
    } else {
        serde_json::to_writer(&mut *sink, report)?;
    }
    writeln!(sink)?;
    Ok(())
}
