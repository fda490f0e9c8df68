//! Records to CSV text.

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use serde::Serialize;

use crate::error::{HivebookError, Result};

use super::CsvRow;

fn writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

/// Flush the writer and return its text without the final line break.
fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| HivebookError::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| HivebookError::Encoding(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Encode serializable records; the header comes from the field names of
/// the record type, in declaration order.
///
/// An empty slice encodes to the empty string.
pub fn encode<T: Serialize>(records: &[T]) -> Result<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut writer = writer();
    for record in records {
        writer.serialize(record)?;
    }
    finish(writer)
}

/// Encode header-keyed rows; the header is the key order of the first row.
///
/// Keys missing from later rows are written as empty fields.
pub fn encode_rows(rows: &[CsvRow]) -> Result<String> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = writer();
    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(
            headers
                .iter()
                .map(|h| row.get(*h).map(String::as_str).unwrap_or("")),
        )?;
    }
    finish(writer)
}
