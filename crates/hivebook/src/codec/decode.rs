//! CSV text to header-keyed rows.

use csv::{ReaderBuilder, Terminator};

use crate::error::{HivebookError, Result};

use super::CsvRow;

/// Decoder configuration.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Reject input whose quoted field never closes. When off, the open
    /// field runs to end of input.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Decode with lenient quote handling.
pub fn decode(text: &str) -> Result<Vec<CsvRow>> {
    decode_with(text, &DecodeOptions::default())
}

/// Decode CSV text into rows keyed by the (trimmed) header names.
///
/// A leading byte-order mark is dropped. Rows whose fields are all blank
/// are skipped. Short rows are padded with empty values; extra fields are
/// ignored.
///
/// Quoting is read the same way in both modes: a `"` anywhere outside a
/// quoted run opens one, `""` inside a run is a literal quote, and a
/// carriage return outside a run is dropped. Only `\n` ends a row.
pub fn decode_with(text: &str, options: &DecodeOptions) -> Result<Vec<CsvRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let canonical = canonicalize(text, options.strict)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(canonical.as_bytes());
    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|h| h.trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let row: CsvRow = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Rewrite `text` with every field quoted, so the reader sees plain
/// RFC 4180 records.
///
/// In strict mode a quoted run still open at end of input fails with the
/// row and column of its opening quote.
fn canonicalize(text: &str, strict: bool) -> Result<String> {
    let mut out = String::with_capacity(text.len() + text.len() / 4 + 2);
    let mut field = String::new();
    let mut record_open = false;
    let mut in_quotes = false;
    let mut opened_at = (0, 0);
    let (mut row, mut column) = (1, 0);
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        column += 1;
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    column += 1;
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    field.push(ch);
                    row += 1;
                    column = 0;
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                opened_at = (row, column);
            }
            ',' => {
                push_field(&mut out, &mut field);
                out.push(',');
                record_open = true;
            }
            '\n' => {
                push_field(&mut out, &mut field);
                out.push('\n');
                record_open = false;
                row += 1;
                column = 0;
            }
            '\r' => {}
            _ => field.push(ch),
        }
    }

    if in_quotes && strict {
        return Err(HivebookError::Parse {
            row: opened_at.0,
            column: opened_at.1,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || record_open {
        push_field(&mut out, &mut field);
        out.push('\n');
    }
    Ok(out)
}

/// Append `field` quoted, doubling inner quotes, and clear it.
fn push_field(out: &mut String, field: &mut String) {
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
    field.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let rows = decode("title,due\nInspect,2025-09-01\nFeed,2025-09-02").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], "Inspect");
        assert_eq!(rows[1]["due"], "2025-09-02");
    }

    #[test]
    fn test_decode_quoted_fields() {
        let text = "a,b\n1,\"x,y\"\n2,\"say \"\"hi\"\"\"\n3,\"two\nlines\"";
        let rows = decode(text).unwrap();

        assert_eq!(rows[0]["b"], "x,y");
        assert_eq!(rows[1]["b"], "say \"hi\"");
        assert_eq!(rows[2]["b"], "two\nlines");
    }

    #[test]
    fn test_decode_strips_bom_and_carriage_returns() {
        let rows = decode("\u{feff}name,numHives\r\nSunflower-1,5\r\n").unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["name", "numHives"]);
        assert_eq!(rows[0]["numHives"], "5");
    }

    #[test]
    fn test_decode_trims_headers_not_values() {
        let rows = decode(" name , notes\nA-1,  spaced  ").unwrap();
        assert_eq!(rows[0]["name"], "A-1");
        assert_eq!(rows[0]["notes"], "  spaced  ");
    }

    #[test]
    fn test_decode_skips_blank_rows() {
        let rows = decode("a,b\n1,2\n,\n   ,  \n\n3,4\n").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["a"], "3");
    }

    #[test]
    fn test_decode_pads_short_rows() {
        let rows = decode("a,b,c\n1").unwrap();
        assert_eq!(rows[0]["b"], "");
        assert_eq!(rows[0]["c"], "");
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("only,headers").unwrap().is_empty());
    }

    #[test]
    fn test_unbalanced_quotes_lenient() {
        let rows = decode("a,b\n1,\"open\n2,3").unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0]["b"].starts_with("open"));
    }

    #[test]
    fn test_unbalanced_quotes_strict() {
        let err = decode_with("a,b\n1,\"open\n2,3", &DecodeOptions::strict()).unwrap_err();

        match err {
            HivebookError::Parse { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, 3);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_accepts_escaped_quotes() {
        let rows = decode_with("a\n\"x \"\"y\"\"\"", &DecodeOptions::strict()).unwrap();
        assert_eq!(rows[0]["a"], "x \"y\"");
    }

    #[test]
    fn test_lone_carriage_return_is_dropped() {
        let rows = decode("name,notes\nHea\rther,x\n").unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Heather");
        assert_eq!(rows[0]["notes"], "x");
    }

    #[test]
    fn test_carriage_return_only_file_is_one_line() {
        let rows = decode("name,numHives\rSunflower-1,6\r").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_carriage_return_kept_inside_quotes() {
        let rows = decode("a,b\n\"x\ry\",2\n").unwrap();
        assert_eq!(rows[0]["a"], "x\ry");
        assert_eq!(rows[0]["b"], "2");
    }

    #[test]
    fn test_mid_field_quote_opens_quoted_run() {
        let rows = decode("name,notes\nab\"c,d\"e,f\n").unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "abc,de");
        assert_eq!(rows[0]["notes"], "f");
    }

    #[test]
    fn test_strict_and_lenient_read_quotes_alike() {
        let text = "notes\n5\" frame";
        match decode_with(text, &DecodeOptions::strict()).unwrap_err() {
            HivebookError::Parse { row, column, .. } => assert_eq!((row, column), (2, 2)),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert_eq!(decode(text).unwrap()[0]["notes"], "5 frame");

        let balanced = "name,notes\nab\"c,d\"e,f\n\"x\ry\",\"\"\"q\"\"\"\r\n";
        assert_eq!(
            decode_with(balanced, &DecodeOptions::strict()).unwrap(),
            decode(balanced).unwrap()
        );
    }
}
