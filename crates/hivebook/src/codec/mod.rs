//! CSV encoding and decoding.
//!
//! Encoding writes a header row taken from the first record followed by one
//! line per record, quoting only fields that contain a comma, a quote or a
//! line break. Decoding reverses it into header-keyed rows:
//!
//! ```
//! use hivebook::codec::{decode, encode_rows, CsvRow};
//!
//! let mut row = CsvRow::new();
//! row.insert("name".to_string(), "Clover, north field".to_string());
//! row.insert("numHives".to_string(), "2".to_string());
//!
//! let text = encode_rows(&[row.clone()]).unwrap();
//! assert_eq!(text, "name,numHives\n\"Clover, north field\",2");
//! assert_eq!(decode(&text).unwrap(), vec![row]);
//! ```

mod decode;
mod encode;

use indexmap::IndexMap;

pub use decode::{decode, decode_with, DecodeOptions};
pub use encode::{encode, encode_rows};

/// A decoded CSV row: header to field value, in header order.
pub type CsvRow = IndexMap<String, String>;
