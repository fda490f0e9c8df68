//! Total normalization of untrusted records into canonical entities.
//!
//! Every function here accepts whatever arrived (JSON values, decoded CSV
//! rows) and always produces a usable record. Absent or invalid fields are
//! replaced with defaults; nothing in this module returns an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::codec::CsvRow;
use crate::model::{today, Apiary, Inventory, Priority, QueenStatus, Strength, Task, TaskStatus};

/// Leading integer, as read by a lenient number parser.
static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?)([0-9]+)").unwrap());

/// Alphabet for random id suffixes.
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Parse the leading integer of `text`.
///
/// Returns 0 when there is no leading integer or it is negative. Values
/// beyond `u32::MAX` saturate.
pub fn parse_count(text: &str) -> u32 {
    let Some(caps) = LEADING_INT.captures(text) else {
        return 0;
    };
    let digits = caps[2].trim_start_matches('0');
    if digits.is_empty() {
        return 0;
    }
    if &caps[1] == "-" {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Read a non-negative count from any JSON value.
pub fn to_int(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).unwrap_or(u32::MAX)
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f >= 0.0 {
                    f.trunc().min(f64::from(u32::MAX)) as u32
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => parse_count(s),
        _ => 0,
    }
}

/// Stringify a JSON value; null becomes the empty string.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse an ISO calendar date, tolerating a trailing time component.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let day = text.split('T').next().unwrap_or(text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// A new id of the form `<prefix>-xxxxx` with a random base-36 suffix.
pub fn random_id(prefix: &str) -> String {
    let suffix: String = (0..5)
        .map(|_| BASE36[fastrand::usize(..BASE36.len())] as char)
        .collect();
    format!("{}-{}", prefix, suffix)
}

/// Field lookup over a loosely typed record.
///
/// Keys are matched exactly first, then case-insensitively, so CSV headers
/// such as `NumHives` still reach `numHives`.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawRecord<'a> {
    /// Wrap a JSON value; non-objects behave as an empty record.
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        let fields = self.fields?;
        fields.get(key).or_else(|| {
            fields
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    /// Text of a field; absent and null read as empty.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(to_text).unwrap_or_default()
    }

    /// Count of a field; absent or invalid reads as zero.
    pub fn count(&self, key: &str) -> u32 {
        self.get(key).map(to_int).unwrap_or(0)
    }

    /// Date of a field; absent or invalid reads as today.
    pub fn date(&self, key: &str) -> NaiveDate {
        parse_date(&self.text(key)).unwrap_or_else(today)
    }

    /// The id the record carries, if it carries a non-empty one.
    pub fn supplied_id(&self) -> Option<String> {
        let id = self.text("id");
        if id.is_empty() { None } else { Some(id) }
    }
}

/// Lift a decoded CSV row into a JSON object of strings.
pub fn row_to_value(row: &CsvRow) -> Value {
    Value::Object(
        row.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

impl Apiary {
    /// Normalize an untrusted record into an apiary.
    pub fn coerce(raw: &Value) -> Self {
        let raw = RawRecord::new(raw);
        Self {
            id: raw.supplied_id().unwrap_or_else(|| random_id("A")),
            name: raw.text("name"),
            queen_status: QueenStatus::from_label(&raw.text("queenStatus")).unwrap_or_default(),
            strength: Strength::from_label(&raw.text("strength")).unwrap_or_default(),
            num_hives: raw.count("numHives"),
            single_hives: raw.count("singleHives"),
            double_hives: raw.count("doubleHives"),
            queenless_hives: raw.count("queenlessHives"),
            nucs: raw.count("nucs"),
            notes: raw.text("notes"),
            last_inspection: raw.date("lastInspection"),
        }
    }
}

impl Task {
    /// Normalize an untrusted record into a task.
    pub fn coerce(raw: &Value) -> Self {
        let raw = RawRecord::new(raw);
        Self {
            id: raw.supplied_id().unwrap_or_else(|| random_id("T")),
            title: raw.text("title"),
            hive_id: raw.text("hiveId"),
            due: raw.date("due"),
            status: TaskStatus::from_label(&raw.text("status")),
            priority: Priority::from_label(&raw.text("priority")),
        }
    }
}

impl Inventory {
    /// Normalize an untrusted record into inventory counters.
    pub fn coerce(raw: &Value) -> Self {
        let raw = RawRecord::new(raw);
        Self {
            supers: raw.count("supers"),
            boxes: raw.count("boxes"),
            feeders: raw.count("feeders"),
            syrup_l: raw.count("syrupL"),
        }
    }
}
