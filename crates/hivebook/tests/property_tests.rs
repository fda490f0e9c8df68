//! Property-based tests for coercion, the CSV codec and validation.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p hivebook --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p hivebook --test property_tests
//! ```

use indexmap::IndexMap;
use proptest::prelude::*;
use serde_json::json;

use hivebook::codec::{decode, encode_rows, CsvRow};
use hivebook::{parse_count, to_int, validate_apiary, Apiary, ApiaryForm, Task};

// =============================================================================
// Test Strategies
// =============================================================================

/// Field text that needs quoting: commas, quotes and line breaks.
fn awkward_field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,\"\r\n]{0,16}"
}

/// A row whose first field is never blank, so it is never skipped.
fn csv_row() -> impl Strategy<Value = (String, String, String)> {
    ("[a-zA-Z][a-zA-Z0-9 ,\"\r\n]{0,12}", awkward_field(), awkward_field())
}

/// Generate completely random bytes (edge cases)
fn random_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..200)
        .prop_map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

// =============================================================================
// Count Coercion Properties
// =============================================================================

mod count_tests {
    use super::*;

    proptest! {
        /// Plain non-negative integers read back exactly.
        #[test]
        fn non_negative_integers_read_back(n in 0u32..=u32::MAX) {
            prop_assert_eq!(parse_count(&n.to_string()), n);
        }

        /// Negative integers floor at zero.
        #[test]
        fn negatives_floor_at_zero(n in 1i64..=i64::MAX) {
            prop_assert_eq!(parse_count(&format!("-{}", n)), 0);
        }

        /// Leading whitespace and trailing junk are ignored.
        #[test]
        fn leading_digits_win(n in 0u32..100_000, junk in "[a-zA-Z .]{0,8}") {
            prop_assert_eq!(parse_count(&format!("  {}{}", n, junk)), n);
        }

        /// Coercion is total on arbitrary text.
        #[test]
        fn never_panics_on_random_text(input in random_text()) {
            let _ = parse_count(&input);
            let _ = to_int(&json!(input));
        }

        /// JSON numbers are floored and clamped.
        #[test]
        fn json_numbers_are_floored(n in -1.0e6f64..1.0e6) {
            let expected = if n < 0.0 { 0 } else { n.floor() as u32 };
            prop_assert_eq!(to_int(&json!(n)), expected);
        }
    }
}

// =============================================================================
// CSV Codec Properties
// =============================================================================

mod codec_tests {
    use super::*;

    proptest! {
        /// Encoding then decoding preserves every field.
        #[test]
        fn rows_survive_a_round_trip(rows in prop::collection::vec(csv_row(), 1..8)) {
            let rows: Vec<CsvRow> = rows
                .into_iter()
                .map(|(a, b, c)| {
                    let mut row = IndexMap::new();
                    row.insert("name".to_string(), a);
                    row.insert("notes".to_string(), b);
                    row.insert("hiveId".to_string(), c);
                    row
                })
                .collect();

            let text = encode_rows(&rows).unwrap();
            let decoded = decode(&text).unwrap();

            prop_assert_eq!(decoded, rows);
        }

        /// Decoding never panics, whatever the input.
        #[test]
        fn decode_never_panics(input in random_text()) {
            let _ = decode(&input);
        }

        /// Carriage returns outside quotes do not change the decoded rows.
        #[test]
        fn stray_carriage_returns_are_ignored(
            input in "[a-c,\n]{0,60}",
            stray in prop::collection::vec(0usize..61, 0..6),
        ) {
            let mut with_cr = input.clone();
            for at in stray {
                with_cr.insert(at.min(with_cr.len()), '\r');
            }

            prop_assert_eq!(decode(&with_cr).unwrap(), decode(&input).unwrap());
        }

        /// Rows never hold more fields than the header names.
        #[test]
        fn rows_never_exceed_header_width(input in "[a-c,\n]{0,60}") {
            if let Ok(rows) = decode(&input) {
                let width = input.lines().next().map(|l| l.split(',').count()).unwrap_or(0);
                for row in rows {
                    prop_assert!(row.len() <= width);
                }
            }
        }
    }
}

// =============================================================================
// Record Coercion Properties
// =============================================================================

mod record_tests {
    use super::*;

    proptest! {
        /// Apiary coercion accepts any field values.
        #[test]
        fn apiary_coercion_is_total(
            name in random_text(),
            hives in random_text(),
            date in random_text(),
        ) {
            let apiary = Apiary::coerce(&json!({
                "name": name, "numHives": hives, "lastInspection": date
            }));
            prop_assert!(apiary.id.starts_with("A-"));
        }

        /// A supplied task id is always kept.
        #[test]
        fn task_ids_are_kept(id in "T-[a-z0-9]{1,8}", title in random_text()) {
            let task = Task::coerce(&json!({ "id": id.clone(), "title": title }));
            prop_assert_eq!(task.id, id);
        }
    }
}

// =============================================================================
// Validation Properties
// =============================================================================

mod validation_tests {
    use super::*;

    proptest! {
        /// Valid exactly when both parts fit inside the total.
        #[test]
        fn validity_matches_the_arithmetic(
            total in 0u32..200,
            single in 0u32..200,
            double in 0u32..200,
        ) {
            let report = validate_apiary(&ApiaryForm::new("Apiary").with_hives(total, single, double));
            let fits = single <= total && double <= total && single + double <= total;

            prop_assert_eq!(report.is_valid(), fits);
        }

        /// Huge counts never overflow the sum check.
        #[test]
        fn large_counts_do_not_overflow(single in (u32::MAX / 2 + 1)..=u32::MAX) {
            let report = validate_apiary(
                &ApiaryForm::new("Apiary").with_hives(u32::MAX, single, single),
            );
            prop_assert!(!report.is_valid());
        }

        /// Validation never panics on raw text in the count fields.
        #[test]
        fn never_panics_on_raw_counts(
            name in random_text(),
            total in random_text(),
            single in random_text(),
        ) {
            let mut form = ApiaryForm::new(name);
            form.num_hives = total;
            form.single_hives = single;
            let _ = validate_apiary(&form);
        }
    }
}
