//! Date and column name normalisation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use unicode_normalization::UnicodeNormalization;

use crate::{config::DateWindow, table::Table};

static NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
static OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];
static DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp and drop its time zone, keeping the wall-clock time.
///
/// Returns `None` when the value cannot be read as a date.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(date_time) = DateTime::parse_from_str(value, format) {
            return Some(date_time.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date_time);
        }
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Fold a column name to lowercase ASCII with underscores.
///
/// `Date de début` becomes `date_de_debut`.
pub fn column_name(name: &str) -> String {
    name.nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Keep the rows whose `column` holds a date-time inside the window.
///
/// Rows where any of `required` is not a date-time are dropped as well.
pub fn retain_window(table: &mut Table, column: &str, required: &[&str], window: &DateWindow) {
    let Some(index) = table.column_index(column) else {
        return;
    };
    let required: Vec<usize> = required
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    table.retain_rows(|_, row| {
        row[index]
            .as_date_time()
            .is_some_and(|date_time| window.contains(date_time.date()))
            && required.iter().all(|&i| row[i].as_date_time().is_some())
    });
}
