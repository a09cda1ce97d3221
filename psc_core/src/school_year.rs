//! School year labels such as `2024-2025`.

use std::{collections::BTreeSet, sync::OnceLock};

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::{Error, Result};

static SEPARATOR: char = '-';

fn label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(\d{4})[-_](\d{4})").expect("valid school year regex"))
}

/// Extract both calendar years of a school year label.
///
/// The pattern is searched anywhere in the label, `-` and `_` are both accepted.
pub fn parse_label(label: &str) -> Result<(i32, i32)> {
    let captures = label_regex()
        .captures(label)
        .ok_or_else(|| Error::SchoolYearFormat(String::from(label)))?;
    let year = |index: usize| -> Result<i32> {
        captures[index]
            .parse()
            .map_err(|_| Error::SchoolYearFormat(String::from(label)))
    };
    Ok((year(1)?, year(2)?))
}

/// The school year a date belongs to; a new school year starts in September.
pub fn label_for_date(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() >= 9 {
        format!("{year}{SEPARATOR}{}", year + 1)
    } else {
        format!("{}{SEPARATOR}{year}", year - 1)
    }
}

/// Collect the calendar years referenced by the labels, padded by one year on each side.
pub fn years_needed<'a, I>(labels: I) -> Result<Vec<i32>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut years = BTreeSet::new();
    for label in labels {
        let (first, second) = parse_label(label)?;
        years.insert(first);
        years.insert(second);
    }
    let (Some(&min), Some(&max)) = (years.first(), years.last()) else {
        return Err(Error::NoSchoolYears);
    };
    years.insert(min - 1);
    years.insert(max + 1);
    Ok(years.into_iter().collect())
}
