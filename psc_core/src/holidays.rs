//! French public holidays (metropolitan France).
//!
//! Fixed-date holidays plus the movable feasts derived from Easter Sunday. Names are
//! the French ones, as used in the school calendar extract.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

static NEW_YEAR: &str = "Jour de l'an";
static EASTER_MONDAY: &str = "Lundi de Pâques";
static LABOUR_DAY: &str = "Fête du Travail";
static VICTORY_DAY: &str = "Fête de la Victoire";
static ASCENSION: &str = "Ascension";
static WHIT_MONDAY: &str = "Lundi de Pentecôte";
static NATIONAL_DAY: &str = "Fête nationale";
static ASSUMPTION: &str = "Assomption";
static ALL_SAINTS: &str = "Toussaint";
static ARMISTICE: &str = "Armistice";
static CHRISTMAS: &str = "Noël";

static NAME_SEPARATOR: &str = "; ";

/// Easter Sunday of a Gregorian year (anonymous Gregorian computus).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// The holidays of a single year, in date order.
pub fn holidays_of_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let fixed = |month: u32, day: u32, name: &'static str| {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, name))
    };
    let easter = easter_sunday(year);
    let movable = |offset: u64, name: &'static str| {
        easter
            .and_then(|easter| easter.checked_add_days(Days::new(offset)))
            .map(|date| (date, name))
    };

    let mut holidays: Vec<(NaiveDate, &'static str)> = [
        (true, fixed(1, 1, NEW_YEAR)),
        (year >= 1886, movable(1, EASTER_MONDAY)),
        (year >= 1919, fixed(5, 1, LABOUR_DAY)),
        (
            (1953..=1959).contains(&year) || year >= 1982,
            fixed(5, 8, VICTORY_DAY),
        ),
        (true, movable(39, ASCENSION)),
        (year <= 2004 || year >= 2008, movable(50, WHIT_MONDAY)),
        (year >= 1880, fixed(7, 14, NATIONAL_DAY)),
        (true, fixed(8, 15, ASSUMPTION)),
        (true, fixed(11, 1, ALL_SAINTS)),
        (year >= 1919, fixed(11, 11, ARMISTICE)),
        (true, fixed(12, 25, CHRISTMAS)),
    ]
    .into_iter()
    .filter_map(|(observed, holiday)| holiday.filter(|_| observed))
    .collect();
    holidays.sort_by_key(|(date, _)| *date);
    holidays
}

/// All holidays of the given years keyed by date.
///
/// Holidays falling on the same date share one entry, their names joined with `"; "`.
pub fn france<I>(years: I) -> BTreeMap<NaiveDate, String>
where
    I: IntoIterator<Item = i32>,
{
    let mut calendar: BTreeMap<NaiveDate, String> = BTreeMap::new();
    for year in years {
        for (date, name) in holidays_of_year(year) {
            calendar
                .entry(date)
                .and_modify(|names| {
                    if !names.split(NAME_SEPARATOR).any(|known| known == name) {
                        names.push_str(NAME_SEPARATOR);
                        names.push_str(name);
                    }
                })
                .or_insert_with(|| String::from(name));
        }
    }
    calendar
}
