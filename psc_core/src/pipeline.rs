//! Builds the Paris school and public holiday dataset.
//!
//! The school calendar is loaded and filtered, the French public holidays of the
//! school years it covers are appended, then the dates are restricted to the
//! configured window and the columns renamed to their published form.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::Result,
    holidays, loader,
    normalize::{self, retain_window},
    schema::{
        ACADEMIES, DATE, DESCRIPTION, END_DATE, FALLBACK_COLUMNS, INTERNAL_COLUMNS,
        NO_POPULATION, POPULATION, SCHOOL_YEAR, START_DATE, ZONES,
    },
    school_year,
    table::{Cell, Table},
    writer,
};

const PREVIEW_ROWS: usize = 50;

/// Run the whole pipeline: load, filter, add holidays, normalise and save.
pub fn run(config: &Config) -> Result<Table> {
    config.validate()?;
    let mut school_calendar = loader::load(&config.input)?;
    loader::filter(&mut school_calendar, config);
    let holidays = holiday_rows(&school_calendar, config)?;
    let merged = merge(school_calendar, &holidays);
    for row in merged.rows().iter().take(PREVIEW_ROWS) {
        debug!(row = ?row, "merged");
    }
    let dataset = normalize_output(merged, config);
    writer::save(&dataset, &config.output)?;
    Ok(dataset)
}

/// Build one row per public holiday of the years covered by the school calendar.
pub fn holiday_rows(school_calendar: &Table, config: &Config) -> Result<Table> {
    let labels = school_calendar
        .column_values(SCHOOL_YEAR)
        .filter_map(Cell::as_text);
    let years = school_year::years_needed(labels)?;
    debug!(?years, "holiday years");
    let public_holidays = unique_holidays(holidays::france(years.iter().copied()));

    let mut table = Table::new(
        [
            DATE,
            DESCRIPTION,
            SCHOOL_YEAR,
            ZONES,
            POPULATION,
            ACADEMIES,
            START_DATE,
            END_DATE,
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    );
    for (date, name) in public_holidays {
        let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
            continue;
        };
        table.push_row(vec![
            Cell::DateTime(midnight),
            Cell::from(name),
            Cell::from(school_year::label_for_date(date)),
            Cell::from(config.holiday_zone.as_str()),
            Cell::from(NO_POPULATION),
            Cell::from(config.region.as_str()),
            Cell::DateTime(midnight),
            Cell::DateTime(midnight),
        ]);
    }
    info!(rows = table.len(), "public holidays generated");
    Ok(table)
}

/// Keep the first occurrence of every `(date, name)` pair, in input order.
fn unique_holidays<I>(holidays: I) -> Vec<(NaiveDate, String)>
where
    I: IntoIterator<Item = (NaiveDate, String)>,
{
    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();
    holidays
        .into_iter()
        .filter(|holiday| seen.insert(holiday.clone()))
        .collect()
}

/// Append the holidays to the school calendar, keeping the school calendar columns.
///
/// Only the columns both tables share are taken from the holidays. When they share
/// none, the holidays get empty fallback columns first.
pub fn merge(mut school_calendar: Table, holidays: &Table) -> Table {
    let mut holidays = holidays.clone();
    let mut common = common_columns(&holidays, &school_calendar);
    if common.is_empty() {
        for column in FALLBACK_COLUMNS {
            holidays.add_null_column(column);
        }
        common = common_columns(&holidays, &school_calendar);
    }
    school_calendar.concat(&holidays.select(&common));
    info!(rows = school_calendar.len(), "calendars merged");
    school_calendar
}

fn common_columns(holidays: &Table, school_calendar: &Table) -> Vec<String> {
    holidays
        .columns()
        .iter()
        .filter(|column| school_calendar.has_column(column))
        .cloned()
        .collect()
}

/// Restrict to the date window, fold the column names and drop the internal columns.
pub fn normalize_output(mut table: Table, config: &Config) -> Table {
    retain_window(&mut table, START_DATE, &[START_DATE, END_DATE], &config.window);
    info!(
        rows = table.len(),
        start = %config.window.start,
        end = %config.window.end,
        "date window applied"
    );
    table.rename_columns(normalize::column_name);
    table.drop_columns(&INTERNAL_COLUMNS);
    table
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, fs::read, io::Cursor};

    use chrono::{Datelike, NaiveDate};

    use crate::{
        config::{Config, DateWindow},
        loader,
        pipeline::{holiday_rows, merge, normalize_output, run, unique_holidays},
        schema::{DESCRIPTION, SCHOOL_YEAR, START_DATE},
        table::{Cell, Table},
    };

    fn get_test_school_calendar() -> Table {
        let mut table =
            loader::read(Cursor::new(include_str!("loader/tests/calendrier_scolaire.csv")))
                .unwrap();
        loader::filter(&mut table, &Config::default());
        table
    }

    #[test]
    fn test_holiday_rows() {
        let holidays = holiday_rows(&get_test_school_calendar(), &Config::default()).unwrap();
        // 2022 to 2026: the school years 2023-2024 and 2024-2025, padded.
        assert_eq!(holidays.len(), 55);
        let years: HashSet<i32> = holidays
            .column_values("date")
            .filter_map(Cell::as_date_time)
            .map(|date_time| date_time.year())
            .collect();
        assert_eq!(years, HashSet::from([2022, 2023, 2024, 2025, 2026]));

        let row = holidays
            .rows()
            .iter()
            .find(|row| {
                holidays.get(row, "date").and_then(Cell::as_date_time)
                    == NaiveDate::from_ymd_opt(2024, 11, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .unwrap();
        assert_eq!(holidays.get(row, DESCRIPTION).unwrap(), &Cell::from("Toussaint"));
        assert_eq!(holidays.get(row, SCHOOL_YEAR).unwrap(), &Cell::from("2024-2025"));
        assert_eq!(holidays.get(row, "Zones").unwrap(), &Cell::from("Zone C"));
        assert_eq!(holidays.get(row, "Population").unwrap(), &Cell::from("-"));
        assert_eq!(holidays.get(row, "Académies").unwrap(), &Cell::from("Paris"));
        assert_eq!(
            holidays.get(row, START_DATE),
            holidays.get(row, "Date de fin")
        );
    }

    #[test]
    fn test_holiday_rows_are_unique() {
        let holidays = holiday_rows(&get_test_school_calendar(), &Config::default()).unwrap();
        let pairs: HashSet<(&Cell, &Cell)> = holidays
            .rows()
            .iter()
            .map(|row| (&row[0], &row[1]))
            .collect();
        assert_eq!(pairs.len(), holidays.len());
    }

    #[test]
    fn test_unique_holidays() {
        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
        let holidays = unique_holidays([
            (date(5, 1), String::from("Fête du Travail")),
            (date(5, 8), String::from("Fête de la Victoire")),
            (date(5, 1), String::from("Fête du Travail")),
            (date(5, 1), String::from("Journée du muguet")),
            (date(5, 8), String::from("Fête de la Victoire")),
        ]);
        assert_eq!(
            holidays,
            vec![
                (date(5, 1), String::from("Fête du Travail")),
                (date(5, 8), String::from("Fête de la Victoire")),
                (date(5, 1), String::from("Journée du muguet")),
            ]
        );
    }

    #[test]
    fn test_holiday_rows_bad_label() {
        let mut table = Table::new(vec![String::from(SCHOOL_YEAR)]);
        table.push_row(vec!["2024/2025".into()]);
        assert!(holiday_rows(&table, &Config::default()).is_err());
    }

    #[test]
    fn test_merge_order_and_alignment() {
        let school_calendar = get_test_school_calendar();
        let school_rows = school_calendar.len();
        let holidays = holiday_rows(&school_calendar, &Config::default()).unwrap();
        let merged = merge(school_calendar.clone(), &holidays);
        assert_eq!(merged.columns(), school_calendar.columns());
        assert_eq!(merged.len(), school_rows + holidays.len());
        assert_eq!(&merged.rows()[..school_rows], school_calendar.rows());
        let first_holiday = &merged.rows()[school_rows];
        assert_eq!(
            merged.get(first_holiday, DESCRIPTION).unwrap(),
            &Cell::from("Jour de l'an")
        );
        assert!(!merged.has_column("date"));
    }

    #[test]
    fn test_merge_without_common_columns() {
        let mut school_calendar = Table::new(vec![String::from("Zones"), String::from("other")]);
        school_calendar.push_row(vec!["Zone A".into(), "x".into()]);
        let mut holidays = Table::new(vec![String::from("name")]);
        holidays.push_row(vec!["Noël".into()]);
        let merged = merge(school_calendar, &holidays);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.rows()[1], vec![Cell::Null, Cell::Null]);
    }

    #[test]
    fn test_normalize_output() {
        let school_calendar = get_test_school_calendar();
        let holidays = holiday_rows(&school_calendar, &Config::default()).unwrap();
        let dataset = normalize_output(merge(school_calendar, &holidays), &Config::default());
        assert_eq!(
            dataset.columns(),
            ["description", "date_de_debut", "date_de_fin"]
        );
        // 5 school holidays and 11 public holidays in each of 2024 and 2025.
        assert_eq!(dataset.len(), 27);
        let window = DateWindow::default();
        assert!(dataset
            .column_values("date_de_debut")
            .all(|cell| cell.as_date_time().is_some_and(|start| window.contains(start.date()))));
    }

    #[test]
    fn test_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fr-en-calendrier-scolaire.csv");
        std::fs::write(&input, include_str!("loader/tests/calendrier_scolaire.csv")).unwrap();
        let config = Config {
            input,
            output: dir.path().join("dataset").join("vacances.csv"),
            ..Config::default()
        };
        let dataset = run(&config).unwrap();
        let first = read(&config.output).unwrap();
        let text = String::from_utf8(first.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), dataset.len() + 1);
        assert_eq!(lines[0], "description;date_de_debut;date_de_fin");
        assert_eq!(lines[1], "Vacances d'Hiver;2024-02-09 23:00:00;2024-02-25 23:00:00");
        assert_eq!(lines[6], "Jour de l'an;2024-01-01 00:00:00;2024-01-01 00:00:00");
        assert_eq!(lines[27], "Noël;2025-12-25 00:00:00;2025-12-25 00:00:00");

        run(&config).unwrap();
        assert_eq!(read(&config.output).unwrap(), first);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            input: dir.path().join("absent.csv"),
            output: dir.path().join("vacances.csv"),
            ..Config::default()
        };
        assert!(run(&config).is_err());
        assert!(!config.output.exists());
    }
}
