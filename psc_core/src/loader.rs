//! Reads and filters the school calendar extract published on
//! <https://data.education.gouv.fr/explore/dataset/fr-en-calendrier-scolaire/>.

use std::{fs::File, io::Read, path::Path};

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    normalize::parse_timestamp,
    schema::{ACADEMIES, DATE_COLUMNS, POPULATION, REQUIRED_COLUMNS, SCHOOL_YEAR},
    table::{Cell, Table},
};

static DELIMITER: u8 = b';';
static BYTE_ORDER_MARK: char = '\u{feff}';

/// Load the school calendar from a file.
pub fn load(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|err| Error::io(path, err))?;
    let table = read(file)?;
    info!(path = %path.display(), rows = table.len(), "school calendar loaded");
    Ok(table)
}

/// Read a semicolon separated school calendar.
///
/// Date columns are parsed into time zone free date-times; values which cannot be
/// parsed become nulls.
pub fn read<R: Read>(reader: R) -> Result<Table> {
    let mut reader = ReaderBuilder::new().delimiter(DELIMITER).from_reader(reader);
    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let header = if index == 0 {
                header.trim_start_matches(BYTE_ORDER_MARK)
            } else {
                header
            };
            String::from(header)
        })
        .collect();
    let mut table = Table::new(columns);
    for column in REQUIRED_COLUMNS {
        if !table.has_column(column) {
            return Err(Error::MissingColumn(String::from(column)));
        }
    }
    let is_date: Vec<bool> = table
        .columns()
        .iter()
        .map(|column| DATE_COLUMNS.contains(&column.as_str()))
        .collect();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .zip(&is_date)
            .map(|(value, &is_date)| parse_cell(value, is_date))
            .collect();
        table.push_row(row);
    }
    Ok(table)
}

fn parse_cell(value: &str, is_date: bool) -> Cell {
    if value.is_empty() {
        return Cell::Null;
    }
    if !is_date {
        return Cell::from(value);
    }
    match parse_timestamp(value) {
        Some(date_time) => Cell::DateTime(date_time),
        None => {
            warn!(value, "unreadable date, treated as missing");
            Cell::Null
        }
    }
}

/// Keep the rows of the configured academy and school years, without the excluded
/// population.
pub fn filter(table: &mut Table, config: &Config) {
    let before = table.len();
    let (Some(academies), Some(school_year), Some(population)) = (
        table.column_index(ACADEMIES),
        table.column_index(SCHOOL_YEAR),
        table.column_index(POPULATION),
    ) else {
        table.retain_rows(|_, _| false);
        return;
    };
    table.retain_rows(|_, row| {
        let in_region = row[academies].as_text() == Some(config.region.as_str());
        let in_school_years = row[school_year]
            .as_text()
            .is_some_and(|label| config.school_years.iter().any(|year| year == label));
        in_region && in_school_years
    });
    table.retain_rows(|_, row| {
        row[population].as_text() != Some(config.excluded_population.as_str())
    });
    info!(before, after = table.len(), region = %config.region, "school calendar filtered");
}
