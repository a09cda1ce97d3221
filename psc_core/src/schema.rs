//! Column names of the school calendar extract.

pub const DESCRIPTION: &str = "Description";
pub const POPULATION: &str = "Population";
pub const START_DATE: &str = "Date de début";
pub const END_DATE: &str = "Date de fin";
pub const ACADEMIES: &str = "Académies";
pub const ZONES: &str = "Zones";
pub const SCHOOL_YEAR: &str = "annee_scolaire";
/// Only present on holiday rows.
pub const DATE: &str = "date";

pub const REQUIRED_COLUMNS: [&str; 5] = [ACADEMIES, SCHOOL_YEAR, POPULATION, START_DATE, END_DATE];
pub const DATE_COLUMNS: [&str; 3] = [START_DATE, END_DATE, DATE];

/// Columns added to the holidays when they share none with the school calendar.
pub const FALLBACK_COLUMNS: [&str; 2] = [SCHOOL_YEAR, ZONES];

/// Published-schema names of the columns which are not written out.
pub const INTERNAL_COLUMNS: [&str; 4] = ["population", "zones", "annee_scolaire", "academies"];

/// Population written on holiday rows.
pub const NO_POPULATION: &str = "-";
