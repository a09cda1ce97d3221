//! Writes the cleaned calendar as a semicolon separated file.

use std::{
    fs::{create_dir_all, File},
    io::Write,
    path::Path,
};

use csv::WriterBuilder;
use tracing::info;

use crate::{
    error::{Error, Result},
    table::Table,
};

static DELIMITER: u8 = b';';

/// Write the table to `path`, replacing any existing file.
pub fn save(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
    }
    let file = File::create(path).map_err(|err| Error::io(path, err))?;
    write(table, file)?;
    info!(path = %path.display(), rows = table.len(), "calendar written");
    Ok(())
}

/// Write a header line and one line per row; nulls are empty fields.
pub fn write<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(DELIMITER).from_writer(writer);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush().map_err(|err| Error::Csv(err.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::{read_to_string, write as write_file};

    use chrono::NaiveDate;

    use crate::{
        table::{Cell, Table},
        writer::{save, write},
    };

    fn get_test_table() -> Table {
        let christmas = NaiveDate::from_ymd_opt(2024, 12, 25)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut table = Table::new(vec![
            String::from("description"),
            String::from("date_de_debut"),
            String::from("date_de_fin"),
        ]);
        table.push_row(vec!["Noël".into(), christmas.into(), christmas.into()]);
        table.push_row(vec!["Pont; long".into(), christmas.into(), Cell::Null]);
        table
    }

    #[test]
    fn test_write() {
        let mut buffer = vec![];
        write(&get_test_table(), &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "description;date_de_debut;date_de_fin\n\
             Noël;2024-12-25 00:00:00;2024-12-25 00:00:00\n\
             \"Pont; long\";2024-12-25 00:00:00;\n"
        );
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset").join("vacances.csv");
        save(&get_test_table(), &path).unwrap();
        write_file(&path, "stale content that is much longer than the real output ...........................................................................").unwrap();
        save(&get_test_table(), &path).unwrap();
        let written = read_to_string(&path).unwrap();
        assert!(written.starts_with("description;date_de_debut;date_de_fin\n"));
        assert!(!written.contains("stale"));
        assert_eq!(written.lines().count(), 3);
    }
}
