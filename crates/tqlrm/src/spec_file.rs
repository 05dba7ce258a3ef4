//! Delete spec file reading.
//!
//! A spec file is delimiter-separated text with a header row naming
//! columns; each data row identifies one database row to delete. Fields
//! are assumed not to contain the separator outside of double quotes.

use std::path::Path;

use crate::error::{TqlError, TqlResult};

/// One row to delete: `(column, value)` pairs in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRow {
    pub values: Vec<(String, String)>,
}

/// Reads a delete spec file using `separator` as the field delimiter.
pub fn read_spec_file(path: &Path, separator: u8) -> TqlResult<Vec<DeleteRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .quote(b'"')
        .from_path(path)
        .map_err(|e| spec_error(path, e))?;

    let headers = reader.headers().map_err(|e| spec_error(path, e))?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TqlError::validation(format!(
            "delete spec file {} has an empty header row",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| spec_error(path, e))?;
        let values = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(DeleteRow { values });
    }

    Ok(rows)
}

fn spec_error(path: &Path, source: csv::Error) -> TqlError {
    TqlError::SpecFile {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_spec(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_rows_in_header_order() {
        let file = write_spec("id|region\n1|west\n2|east\n");
        let rows = read_spec_file(file.path(), b'|').unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].values,
            vec![
                ("id".to_string(), "1".to_string()),
                ("region".to_string(), "west".to_string()),
            ]
        );
        assert_eq!(
            rows[1].values,
            vec![
                ("id".to_string(), "2".to_string()),
                ("region".to_string(), "east".to_string()),
            ]
        );
    }

    #[test]
    fn honors_the_separator() {
        let file = write_spec("id,region\n7,north\n");
        let rows = read_spec_file(file.path(), b',').unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].values,
            vec![
                ("id".to_string(), "7".to_string()),
                ("region".to_string(), "north".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_fields_may_contain_the_separator() {
        let file = write_spec("id|note\n1|\"a|b\"\n");
        let rows = read_spec_file(file.path(), b'|').unwrap();

        assert_eq!(rows[0].values[1], ("note".to_string(), "a|b".to_string()));
    }

    #[test]
    fn header_only_file_yields_no_rows() {
        let file = write_spec("id|region\n");
        let rows = read_spec_file(file.path(), b'|').unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn ragged_row_is_an_error() {
        let file = write_spec("id|region\n1|west|extra\n");
        let err = read_spec_file(file.path(), b'|').unwrap_err();
        assert!(matches!(err, TqlError::SpecFile { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_spec_file(Path::new("/nonexistent/deletes.psv"), b'|').unwrap_err();
        assert!(matches!(err, TqlError::SpecFile { .. }));
    }
}
