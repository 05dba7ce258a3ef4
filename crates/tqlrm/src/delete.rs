//! `DELETE` statement generation and batch execution.

use std::io::Write;

use crate::client::TqlClient;
use crate::error::{TqlError, TqlResult};
use crate::schema::TableInfo;
use crate::spec_file::DeleteRow;

/// Builds one `DELETE` statement for `row` against `table`.
///
/// Values for columns whose discovered type mentions `int` or `double`
/// are written unquoted; everything else is single-quoted with embedded
/// single quotes doubled.
pub fn build_delete(database: &str, table: &TableInfo, row: &DeleteRow) -> TqlResult<String> {
    if row.values.is_empty() {
        return Err(TqlError::validation("delete row has no columns"));
    }

    let mut stmt = format!(
        "DELETE FROM {database}.{}.{} WHERE ",
        table.schema, table.name
    );

    for (i, (column, value)) in row.values.iter().enumerate() {
        let Some(info) = table.find_column(column) else {
            return Err(TqlError::validation(format!(
                "Column {column} not found in {}.{}.",
                table.schema, table.name
            )));
        };

        if i > 0 {
            stmt.push_str(" AND ");
        }

        if info.is_numeric() {
            stmt.push_str(&format!("{column} = {value}"));
        } else {
            stmt.push_str(&format!("{column} = '{}'", value.replace('\'', "''")));
        }
    }

    stmt.push(';');
    Ok(stmt)
}

/// Builds one statement per spec file row.
pub fn build_deletes(
    database: &str,
    table: &TableInfo,
    rows: &[DeleteRow],
) -> TqlResult<Vec<String>> {
    rows.iter().map(|r| build_delete(database, table, r)).collect()
}

/// Writes `statements` to a temporary script and feeds it to the query
/// tool in a single invocation. Returns the number of statements run.
pub fn execute_deletes(client: &impl TqlClient, statements: &[String]) -> TqlResult<usize> {
    let mut script = tempfile::NamedTempFile::new()
        .map_err(|e| TqlError::io(std::env::temp_dir(), e))?;

    for stmt in statements {
        writeln!(script, "{stmt}").map_err(|e| TqlError::io(script.path(), e))?;
    }
    script.flush().map_err(|e| TqlError::io(script.path(), e))?;

    client.run_script(script.path())?;
    Ok(statements.len())
}
