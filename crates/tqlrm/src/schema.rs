//! Schema discovery by scraping `tql` output.
//!
//! WARNING: this depends on the format of `show tables` / `show table`
//! output not changing. Lines with fewer pipe-delimited fields than
//! expected are skipped.

use serde::{Deserialize, Serialize};

use crate::client::TqlClient;
use crate::error::TqlResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

impl ColumnInfo {
    /// Whether values for this column are written into SQL without quotes.
    pub fn is_numeric(&self) -> bool {
        self.data_type.contains("int") || self.data_type.contains("double")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub schema: String,
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn find_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbSchema {
    pub database: String,
    pub tables: Vec<TableInfo>,
}

impl DbSchema {
    pub fn find_table(&self, schema: &str, table: &str) -> Option<&TableInfo> {
        self.tables
            .iter()
            .find(|t| t.schema == schema && t.name == table)
    }
}

/// Discovers the schema of `database` by running `show tables` and then
/// `show table` for each table the listing reports.
pub fn load_schema(client: &impl TqlClient, database: &str) -> TqlResult<DbSchema> {
    let listing = client.query(&format!("show tables {database};"))?;

    let mut tables = Vec::new();
    for (schema_name, table_name) in parse_table_listing(&listing) {
        let detail = client.query(&format!(
            "show table {database}.{schema_name}.{table_name};"
        ))?;

        tables.push(TableInfo {
            schema: schema_name,
            name: table_name,
            columns: parse_table_columns(&detail),
        });
    }

    if tables.is_empty() {
        tracing::warn!(database, "no tables found in `show tables` output");
    }

    Ok(DbSchema {
        database: database.to_string(),
        tables,
    })
}

/// Parses `show tables` output: one `schema|table` pair per line, fields
/// whitespace-trimmed. Lines with fewer than 2 fields are skipped.
fn parse_table_listing(output: &str) -> Vec<(String, String)> {
    let mut tables = Vec::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < 2 {
            tracing::debug!(line, "skipping short table listing line");
            continue;
        }
        tables.push((fields[0].trim().to_string(), fields[1].trim().to_string()));
    }

    tables
}

/// Parses `show table` output: column name in field 0, column type in
/// field 2. Lines with fewer than 3 fields are skipped.
fn parse_table_columns(output: &str) -> Vec<ColumnInfo> {
    let mut columns = Vec::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < 3 {
            tracing::debug!(line, "skipping short column line");
            continue;
        }
        columns.push(ColumnInfo {
            name: fields[0].trim().to_string(),
            data_type: fields[2].trim().to_string(),
        });
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_listing_skips_short_lines() {
        let output = "\
falcon_default_schema|sales
(2 rows)

falcon_default_schema|customers
";
        let tables = parse_table_listing(output);
        assert_eq!(
            tables,
            vec![
                (
                    "falcon_default_schema".to_string(),
                    "sales".to_string()
                ),
                (
                    "falcon_default_schema".to_string(),
                    "customers".to_string()
                ),
            ]
        );
    }

    #[test]
    fn table_listing_trims_fields() {
        let tables = parse_table_listing(" myschema | orders |TABLE\n");
        assert_eq!(tables, vec![("myschema".to_string(), "orders".to_string())]);
    }

    #[test]
    fn table_columns_skips_short_lines() {
        let output = "\
id|0|int64
region|1|varchar(64)
done
amount|2|double
";
        let columns = parse_table_columns(output);
        assert_eq!(
            columns,
            vec![
                ColumnInfo {
                    name: "id".to_string(),
                    data_type: "int64".to_string(),
                },
                ColumnInfo {
                    name: "region".to_string(),
                    data_type: "varchar(64)".to_string(),
                },
                ColumnInfo {
                    name: "amount".to_string(),
                    data_type: "double".to_string(),
                },
            ]
        );
    }

    #[test]
    fn numeric_column_detection() {
        let int_col = ColumnInfo {
            name: "id".to_string(),
            data_type: "int32".to_string(),
        };
        let double_col = ColumnInfo {
            name: "amount".to_string(),
            data_type: "double".to_string(),
        };
        let text_col = ColumnInfo {
            name: "region".to_string(),
            data_type: "varchar(64)".to_string(),
        };

        assert!(int_col.is_numeric());
        assert!(double_col.is_numeric());
        assert!(!text_col.is_numeric());
    }

    #[test]
    fn find_table_matches_schema_and_name() {
        let schema = DbSchema {
            database: "mydb".to_string(),
            tables: vec![TableInfo {
                schema: "s1".to_string(),
                name: "t1".to_string(),
                columns: Vec::new(),
            }],
        };

        assert!(schema.find_table("s1", "t1").is_some());
        assert!(schema.find_table("s2", "t1").is_none());
        assert!(schema.find_table("s1", "t2").is_none());
    }
}
