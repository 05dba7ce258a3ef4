//! tqlrm
//!
//! Helpers for deleting rows from a TQL-fronted database in bulk.
//!
//! The workflow mirrors what an operator would do by hand on the appliance:
//! discover the schema by scraping `show tables` / `show table` output from
//! the `tql` client, read a delimiter-separated spec file naming the rows to
//! delete, generate one `DELETE` statement per row (quoting values according
//! to the discovered column types), and feed the whole batch back into `tql`
//! in a single invocation.
//!
//! # Example
//!
//! ```ignore
//! use tqlrm::{ShellTqlClient, load_schema, read_spec_file, build_deletes, execute_deletes};
//!
//! let client = ShellTqlClient::new("tql");
//! let schema = load_schema(&client, "mydb")?;
//! let table = schema
//!     .find_table("falcon_default_schema", "sales")
//!     .expect("table exists");
//!
//! let rows = read_spec_file("sales_deletes.psv".as_ref(), b'|')?;
//! let statements = build_deletes("mydb", table, &rows)?;
//! let count = execute_deletes(&client, &statements)?;
//! ```

pub mod client;
pub mod delete;
pub mod error;
pub mod schema;
pub mod spec_file;

pub use client::{ShellTqlClient, TqlClient};
pub use delete::{build_delete, build_deletes, execute_deletes};
pub use error::{TqlError, TqlResult};
pub use schema::{ColumnInfo, DbSchema, TableInfo, load_schema};
pub use spec_file::{DeleteRow, read_spec_file};
