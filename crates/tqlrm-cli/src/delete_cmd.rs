use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::DeleteArgs;
use crate::config::{ConfigFile, DEFAULT_CONFIG_PATH};
use tqlrm::{ShellTqlClient, build_deletes, execute_deletes, load_schema, read_spec_file};

const DEFAULT_SCHEMA: &str = "falcon_default_schema";

pub fn run(args: DeleteArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let resolved = resolve(args, config)?;

    let client = ShellTqlClient::new(&resolved.tql_bin);
    let schema = load_schema(&client, &resolved.database)?;

    if resolved.dump_schema {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let Some(table) = schema.find_table(&resolved.schema, &resolved.table) else {
        anyhow::bail!("Table {}.{} not found.", resolved.schema, resolved.table);
    };

    let start = Instant::now();
    let rows = read_spec_file(&resolved.filename, resolved.separator)?;
    let statements = build_deletes(&resolved.database, table, &rows)?;

    if resolved.dry_run {
        for stmt in &statements {
            println!("{stmt}");
        }
        println!("generated {} deletes (dry run)", statements.len());
        return Ok(());
    }

    let count = execute_deletes(&client, &statements)?;
    println!(
        "executed {count} deletes in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn load_config(args: &DeleteArgs) -> anyhow::Result<ConfigFile> {
    match &args.config {
        Some(path) => ConfigFile::load(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                ConfigFile::load(default)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

#[derive(Debug)]
struct Resolved {
    filename: PathBuf,
    table: String,
    database: String,
    schema: String,
    separator: u8,
    tql_bin: PathBuf,
    dry_run: bool,
    dump_schema: bool,
}

/// Merges flags over config defaults and checks required inputs.
///
/// Every problem is reported to stderr before bailing, so an operator
/// sees all missing arguments at once; nothing is executed on failure.
fn resolve(args: DeleteArgs, config: ConfigFile) -> anyhow::Result<Resolved> {
    let mut ok = true;

    if !args.dump_schema {
        match &args.filename {
            None => {
                eprintln!("Delete file was not specified.");
                ok = false;
            }
            Some(path) if !path.is_file() => {
                eprintln!("Delete file {} was not found.", path.display());
                ok = false;
            }
            Some(_) => {}
        }

        if args.table.is_none() {
            eprintln!("Table was not specified.");
            ok = false;
        }
    }

    let database = args.database.or(config.defaults.database);
    if database.is_none() {
        eprintln!("Database was not specified.");
        ok = false;
    }

    if !ok {
        anyhow::bail!("invalid arguments (see above)");
    }

    let separator = match args.separator {
        Some(b) => b,
        None => match &config.defaults.separator {
            Some(s) => crate::cli::parse_separator(s)?,
            None => b'|',
        },
    };

    Ok(Resolved {
        filename: args.filename.unwrap_or_default(),
        table: args.table.unwrap_or_default(),
        database: database.unwrap_or_default(),
        schema: args
            .schema
            .or(config.defaults.schema)
            .unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
        separator,
        tql_bin: args
            .tql
            .or(config.tql.bin.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("tql")),
        dry_run: args.dry_run,
        dump_schema: args.dump_schema,
    })
}
