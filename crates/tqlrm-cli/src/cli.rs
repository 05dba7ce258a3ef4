use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Delete(DeleteArgs),
}

#[derive(Debug, Clone, Default)]
pub struct DeleteArgs {
    pub filename: Option<PathBuf>,
    pub table: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub separator: Option<u8>,
    pub config: Option<PathBuf>,
    pub tql: Option<PathBuf>,
    pub dry_run: bool,
    pub dump_schema: bool,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1).map(|s| s.as_str());
    let mut parsed = DeleteArgs::default();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help),
            "-f" | "--filename" => {
                parsed.filename = Some(PathBuf::from(take_value(&mut it, "--filename")?));
            }
            _ if token.starts_with("--filename=") => {
                parsed.filename = Some(PathBuf::from(token.trim_start_matches("--filename=")));
            }
            "-t" | "--table" => {
                parsed.table = Some(take_value(&mut it, "--table")?.to_string());
            }
            _ if token.starts_with("--table=") => {
                parsed.table = Some(token.trim_start_matches("--table=").to_string());
            }
            "-d" | "--database" => {
                parsed.database = Some(take_value(&mut it, "--database")?.to_string());
            }
            _ if token.starts_with("--database=") => {
                parsed.database = Some(token.trim_start_matches("--database=").to_string());
            }
            "-s" | "--schema" => {
                parsed.schema = Some(take_value(&mut it, "--schema")?.to_string());
            }
            _ if token.starts_with("--schema=") => {
                parsed.schema = Some(token.trim_start_matches("--schema=").to_string());
            }
            "-p" | "--separator" => {
                parsed.separator = Some(parse_separator(take_value(&mut it, "--separator")?)?);
            }
            _ if token.starts_with("--separator=") => {
                parsed.separator = Some(parse_separator(token.trim_start_matches("--separator="))?);
            }
            "--config" => {
                parsed.config = Some(PathBuf::from(take_value(&mut it, "--config")?));
            }
            _ if token.starts_with("--config=") => {
                parsed.config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--tql" => {
                parsed.tql = Some(PathBuf::from(take_value(&mut it, "--tql")?));
            }
            _ if token.starts_with("--tql=") => {
                parsed.tql = Some(PathBuf::from(token.trim_start_matches("--tql=")));
            }
            "--dry-run" => parsed.dry_run = true,
            "--dump-schema" => parsed.dump_schema = true,
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Delete(parsed))
}

fn take_value<'a>(it: &mut impl Iterator<Item = &'a str>, flag: &str) -> anyhow::Result<&'a str> {
    it.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

pub fn parse_separator(v: &str) -> anyhow::Result<u8> {
    match v.as_bytes() {
        [b] => Ok(*b),
        _ => anyhow::bail!("invalid separator: {v} (expected a single character)"),
    }
}

pub fn print_help() {
    println!(
        "\
tqlrm - delete rows from a TQL-fronted database in bulk

Reads a delimiter-separated spec file (header row naming columns, one data
row per record to delete), discovers column types through `tql`, generates
one DELETE statement per row, and pipes the batch back into `tql`.

USAGE:
  tqlrm [OPTIONS]

OPTIONS:
  -f, --filename <FILE>    Delete spec file (required)
  -t, --table <NAME>       Table to delete records from (required)
  -d, --database <NAME>    Database to delete from (required)
  -s, --schema <NAME>      Schema to delete from (default: falcon_default_schema)
  -p, --separator <CHAR>   Spec file field delimiter (default: |)
      --config <FILE>      Config file path (default: tqlrm.toml if present)
      --tql <PATH>         tql executable to invoke (default: tql)
      --dry-run            Print the DELETE statements instead of executing
      --dump-schema        Print the discovered schema as JSON and exit
  -h, --help               Print help"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        std::iter::once("tqlrm")
            .chain(tokens.iter().copied())
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn parse_full_flag_set() {
        let cmd = parse_args(&args(&[
            "-f",
            "deletes.psv",
            "-t",
            "sales",
            "-d",
            "mydb",
            "-s",
            "myschema",
            "-p",
            ",",
            "--dry-run",
        ]))
        .unwrap();

        let Command::Delete(d) = cmd else {
            panic!("expected delete command");
        };
        assert_eq!(d.filename, Some(PathBuf::from("deletes.psv")));
        assert_eq!(d.table.as_deref(), Some("sales"));
        assert_eq!(d.database.as_deref(), Some("mydb"));
        assert_eq!(d.schema.as_deref(), Some("myschema"));
        assert_eq!(d.separator, Some(b','));
        assert!(d.dry_run);
        assert!(!d.dump_schema);
    }

    #[test]
    fn parse_equals_spelling() {
        let cmd = parse_args(&args(&[
            "--filename=deletes.psv",
            "--table=sales",
            "--database=mydb",
            "--separator=|",
        ]))
        .unwrap();

        let Command::Delete(d) = cmd else {
            panic!("expected delete command");
        };
        assert_eq!(d.filename, Some(PathBuf::from("deletes.psv")));
        assert_eq!(d.table.as_deref(), Some("sales"));
        assert_eq!(d.database.as_deref(), Some("mydb"));
        assert_eq!(d.separator, Some(b'|'));
    }

    #[test]
    fn no_args_is_an_empty_delete() {
        let cmd = parse_args(&args(&[])).unwrap();
        let Command::Delete(d) = cmd else {
            panic!("expected delete command");
        };
        assert!(d.filename.is_none());
        assert!(d.table.is_none());
        assert!(d.database.is_none());
    }

    #[test]
    fn help_flag_wins() {
        let cmd = parse_args(&args(&["-t", "sales", "--help"])).unwrap();
        assert!(matches!(cmd, Command::Help));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn flag_missing_value_is_an_error() {
        assert!(parse_args(&args(&["-t"])).is_err());
    }

    #[test]
    fn multichar_separator_is_an_error() {
        assert!(parse_args(&args(&["--separator=||"])).is_err());
        assert!(parse_args(&args(&["--separator="])).is_err());
    }
}
