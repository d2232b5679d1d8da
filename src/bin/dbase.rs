use dbase::config::{default_config_path, load_config, Config};
use dbase::{Database, DbaseError, Result};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{info, Level};

const USAGE: &str = "usage: dbase [--config PATH] [URI] COMMAND [ARGS]

commands:
  tables          list table names
  exists TABLE    print whether TABLE exists
  query SQL       run SQL and print rows as JSON lines
  count SQL       print the number of rows SQL returns
  run FILE        execute every statement of a SQL script
  drop TABLE      drop TABLE if it exists
  drop-all        drop every table";

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let config = match read_config(&mut args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize the logging system using tracing subscriber
    let level = Level::from_str(config.log_level()).unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&config, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Consumes a leading `--config PATH`, falling back to the default location.
fn read_config(args: &mut Vec<String>) -> Result<Config> {
    if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            return Err(DbaseError::Config("--config needs a path".to_string()));
        }
        let path = args.remove(1);
        args.remove(0);
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_config(path),
        _ => Ok(Config::default()),
    }
}

fn run(config: &Config, mut args: Vec<String>) -> Result<()> {
    let uri_given = args.first().map_or(false, |arg| arg.contains("://"));
    let db = if uri_given {
        let uri = args.remove(0);
        Database::connect_with(&uri, &config.sqlite_options())?
    } else {
        Database::from_config(config)?
    };

    let command = args.first().cloned().unwrap_or_default();
    let argument = args.get(1).cloned();
    info!("running '{}'", command);

    let outcome = match (command.as_str(), argument) {
        ("tables", None) => db.table_names().map(|names| {
            for name in names {
                println!("{}", name);
            }
        }),
        ("exists", Some(table)) => db.table_exists(&table).map(|exists| println!("{}", exists)),
        ("query", Some(sql)) => db.execute(&sql).and_then(|rows| {
            for row in rows {
                println!("{}", serde_json::to_string(&row)?);
            }
            Ok(())
        }),
        ("count", Some(sql)) => db.count(&sql).map(|n| println!("{}", n)),
        ("run", Some(file)) => db
            .from_file(&file)
            .map(|n| println!("executed {} statements", n)),
        ("drop", Some(table)) => db.drop_table(&table),
        ("drop-all", None) => db.drop_tables(),
        _ => Err(DbaseError::InvalidInput(USAGE.to_string())),
    };

    db.close()?;
    outcome
}
