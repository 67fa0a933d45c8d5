//! inistore CLI
//!
//! Command-line interface for reading and editing an inistore file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use inistore::{Config, Engine, FileStorage};
use tracing_subscriber::{fmt, EnvFilter};

/// inistore CLI
#[derive(Parser, Debug)]
#[command(name = "inistore-cli")]
#[command(about = "Read and edit grouped key/value configuration files")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "config.ini")]
    file: PathBuf,

    /// Join `"a` / `b"` neighbours the quote pass left split
    #[arg(long)]
    merge_adjacent_quotes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the first value of a record
    Get {
        /// Group name (empty for the default group)
        group: String,

        /// Record key
        key: String,

        /// Printed when the record is missing or blank
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print every value of a record, one per line
    Values {
        group: String,
        key: String,
    },

    /// Replace a record and save the file
    Set {
        group: String,
        key: String,

        /// One or more values
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Remove a record and save the file
    Remove {
        group: String,
        key: String,
    },

    /// Remove a whole group and save the file
    RemoveGroup {
        group: String,
    },

    /// List group names
    Groups,

    /// Print the canonical form of the file
    Dump,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,inistore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> inistore::Result<()> {
    let existing = args.file.exists();
    let config = Config::builder()
        .storage(FileStorage::new(&args.file))
        .merge_adjacent_quotes(args.merge_adjacent_quotes)
        .build();

    let engine = Engine::new(config)?;
    if existing {
        engine.load_blocking()?;
    } else {
        tracing::info!("{} does not exist yet, starting empty", args.file.display());
    }
    let store = engine.handle();

    match args.command {
        Commands::Get { group, key, default } => {
            match store.value(&group, &key).or(default) {
                Some(value) => println!("{}", value),
                None => process::exit(2),
            }
        }
        Commands::Values { group, key } => match store.values(&group, &key) {
            Some(values) => values.iter().for_each(|value| println!("{}", value)),
            None => process::exit(2),
        },
        Commands::Set { group, key, values } => {
            // Records keep their first value, so replace explicitly
            store.remove_record(&group, &key);
            store.set_value(&group, &key, values);
            engine.store_blocking()?;
        }
        Commands::Remove { group, key } => {
            if store.remove_record(&group, &key).is_none() {
                tracing::warn!("No record {:?} in group {:?}", key, group);
            }
            engine.store_blocking()?;
        }
        Commands::RemoveGroup { group } => {
            if store.remove_group(&group).is_none() {
                tracing::warn!("No group {:?}", group);
            }
            engine.store_blocking()?;
        }
        Commands::Groups => {
            for name in store.group_names() {
                println!("[{}]", name);
            }
        }
        Commands::Dump => {
            println!("{}", inistore::format::serialize_to_string(&store));
        }
    }

    Ok(())
}
