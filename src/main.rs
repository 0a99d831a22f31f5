//! Locmemo CLI - record, list and delete saved locations

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::Term;
use locmemo::config::{self, LocmemoConfig};
use locmemo::location::{FixedLocation, Permission, StaticPermission};
use locmemo::storage::{RecordStore, SqliteStore};
use locmemo::ui::{self, Icons};
use locmemo::{Confirmation, Recorder};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "locmemo")]
#[command(version)]
#[command(about = "Location memo - save where you are with a label and a note")]
#[command(long_about = r#"
Locmemo keeps a local list of locations, each with a label, a note and the
date and time it was captured.

Example usage:
  locmemo init
  locmemo add --label Home --note "front door" --lat 60.17 --lon 24.94
  locmemo list
  locmemo delete 3
  locmemo clear --yes
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress human-readable output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Save the current location
    Add {
        /// Identifier for the place
        #[arg(short, long, default_value = "")]
        label: String,

        /// Free-text note or directions
        #[arg(short, long, default_value = "")]
        note: String,

        /// Latitude of the current position
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the current position
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Answer the location access request with "denied"
        #[arg(long)]
        deny: bool,
    },

    /// List saved locations
    List {
        /// Render as a table
        #[arg(short, long)]
        table: bool,
    },

    /// Delete one saved location
    Delete {
        /// Id of the location
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all saved locations
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show statistics about the store
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

fn emit_success(mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "status": "ok",
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(log_directive(true))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_directive(false)))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    if cli.quiet || !output_mode.is_human() {
        locmemo::output::force_quiet();
    }

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(&config_path))
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let config = loaded.unwrap_or_default();
    let database = resolve_database(cli.database.as_deref(), &config);

    match cli.command {
        Commands::Init { force } => {
            run_init(&config_path, &database, config, force, output_mode)?;
        }

        Commands::Add { label, note, lat, lon, deny } => {
            let mut recorder = open_recorder(&database, &config)?;
            let permission = if deny { Permission::Denied } else { config.permission };
            let provider = match (lat, lon) {
                (Some(lat), Some(lon)) => FixedLocation::new(lat, lon),
                _ => config.location_provider(),
            };

            let position = match recorder.begin_capture(&StaticPermission(permission), &provider) {
                Ok(position) => position,
                Err(e) => {
                    ui::error(recorder.error_message().unwrap_or(&e.to_string()));
                    return Err(e.into());
                }
            };
            ui::info("Location", &format!("{}, {}", position.latitude, position.longitude));

            let id = recorder
                .save_capture(&label, &note)
                .context("failed to save location")?;
            ui::success(&format!("Saved \"{}\" (#{})", label, id));

            let saved = recorder.records().iter().find(|r| r.id == id);
            emit_success(output_mode, "add", serde_json::json!({ "id": id, "record": saved }))?;
        }

        Commands::List { table } => {
            let recorder = open_recorder(&database, &config)?;
            let records = recorder.records();
            if output_mode.is_human() && !locmemo::output::is_quiet() {
                ui::header("Saved locations");
                if records.is_empty() {
                    println!("{}", ui::muted("No saved locations"));
                } else if table {
                    println!("{}", ui::records_table(records));
                } else {
                    for record in records {
                        ui::record(record);
                    }
                }
            }
            emit_success(output_mode, "list", serde_json::to_value(records)?)?;
        }

        Commands::Delete { id, yes } => {
            let mut recorder = open_recorder(&database, &config)?;
            let confirmation = recorder.request_delete(id);
            run_confirmation(&mut recorder, confirmation, yes, output_mode)?;
        }

        Commands::Clear { yes } => {
            let mut recorder = open_recorder(&database, &config)?;
            let confirmation = recorder.request_clear();
            run_confirmation(&mut recorder, confirmation, yes, output_mode)?;
        }

        Commands::Stats => {
            let count = open_store(&database)?.count()?;
            let path = database.display().to_string();
            if output_mode.is_human() && !locmemo::output::is_quiet() {
                println!("{} Locmemo statistics", Icons::STATS);
                println!(
                    "{}",
                    ui::stats_table(&[("Records", &count.to_string()), ("Database", &path)])
                );
            }
            emit_success(
                output_mode,
                "stats",
                serde_json::json!({ "records": count, "database": path }),
            )?;
        }
    }

    Ok(())
}

fn log_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn resolve_database(flag: Option<&Path>, config: &LocmemoConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| config::default_database_path_in(Path::new(".")))
}

/// Opening the store is the one unrecoverable failure
fn open_store(database: &Path) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(database)?;
    SqliteStore::open(database).map_err(|e| {
        tracing::error!("Cannot open database {}: {}", database.display(), e);
        anyhow::Error::new(e).context(format!("cannot open database {}", database.display()))
    })
}

/// Build the recorder with a loaded snapshot. A failed first load is not fatal.
fn open_recorder(database: &Path, config: &LocmemoConfig) -> anyhow::Result<Recorder<SqliteStore>> {
    let mut recorder = Recorder::new(open_store(database)?, config.display.clone());
    if let Err(e) = recorder.refresh() {
        ui::warn(&format!("Could not load saved locations: {}", e));
    }
    Ok(recorder)
}

fn run_init(
    config_path: &Path,
    database: &Path,
    mut config: LocmemoConfig,
    force: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    config.database = Some(database.display().to_string());
    config::write_config(config_path, &config, force)?;
    open_store(database)?;

    ui::success(&format!("Wrote {}", config_path.display()));
    ui::info(&format!("{} Database", Icons::DATABASE), &database.display().to_string());
    emit_success(
        output_mode,
        "init",
        serde_json::json!({
            "config": config_path.display().to_string(),
            "database": database.display().to_string(),
        }),
    )
}

fn run_confirmation<S: RecordStore>(
    recorder: &mut Recorder<S>,
    confirmation: Confirmation,
    yes: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let accepted = if yes {
        true
    } else if Term::stderr().is_term() {
        ui::confirm(confirmation.prompt())?
    } else {
        recorder.cancel();
        anyhow::bail!("refusing to delete without confirmation (use --yes)");
    };

    if !accepted {
        recorder.cancel();
        ui::warn("Cancelled");
        return emit_success(output_mode, "cancelled", serde_json::Value::Null);
    }

    let deleted = recorder.confirm().context("delete failed")?;

    let command = match deleted.confirmation {
        Confirmation::DeleteOne(_) => "delete",
        Confirmation::DeleteAll => "clear",
    };
    if deleted.removed == 0 {
        ui::warn(&deleted.summary());
    } else {
        ui::success(&format!("{} {}", Icons::DEL, deleted.summary()));
    }
    emit_success(output_mode, command, serde_json::json!({ "removed": deleted.removed }))
}
