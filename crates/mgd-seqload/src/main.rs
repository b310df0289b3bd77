//! MGD sequence load - command line entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use mgd_common::logging::{init_logging, LogConfig, LogLevel};
use mgd_seqload::interpret::{CoordinateInterpreter, DeleteInterpreter};
use mgd_seqload::reader::RecordReader;
use mgd_seqload::sink::JsonLinesSink;
use mgd_seqload::{
    build_sequence_interpreter, run_load, CoordinateLoadConfig, CoordinateLoader, DeleteLoader,
    InterpreterKind, LoadStats, LookupSet, RecordLoader, SequenceLoadConfig, SequenceLoader,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mgd-seqload")]
#[command(author, version, about = "Load sequence and coordinate feeds into MGD")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load sequence records (run constants come from SEQ_* / MS_* variables)
    Sequences {
        /// Input file; `.gz` files are decompressed
        #[arg(short, long)]
        input: PathBuf,

        /// Record format: embl, genbank, fasta or mgs_assembly
        #[arg(short, long)]
        format: InterpreterKind,

        #[command(flatten)]
        lookups: LookupArgs,

        /// JSON-lines output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Load coordinates (run constants come from COORD_* variables)
    Coordinates {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// First feature key to assign
        #[arg(long, default_value_t = 1)]
        start_key: i64,
    },

    /// Resolve a delete list of accession ids
    Delete {
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        lookups: LookupArgs,

        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct LookupArgs {
    /// Directory of term<TAB>key lookup files
    #[arg(short, long, env = "SEQ_LOOKUP_DIR")]
    lookups: Option<PathBuf>,

    /// MGD connection string; lookups are read from the database when set
    #[cfg(feature = "database")]
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("mgd-seqload")
        .build();

    // Environment variables take precedence
    let log_config = log_config.with_env()?;
    let _guard = init_logging(&log_config)?;

    match cli.command {
        Command::Sequences {
            input,
            format,
            lookups,
            output,
        } => {
            let config = SequenceLoadConfig::from_env().context("Invalid sequence load configuration")?;
            let lookups = load_lookups(&lookups).await?;
            let interpreter = build_sequence_interpreter(format, &config)?;
            info!(%format, provider = %config.provider, input = %input.display(), "Loading sequences");

            let mut loader = SequenceLoader::new(interpreter, &lookups, config.start_key);
            run(&mut loader, &input, format, &output)?;
        },
        Command::Coordinates {
            input,
            output,
            start_key,
        } => {
            let config = CoordinateLoadConfig::from_env().context("Invalid coordinate load configuration")?;
            info!(collection = %config.collection_name, input = %input.display(), "Loading coordinates");

            let mut loader = CoordinateLoader::new(CoordinateInterpreter::new(config), start_key);
            run(&mut loader, &input, InterpreterKind::Coordinate, &output)?;
        },
        Command::Delete {
            input,
            lookups,
            output,
        } => {
            let config = SequenceLoadConfig::from_env().context("Invalid sequence load configuration")?;
            let lookups = load_lookups(&lookups).await?;
            info!(logical_db = %config.logical_db, input = %input.display(), "Resolving deletes");

            let mut loader = DeleteLoader::new(DeleteInterpreter::new(config), &lookups);
            run(&mut loader, &input, InterpreterKind::Delete, &output)?;
        },
    }

    Ok(())
}

fn run(loader: &mut dyn RecordLoader, input: &Path, kind: InterpreterKind, output: &Path) -> Result<LoadStats> {
    let records = RecordReader::open(input, kind.record_delimiter())
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let mut sink = JsonLinesSink::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let spinner = create_spinner(&format!("Loading {}", input.display()))?;
    let stats = run_load(loader, records.inspect(|_| spinner.inc(1)), &mut sink)?;
    spinner.finish_with_message(format!(
        "{} loaded, {} skipped, {} failed",
        stats.records_loaded,
        stats.records_skipped,
        stats.failed()
    ));

    info!(rows = sink.rows(), output = %output.display(), "Wrote load rows");
    Ok(stats)
}

async fn load_lookups(args: &LookupArgs) -> Result<LookupSet> {
    #[cfg(feature = "database")]
    if let Some(ref url) = args.database_url {
        let pool = sqlx::PgPool::connect(url)
            .await
            .context("Failed to connect to MGD")?;
        return Ok(mgd_seqload::lookup::load_from_database(&pool).await?);
    }

    let dir = args
        .lookups
        .as_ref()
        .context("A lookup directory (--lookups or SEQ_LOOKUP_DIR) is required")?;
    LookupSet::from_dir(dir).with_context(|| format!("Failed to load lookups from {}", dir.display()))
}

fn create_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} records")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
