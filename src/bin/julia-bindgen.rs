// src/bin/julia-bindgen.rs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use julia_bindgen::{
    BindingsGenerator, DocDatabase, GeneratorConfig, JsonClassDb, JsonDocDatabase, NoDocs,
};

const LOG_ENV: &str = "JULIA_BINDGEN_LOG";

/// Generate Julia bindings from a host class database dump.
#[derive(Debug, Parser)]
#[command(name = "julia-bindgen", version)]
struct Cli {
    /// Directory the generated sources are written to.
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// JSON dump of the host class database.
    #[arg(long, value_name = "FILE")]
    api: PathBuf,

    /// JSON dump of the class documentation.
    #[arg(long, value_name = "FILE")]
    docs: Option<PathBuf>,

    /// The host was built with double-precision reals.
    #[arg(long)]
    real_is_double: bool,

    /// Also emit classes from the editor API.
    #[arg(long)]
    include_editor_api: bool,

    /// Only log errors.
    #[arg(long, short)]
    quiet: bool,
}

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let db = JsonClassDb::from_path(&cli.api).context("loading the class database")?;
    let docs: Box<dyn DocDatabase> = match &cli.docs {
        Some(path) => {
            Box::new(JsonDocDatabase::from_path(path).context("loading the documentation")?)
        }
        None => Box::new(NoDocs),
    };

    let config = GeneratorConfig::default()
        .with_real_is_double(cli.real_is_double)
        .with_editor_api(cli.include_editor_api);

    let mut generator = BindingsGenerator::new(config);
    generator.initialize(&db, docs.as_ref());
    generator
        .generate_sources(&cli.output_dir)
        .with_context(|| format!("generating sources in '{}'", cli.output_dir.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
