use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sheet2frames::model::sheet::RemainderPolicy;
use sheet2frames::pipeline::fetcher::{DEFAULT_MAX_BODY_BYTES, HttpFetcher};
use sheet2frames::pipeline::fs_ops::prepare_output_dir;
use sheet2frames::{Catalog, Config, PipelineWorker, Preset, report};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Dragon,
    Knight,
    All,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Dragon => Preset::Dragon,
            PresetArg::Knight => Preset::Knight,
            PresetArg::All => Preset::All,
        }
    }
}

/// Download sprite sheets and slice them into numbered frame PNGs.
#[derive(Debug, Parser)]
#[command(name = "sheet2frames", version, about, long_about = None)]
struct Cli {
    /// Built-in sheet catalog to run
    #[arg(long, value_enum, default_value = "all")]
    preset: PresetArg,

    /// TOML catalog file; replaces the preset
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Overrides the catalog's base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Directory frame PNGs are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Exit with status 1 and a failure summary if any sheet fails
    #[arg(long)]
    strict: bool,

    /// Number of sheets processed at once
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// How leftover columns are handled when the width does not divide evenly
    /// (truncate or distribute)
    #[arg(long, default_value = "truncate")]
    remainder: RemainderPolicy,

    /// Largest sheet download accepted, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: u64,

    /// Print the selected catalog as TOML and exit
    #[arg(long)]
    dump_catalog: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sheet2frames=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut catalogs = match &cli.catalog {
        Some(path) => vec![Catalog::load_from_file(path)?],
        None => Preset::from(cli.preset).catalogs(),
    };
    if let Some(base_url) = &cli.base_url {
        for catalog in &mut catalogs {
            catalog.base_url = base_url.clone();
        }
    }

    if cli.dump_catalog {
        for catalog in &catalogs {
            println!("{}", catalog.to_toml_string()?);
        }
        return Ok(());
    }

    let config = Config::default()
        .with_output_dir(cli.output_dir)
        .with_strict(cli.strict)
        .with_jobs(cli.jobs)
        .with_remainder(cli.remainder)
        .with_max_body_bytes(cli.max_body_bytes);

    prepare_output_dir(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let fetcher = HttpFetcher::new().with_max_body_bytes(config.max_body_bytes);
    let (tx, rx) = crossbeam_channel::unbounded();
    let tagged = config.jobs > 1;
    let strict = config.strict;

    let handle = PipelineWorker::new(fetcher, config, tx).start(catalogs);
    for msg in rx {
        if let Some(line) = report::render(&msg, tagged) {
            println!("{}", line);
        }
    }
    let run = handle
        .join()
        .map_err(|_| anyhow!("pipeline worker panicked"))?;

    if strict && let Some(summary) = report::failure_summary(&run) {
        eprintln!("{}", summary);
    }
    std::process::exit(run.exit_code(strict));
}
