//! Evaluate a star field and write the render buffers as JSON
//!
//! The input is either a complete request message or a catalog file plus
//! the request parameters on the command line:
//!
//! ```text
//! render_starfield --request request.json -o scene.json
//! render_starfield --tap gaia_sample.json --year 2030 --mag-limit 12 --hosts hosts.json
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use starcat::{HostIndex, SourceCatalog};
use starscene::{Pipeline, PipelineConfig, PipelineRequest, RandomSource};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute renderable star buffers from a catalog")]
struct Args {
    /// Complete request message (sources, referenceYear, magLimit, hostIds)
    #[arg(long, conflicts_with_all = ["tap", "catalog"])]
    request: Option<PathBuf>,

    /// Saved Gaia TAP JSON response
    #[arg(long, conflicts_with = "catalog")]
    tap: Option<PathBuf>,

    /// JSON array of source records
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Reference year to propagate positions to
    #[arg(long, default_value_t = 2016.0)]
    year: f64,

    /// Limiting magnitude
    #[arg(long, default_value_t = 14.0)]
    mag_limit: f64,

    /// JSON array of exoplanet host identifiers
    #[arg(long)]
    hosts: Option<PathBuf>,

    /// Pipeline configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed random seed, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate on the calling thread only
    #[arg(long, default_value_t = false)]
    serial: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_request(args: &Args) -> anyhow::Result<PipelineRequest> {
    if let Some(path) = &args.request {
        return PipelineRequest::from_json_file(path)
            .with_context(|| format!("Failed to read request {}", path.display()));
    }

    let catalog = match (&args.tap, &args.catalog) {
        (Some(path), _) => SourceCatalog::from_tap_file(path)
            .with_context(|| format!("Failed to read TAP response {}", path.display()))?,
        (None, Some(path)) => SourceCatalog::from_json_file(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?,
        (None, None) => bail!("One of --request, --tap or --catalog is required"),
    };

    let mut request = PipelineRequest::new(catalog.shared(), args.year, args.mag_limit);
    if let Some(path) = &args.hosts {
        let hosts = HostIndex::from_json_file(path)
            .with_context(|| format!("Failed to read host list {}", path.display()))?;
        info!("Loaded {} host identifiers", hosts.len());
        request = request.with_hosts(hosts);
    }
    request.validate()?;
    Ok(request)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.random = RandomSource::Seeded(seed);
    }
    if args.serial {
        config.parallel = false;
    }

    let request = load_request(&args)?;
    info!(
        "Evaluating {} sources at epoch {} with limiting magnitude {}",
        request.len(),
        request.reference_year,
        request.mag_limit
    );

    let pipeline = Pipeline::new(config)?;
    let started = Instant::now();
    let result = pipeline.run(&request)?;
    info!(
        "Emitted {} of {} sources in {:?}",
        result.len(),
        result.stats.input,
        started.elapsed()
    );

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    serde_json::to_writer(&mut writer, &result)?;
    writer.flush()?;
    Ok(())
}
