use anyhow::{bail, Context, Result};
use clap::Parser;
use futures_util::future::AbortHandle;
use hydromap_core::{CoreConfig, CoreError, InfrastructureService};
use hydromap_network::models::types::Bounds;
use std::path::{Path, PathBuf};

mod output;

use output::write_network_geojson;

#[derive(Parser, Debug)]
#[command(
    name = "network-export",
    author,
    version,
    about = "Export the pipeline network as styled GeoJSON",
    long_about = "Runs one fetch cycle against the operations backend: lists every station, \
                  terminal, production field and pipeline, resolves pipeline paths from \
                  segments or reference points, separates coincident routes into curves \
                  and simplifies them.\n\n\
                  The result is written as a GeoJSON FeatureCollection with simplestyle \
                  properties (stroke, stroke-width, stroke-opacity, stroke-dasharray)."
)]
struct Args {
    /// Output GeoJSON file
    #[arg(short, long)]
    output: PathBuf,

    /// JSON configuration file; command-line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend API root, e.g. https://ops.example/api
    #[arg(long)]
    base_url: Option<String>,

    /// Only export entities inside "south,west,north,east"
    #[arg(long, value_parser = parse_bounds)]
    bounds: Option<Bounds>,

    /// Items requested per list page
    #[arg(long)]
    page_size: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Douglas-Peucker tolerance in degrees (0 keeps every point)
    #[arg(long)]
    simplify_tolerance: Option<f64>,

    /// Offset step between coincident routes, as a fraction of the chord
    #[arg(long)]
    curve_offset: Option<f64>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_bounds(value: &str) -> std::result::Result<Bounds, String> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid number in bounds: {e}"))?;

    match parts.as_slice() {
        &[south, west, north, east] => {
            Bounds::new(north, south, east, west).map_err(|e| e.to_string())
        }
        _ => Err(format!("expected 4 values (south,west,north,east), got {}", parts.len())),
    }
}

fn load_config(path: Option<&Path>) -> Result<CoreConfig> {
    let Some(path) = path else {
        return Ok(CoreConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn apply_overrides(config: &mut CoreConfig, args: &Args) {
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(timeout) = args.timeout_secs {
        config.request_timeout_secs = timeout;
    }
    if let Some(tolerance) = args.simplify_tolerance {
        config.render.simplify_tolerance = tolerance;
    }
    if let Some(offset) = args.curve_offset {
        config.render.curves.base_offset = offset;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    if config.page_size == 0 {
        bail!("Page size must be at least 1");
    }

    log::info!("=== Pipeline Network Export ===");
    log::info!("Backend: {}", config.base_url);
    log::info!("Output: {}", args.output.display());

    let service = InfrastructureService::from_config(config.clone())
        .context("Failed to create backend client")?;

    // Ctrl-C drops every in-flight request
    let (abort, registration) = AbortHandle::new_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling fetch");
            abort.abort();
        }
    });

    log::info!("");
    log::info!("Phase 1: Fetching infrastructure...");
    let mut dataset = match service.get_all_infrastructure_cancellable(registration).await {
        Err(CoreError::Cancelled) => bail!("Fetch cancelled"),
        other => other.context("Failed to fetch infrastructure")?,
    };
    log::info!(
        "  {} facilities, {} pipelines ({} excluded)",
        dataset.facility_count(),
        dataset.pipelines.len(),
        dataset.excluded_pipelines.len()
    );
    for id in &dataset.excluded_pipelines {
        log::debug!("  Pipeline {} has no drawable path", id);
    }

    if let Some(bounds) = &args.bounds {
        dataset = dataset.in_bounds(bounds);
        log::info!(
            "  {} facilities, {} pipelines inside bounds",
            dataset.facility_count(),
            dataset.pipelines.len()
        );
    }

    log::info!("");
    log::info!("Phase 2: Rendering routes...");
    let routes = dataset.render(&config.render);
    let points: usize = routes.iter().map(|r| r.path.len()).sum();
    log::info!("  {} routes, {} points after simplification", routes.len(), points);

    log::info!("");
    log::info!("Phase 3: Writing output...");
    let count = write_network_geojson(&dataset, &routes, &args.output)
        .context("Failed to write network GeoJSON")?;

    log::info!("");
    log::info!("Wrote {} features to {}", count, args.output.display());
    log::info!("Done!");

    Ok(())
}
