// src/main.rs
use clap::Parser;
use quake_fetcher::config::timeout_from_secs;
use quake_fetcher::{EarthquakeFetcher, ErrorPolicy, FetchMode, FetcherConfig};

#[derive(Parser, Debug)]
#[command(name = "quake_fetcher")]
#[command(about = "Fetch M2.5+ earthquakes around Japan from USGS and save them as GeoJSON")]
struct Args {
    /// Which snapshot to refresh
    #[arg(short, long, value_enum, default_value = "current-year")]
    mode: FetchMode,

    /// Refresh all three snapshots, one after another
    #[arg(long, conflicts_with = "mode")]
    all: bool,

    /// What to do when USGS cannot be reached or returns garbage
    #[arg(long, value_enum, default_value = "log-and-continue")]
    on_error: ErrorPolicy,

    /// Output directory (overrides QUAKE_FETCHER_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Event query endpoint (overrides QUAKE_FETCHER_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides QUAKE_FETCHER_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the fetch reports as JSON when done
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn modes(&self) -> Vec<FetchMode> {
        if self.all {
            FetchMode::ALL.to_vec()
        } else {
            vec![self.mode]
        }
    }

    /// CLI flags win over the environment.
    fn apply_overrides(&self, mut config: FetcherConfig) -> FetcherConfig {
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.as_str());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(timeout_from_secs(secs, "--timeout-secs"));
        }
        config
    }
}

fn setup_logging(debug: bool) {
    use env_logger::{Builder, Target};
    use log::LevelFilter;

    let mut builder = Builder::from_default_env();
    builder.target(Target::Stdout);

    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    builder.init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(args.debug);

    let config = args.apply_overrides(FetcherConfig::from_env()?);

    let fetcher = EarthquakeFetcher::new(config)?;
    let reports = match fetcher.fetch_all(&args.modes(), args.on_error).await {
        Ok(reports) => reports,
        Err(e) => {
            log::error!("Fetch aborted: {}", e);
            return Err(e.into());
        }
    };

    let skipped = reports.iter().filter(|r| !r.is_saved()).count();
    log::info!(
        "Done: {} snapshot(s) saved, {} skipped",
        reports.len() - skipped,
        skipped
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
