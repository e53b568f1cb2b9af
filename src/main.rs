use anyhow::Context;
use clap::Parser;
use hemicycle_api::RestApi;
use hemicycle_core::PipelineConfig;
use hemicycle_storage::SnapshotStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Group parliament members by roll-call votes and match users to them
#[derive(Parser, Debug)]
#[command(name = "hemicycle")]
#[command(about = "Roll-call vote clustering and member matching", long_about = None)]
struct Args {
    /// JSON pipeline configuration; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of member documents
    #[arg(long)]
    members_dir: Option<PathBuf>,

    /// Directory of ballot documents
    #[arg(long)]
    ballots_dir: Option<PathBuf>,

    /// Number of groups the linkage tree is cut into
    #[arg(long)]
    cluster_threshold: Option<usize>,

    /// Hide groups with fewer members than this
    #[arg(long)]
    min_group_size: Option<usize>,

    /// Where to write the dendrogram SVG
    #[arg(long, conflicts_with = "no_dendrogram")]
    dendrogram: Option<PathBuf>,

    /// Skip dendrogram rendering
    #[arg(long)]
    no_dendrogram: bool,

    /// Number of measures offered to users as questions
    #[arg(long)]
    exposed_measures: Option<usize>,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {:?}", path))?;
                serde_json::from_str(&raw).with_context(|| format!("parsing config {:?}", path))?
            }
            None => PipelineConfig::default(),
        };

        if let Some(dir) = &self.members_dir {
            config.members_dir = dir.clone();
        }
        if let Some(dir) = &self.ballots_dir {
            config.ballots_dir = dir.clone();
        }
        if let Some(threshold) = self.cluster_threshold {
            config.cluster_threshold = threshold;
        }
        if let Some(min) = self.min_group_size {
            config.min_group_size = min;
        }
        if let Some(path) = &self.dendrogram {
            config.dendrogram_path = Some(path.clone());
        }
        if self.no_dendrogram {
            config.dendrogram_path = None;
        }
        if let Some(n) = self.exposed_measures {
            config.exposed_measures = n;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting hemicycle v{}", env!("CARGO_PKG_VERSION"));
    let config = args.pipeline_config()?;
    info!("Members directory: {:?}", config.members_dir);
    info!("Ballots directory: {:?}", config.ballots_dir);
    info!(
        "Cutting into {} groups, hiding groups under {} members",
        config.cluster_threshold, config.min_group_size
    );
    info!("HTTP API port: {}", args.http_port);

    let store = Arc::new(SnapshotStore::open(config)?);
    let snapshot = store.current();
    if snapshot.matrix().is_empty() {
        warn!("No votes loaded; /submit rejects every measure until a reload succeeds");
    }
    info!(
        "Snapshot initialized: {} members, {} measures, {} skipped documents",
        snapshot.matrix().n_members(),
        snapshot.matrix().n_measures(),
        snapshot.skipped().len()
    );
    drop(snapshot);

    let store_http = store.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(store_http, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("hemicycle started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
