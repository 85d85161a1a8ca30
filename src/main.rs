use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use pawmatch_api::RestApi;
use pawmatch_core::DatasetConfig;
use pawmatch_recommend::{DisplayMode, RecommendConfig, Recommender};

/// Match adopters with shelter animals
#[derive(Parser, Debug)]
#[command(name = "pawmatch")]
#[command(about = "Recommends shelter animals from a clustering model", long_about = None)]
struct Args {
    /// Path to the clustered dataset CSV
    #[arg(short, long, default_value = "./data/pets.csv")]
    dataset: PathBuf,

    /// Path to the Gaussian mixture model artifact (JSON)
    #[arg(short, long, default_value = "./data/model.json")]
    model: PathBuf,

    /// Dataset column holding the precomputed cluster id
    #[arg(long, default_value = "cluster_gmm")]
    cluster_column: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8501)]
    http_port: u16,

    /// Number of candidates returned per request
    #[arg(long, default_value_t = pawmatch_recommend::DEFAULT_DISPLAY_COUNT)]
    display_count: usize,

    /// Randomly sample candidates instead of taking the first rows
    #[arg(long)]
    sample: bool,

    /// Seed for sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
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

    info!("Starting PawMatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);
    info!("Model: {:?}", args.model);

    let dataset_config = DatasetConfig {
        cluster_column: args.cluster_column.clone(),
        ..Default::default()
    };
    let config = RecommendConfig {
        display_count: args.display_count,
        mode: if args.sample { DisplayMode::Sample } else { DisplayMode::Head },
        seed: args.seed,
    };

    // Nothing is served until both files are loaded and validated
    let recommender = Arc::new(Recommender::from_paths(
        &args.dataset,
        &args.model,
        &dataset_config,
        config,
    )?);
    if recommender.dataset().is_empty() {
        tracing::warn!("Dataset has no rows; every recommendation will report no data available");
    }

    let http_port = args.http_port;
    let (http_handle, http_done) = spawn_http_server(recommender, http_port);

    info!("PawMatch started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = http_done => {
            match result {
                Ok(Err(e)) => eprintln!("HTTP server error: {}", e),
                Err(_) => eprintln!("HTTP server thread exited without reporting"),
                Ok(Ok(())) => info!("HTTP server stopped"),
            }
            http_handle.join().ok();
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Run the actix system on its own thread; the receiver resolves once the
/// server has stopped or failed to bind
fn spawn_http_server(
    recommender: Arc<Recommender>,
    port: u16,
) -> (std::thread::JoinHandle<()>, oneshot::Receiver<std::io::Result<()>>) {
    let (tx, rx) = oneshot::channel();
    let handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", port);
        let sys = actix_web::rt::System::new();
        let result = sys.block_on(RestApi::start(recommender, port));
        tx.send(result).ok();
    });
    (handle, rx)
}
