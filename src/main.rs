use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use cluster_seeder::cluster::{ClusterClient, ClusterOps, SeedError};
use cluster_seeder::config::{load_config_or_default, SeederConfig};
use cluster_seeder::lifecycle::{wait_for_signal, Shutdown};
use cluster_seeder::observability::{logging, metrics};
use cluster_seeder::resilience::RetryPolicy;
use cluster_seeder::seeder::{SeedExecutor, SeedPlan};
use cluster_seeder::web::{AppState, WebServer};

#[derive(Parser)]
#[command(name = "cluster-seeder")]
#[command(about = "Seed a Kubernetes demo environment", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Without one, the stock demo is seeded.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create all demo resources in order
    Apply {
        /// Block until every resource reports ready
        #[arg(long)]
        wait: bool,

        /// Readiness deadline in seconds (with --wait)
        #[arg(long, default_value_t = 120)]
        wait_timeout_secs: u64,
    },
    /// Delete the demo resources in reverse order
    Destroy,
    /// Print the ordered seed plan without contacting the cluster
    Plan,
    /// Show the current state of each planned resource
    Status,
    /// Run the status web server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config_or_default(cli.config.as_deref())?;

    logging::init(&config.observability.log_level);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        namespace = %config.cluster.namespace,
        "cluster-seeder starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let plan = SeedPlan::from_config(&config);

    match cli.command {
        Commands::Plan => {
            print!("{}", plan.render());
        }
        Commands::Apply {
            wait,
            wait_timeout_secs,
        } => {
            let executor = connect_executor(&config).await?;
            let report = executor.apply(&plan).await?;
            for (i, step) in report.steps.iter().enumerate() {
                println!(
                    "{:>2}. {:<10} {:<20} {:?} ({} attempt{})",
                    i + 1,
                    step.kind.as_str(),
                    step.name,
                    step.outcome,
                    step.attempts,
                    if step.attempts == 1 { "" } else { "s" }
                );
            }
            println!(
                "Demo resources created in namespace '{}'.",
                plan.namespace()
            );

            if wait {
                executor
                    .wait_ready(&plan, Duration::from_secs(wait_timeout_secs))
                    .await?;
                println!("All resources ready.");
            }
        }
        Commands::Destroy => {
            let executor = connect_executor(&config).await?;
            let report = executor.destroy(&plan).await?;
            for (i, step) in report.steps.iter().enumerate() {
                println!(
                    "{:>2}. {:<10} {:<20} {:?}",
                    i + 1,
                    step.kind.as_str(),
                    step.name,
                    step.outcome
                );
            }
            println!(
                "Demo resources removed from namespace '{}'.",
                plan.namespace()
            );
        }
        Commands::Status => {
            let executor = connect_executor(&config).await?;
            for step in executor.status(&plan).await? {
                println!("{:<10} {:<20} {}", step.kind.as_str(), step.name, step.state);
            }
        }
        Commands::Serve => {
            let cluster: Arc<dyn ClusterOps> =
                Arc::new(ClusterClient::connect(&config.cluster).await?);
            let executor = Arc::new(SeedExecutor::new(
                cluster,
                RetryPolicy::new(&config.retries),
            ));
            let state = AppState {
                executor,
                plan: Arc::new(plan),
            };

            let server = WebServer::new(state, &config.web);
            let listener = tokio::net::TcpListener::bind(&config.web.bind_address).await?;

            let shutdown = Shutdown::new();
            let server_shutdown = shutdown.subscribe();
            tokio::spawn(async move {
                wait_for_signal().await;
                shutdown.trigger();
            });

            server.run(listener, server_shutdown).await?;
        }
    }

    tracing::info!("Done");
    Ok(())
}

async fn connect_executor(config: &SeederConfig) -> Result<SeedExecutor<ClusterClient>, SeedError> {
    let cluster = ClusterClient::connect(&config.cluster).await?;
    Ok(SeedExecutor::new(
        cluster,
        RetryPolicy::new(&config.retries),
    ))
}
