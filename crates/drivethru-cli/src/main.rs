use clap::{Parser, Subcommand};
use drivethru_core::{FranchiseMarker, RouteRequest};
use drivethru_locator::{LocatorConfig, RoutePipeline};
use drivethru_maps::MapsClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "drivethru-cli")]
#[command(about = "Find franchise locations along a driving route")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the route search once and print the results as JSON.
    Route {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Defaults to `DRIVETHRU_DEFAULT_FRANCHISE`.
        #[arg(long)]
        franchise: Option<String>,
        /// Print game markers (`{ locations }`) instead of `{ franchises }`.
        #[arg(long)]
        markers: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = drivethru_core::load_app_config()?;

    // Logs go to stderr so stdout stays valid JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Route {
            origin,
            destination,
            franchise,
            markers,
        } => {
            let request = RouteRequest::new(
                Some(origin.as_str()),
                Some(destination.as_str()),
                franchise.as_deref(),
                &config.default_franchise,
            )?;

            let client = MapsClient::with_base_url(
                &config.maps_api_key,
                config.maps_timeout_secs,
                &config.maps_base_url,
                &config.user_agent,
            )?;
            let pipeline = RoutePipeline::new(client, LocatorConfig::from_app_config(&config));
            let franchises = pipeline.run(&request).await?;
            tracing::info!(
                origin = %request.origin,
                destination = %request.destination,
                count = franchises.len(),
                "route search complete"
            );

            let output = if markers {
                let locations: Vec<FranchiseMarker> =
                    franchises.iter().map(FranchiseMarker::from).collect();
                serde_json::json!({ "locations": locations })
            } else {
                serde_json::json!({ "franchises": franchises })
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
