//! Style Sage CLI
//!
//! Drives the same dashboard controller as the web UI against a live backend:
//! - `wardrobe`: list the demo user's wardrobe
//! - `add`: analyze an image URL (or the demo image) into a wardrobe item
//! - `outfit`: recommendation from the wardrobe
//! - `suggest`: recommendation from body metrics only

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::time::Duration;
use stylesage_core::config::{self, ClientConfig};
use stylesage_core::dashboard::{DEFAULT_OCCASION, DEFAULT_WEATHER};
use stylesage_core::{BodyProfile, BodyType, CategoryFilter, Dashboard, HttpBackend};
use tracing::debug;

mod render;

#[derive(Parser, Debug)]
#[command(name = "stylesage")]
#[command(about = "Wardrobe curation from the terminal")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (overrides STYLESAGE_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Give up on a request after this many seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List wardrobe items
    Wardrobe {
        /// Category to show
        #[arg(long, default_value = "all")]
        filter: CategoryFilter,
    },
    /// Analyze an image and add it to the wardrobe
    Add {
        /// Image URL to analyze
        #[arg(required_unless_present = "demo")]
        image_url: Option<String>,

        /// Use the bundled demo image
        #[arg(long, conflicts_with = "image_url")]
        demo: bool,
    },
    /// Outfit built from the wardrobe
    Outfit {
        #[arg(long, default_value = DEFAULT_OCCASION)]
        occasion: String,

        #[arg(long, default_value = DEFAULT_WEATHER)]
        weather: String,
    },
    /// Outfit from body metrics, no wardrobe needed
    Suggest {
        #[arg(long, default_value_t = 180.0)]
        height: f64,

        #[arg(long, default_value_t = 75.0)]
        weight: f64,

        #[arg(long, default_value = "rectangle")]
        body_type: BodyType,

        #[arg(long, default_value = "classic")]
        style: String,
    },
}

fn resolve_config(args: &Args) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid Style Sage configuration")?;
    if let Some(url) = &args.backend_url {
        config = config.with_backend_url(url);
    }
    if let Some(secs) = args.timeout.filter(|s| *s > 0) {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_environment();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,stylesage_core=info")),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    debug!("Using backend {}", config.backend_base_url);

    let backend = HttpBackend::new(&config)?;
    let dashboard = Dashboard::new(backend, &config);

    match args.command {
        Commands::Wardrobe { filter } => {
            dashboard.mount().await.context("Failed to load wardrobe")?;
            dashboard.set_filter(filter);
            println!("{}", dashboard.with_state(render::wardrobe));
        }
        Commands::Add { image_url, demo } => {
            dashboard.mount().await.context("Failed to load wardrobe")?;
            let outcome = if demo {
                dashboard.add_demo_item().await
            } else {
                dashboard.set_image_url(image_url.unwrap_or_default());
                dashboard.add_custom_item().await
            };
            let item = outcome.context("Failed to analyze image")?;
            println!("Added {}", render::item_line(&item));
            println!("{}", dashboard.with_state(render::wardrobe));
        }
        Commands::Outfit { occasion, weather } => {
            dashboard.mount().await.context("Failed to load wardrobe")?;
            dashboard.set_occasion(occasion);
            dashboard.set_weather(weather);
            let rec = dashboard
                .request_recommendation()
                .await
                .context("Failed to get a recommendation")?;
            println!("{}", render::recommendation(&rec));
        }
        Commands::Suggest {
            height,
            weight,
            body_type,
            style,
        } => {
            dashboard.set_profile(BodyProfile {
                height_cm: height,
                weight_kg: weight,
                body_type,
                style_choice: style,
            });
            let rec = dashboard
                .quick_suggest()
                .await
                .context("Failed to get a suggestion")?;
            println!("{}", render::recommendation(&rec));
        }
    }

    Ok(())
}
