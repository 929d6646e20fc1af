//! AQI Dashboard CLI
//!
//! Terminal front end for the prediction backend:
//! - List the city directory
//! - Submit readings and show the predicted AQI with both charts
//! - Show the AQI history trend
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aqi_dashboard::config::generate_default_config;
use aqi_dashboard::{
    ApiClient, ChartSlot, Config, ConsoleNotifier, Dashboard, LoggingConfig, Pollutant,
    PredictionForm, SubmissionOutcome, TextCanvas, ViewSnapshot,
};

#[derive(Parser)]
#[command(name = "aqi-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Air-quality dashboard: predict AQI from pollutant readings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and list the city directory
    Cities,

    /// Predict AQI for a set of readings (µg/m³)
    Predict {
        /// City (default: the selector's default city)
        #[arg(long)]
        city: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        pm2_5: String,
        #[arg(long, allow_hyphen_values = true)]
        pm10: String,
        #[arg(long, allow_hyphen_values = true)]
        no2: String,
        #[arg(long, allow_hyphen_values = true)]
        so2: String,
        #[arg(long, allow_hyphen_values = true)]
        co: String,
        #[arg(long, allow_hyphen_values = true)]
        o3: String,
    },

    /// Show the AQI history trend
    History,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    // Search results are reported once the subscriber exists
    let (mut config, discovery) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let discovery = Config::discover(&Config::default_paths());
            (discovery.config.clone(), Some(discovery))
        }
    };
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);
    tracing::info!("AQI Dashboard v{}", env!("CARGO_PKG_VERSION"));
    if let Some(discovery) = &discovery {
        discovery.report();
    }
    tracing::info!("Backend: {}", config.api.base_url);

    let api = Arc::new(ApiClient::from_config(&config.api).context("failed to build HTTP client")?);
    let dashboard = Dashboard::new(api, &config, Arc::new(ConsoleNotifier));
    let canvas = TextCanvas::default();

    match cli.command {
        Commands::Cities => {
            dashboard.start().await;
            print_selector(&dashboard.snapshot().await);
        }

        Commands::Predict {
            city,
            pm2_5,
            pm10,
            no2,
            so2,
            co,
            o3,
        } => {
            dashboard.start().await;

            let city = match city {
                Some(city) => {
                    if !dashboard.view().select_city(&city).await {
                        tracing::warn!(%city, "city not in directory, submitting as-is");
                    }
                    city
                }
                None => dashboard.snapshot().await.selector.selected().to_string(),
            };

            let form = PredictionForm::new(city)
                .field(Pollutant::Pm25, pm2_5)
                .field(Pollutant::Pm10, pm10)
                .field(Pollutant::No2, no2)
                .field(Pollutant::So2, so2)
                .field(Pollutant::Co, co)
                .field(Pollutant::O3, o3);

            match dashboard.submit(&form).await {
                SubmissionOutcome::Succeeded(_) => {
                    print_result(&dashboard.snapshot().await, &form.city);
                    for slot in ChartSlot::ALL {
                        println!();
                        match dashboard.chart(slot).await {
                            Some(chart) => print!("{}", canvas.draw(&chart.spec)),
                            None => println!("{} chart unavailable", slot),
                        }
                    }
                }
                SubmissionOutcome::Superseded => {}
                SubmissionOutcome::Rejected(_) | SubmissionOutcome::Failed(_) => {
                    std::process::exit(1);
                }
            }
        }

        Commands::History => {
            if dashboard.refresh_trend().await.is_err() {
                eprintln!("History unavailable");
                std::process::exit(1);
            }
            if let Some(chart) = dashboard.chart(ChartSlot::Trend).await {
                print!("{}", canvas.draw(&chart.spec));
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aqi_dashboard={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write config to {:?}", path))?;
            println!("Wrote default config to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn print_selector(snapshot: &ViewSnapshot) {
    let selector = &snapshot.selector;
    for option in selector.options() {
        let marker = if option.value == selector.selected() { "*" } else { " " };
        if option.value.is_empty() {
            println!("{} ({})", marker, option.label);
        } else {
            println!("{} {}", marker, option.label);
        }
    }
}

fn print_result(snapshot: &ViewSnapshot, city: &str) {
    let result = &snapshot.panels.result;
    println!("City:     {}", city);
    println!("AQI:      {}", result.score_text);
    println!("Category: {}  [{}]", result.category_text, result.category_class);
}
