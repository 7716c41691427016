use std::{process::ExitCode, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, Settings},
    Field, HttpPredictionTransport, InputModel, RequestController, RequestState,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "cropcast", version, about = "Crop yield predictions from the command line")]
struct Args {
    /// Base URL of the prediction service (overrides cropcast.toml and env).
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Transport timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one prediction request.
    Predict {
        #[arg(long, default_value = "")]
        country: String,
        #[arg(long, default_value = "")]
        province: String,
        #[arg(long, default_value = "")]
        product: String,
        #[arg(long, default_value = "")]
        season: String,
        /// Days; non-numeric text counts as 0.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        time_to_harvest: String,
        /// Hectares.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        area: String,
        /// Tons.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        production: String,
    },
    /// Show the service's welcome document.
    Info,
    /// List the accepted products and seasons.
    Options,
}

fn resolve_settings(args: &Args) -> Settings {
    let mut settings = load_settings();
    if let Some(api_url) = &args.api_url {
        settings.api_url = api_url.clone();
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    settings
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn transport(settings: &Settings) -> Result<HttpPredictionTransport> {
    HttpPredictionTransport::new(&settings.api_url, settings.request_timeout())
        .with_context(|| format!("failed to configure transport for {}", settings.api_url))
}

async fn run_predict(settings: &Settings, entries: [(Field, String); 7]) -> Result<ExitCode> {
    let mut model = InputModel::new();
    for (field, value) in &entries {
        model.edit(*field, value);
    }

    let controller = RequestController::new(Arc::new(transport(settings)?));
    let states = controller.subscribe();
    let (outcome, rendered) = tokio::join!(
        controller.submit(model.snapshot()),
        render::follow(states)
    );
    tracing::debug!(?outcome, "prediction attempt finished");

    match rendered {
        RequestState::Succeeded(_) => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}

async fn run_info(settings: &Settings) -> Result<ExitCode> {
    let info = transport(settings)?
        .service_info()
        .await
        .with_context(|| format!("failed to reach {}", settings.api_url))?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let settings = resolve_settings(&args);
    init_tracing(&settings);
    tracing::debug!(
        api_url = %settings.api_url,
        timeout = ?settings.request_timeout().map(|d: Duration| d.as_secs()),
        "settings resolved"
    );

    match args.command {
        Command::Predict {
            country,
            province,
            product,
            season,
            time_to_harvest,
            area,
            production,
        } => {
            run_predict(
                &settings,
                [
                    (Field::Country, country),
                    (Field::Province, province),
                    (Field::Product, product),
                    (Field::SeasonName, season),
                    (Field::TimeToHarvest, time_to_harvest),
                    (Field::Area, area),
                    (Field::Production, production),
                ],
            )
            .await
        }
        Command::Info => run_info(&settings).await,
        Command::Options => {
            println!("{}", render::options_listing());
            Ok(ExitCode::SUCCESS)
        }
    }
}
