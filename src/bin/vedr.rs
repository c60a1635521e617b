//! vedr: vedrfolnir CLI
//!
//! Runs cache-aside weather lookups against the configured cache store and
//! OpenWeather, printing the JSON response envelope.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use vedrfolnir::config::{Config, Secrets};
use vedrfolnir::{
    ErrorReport, MemoryWeatherCache, OpenWeatherClient, OpenWeatherProvider, RedisWeatherCache,
    ServerResponse, VedrfolnirError, WeatherByCities, WeatherByCity, WeatherCacheRepository,
    WeatherLookup, WeatherService,
};

/// Vedrfolnir CLI
#[derive(Parser)]
#[command(name = "vedr")]
#[command(version = vedrfolnir::PKG_VERSION)]
#[command(about = "Cache-aside current weather lookups")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "VEDR_CONFIG")]
    config: Option<PathBuf>,

    /// Use an in-process cache instead of Redis.
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the cache store connection
    Ping,

    /// Current weather for one city
    City {
        /// City name in English (e.g. "Seoul")
        city: String,
    },

    /// Current weather for several cities
    Batch {
        /// City names in English
        cities: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let report = ErrorReport::from_error(&err);
            match serde_json::to_string_pretty(&report.body) {
                Ok(json) => println!("{json}"),
                Err(_) => println!("{}", report.body.message),
            }
            exit_code(report.status)
        }
    }
}

async fn run(args: Args) -> Result<String, VedrfolnirError> {
    let config = Config::load(args.config.as_deref())?;

    if let Command::Ping = args.command {
        // `connect` round-trips a PING before returning.
        RedisWeatherCache::connect(&config.redis.url()).await?;
        return Ok(serde_json::to_string_pretty(&ServerResponse::success("PONG"))?);
    }

    let secrets = Secrets::load()?;
    let api_key = secrets.openweather_api_key().ok_or_else(|| {
        VedrfolnirError::Configuration(
            "no OpenWeather API key; set OPENWEATHER_API_KEY or ~/.vedrfolnir/secrets.toml"
                .to_string(),
        )
    })?;

    // Shared handles: created once here, dropped on exit.
    let cache: Arc<dyn WeatherCacheRepository> = if args.memory {
        Arc::new(MemoryWeatherCache::new())
    } else {
        Arc::new(RedisWeatherCache::connect(&config.redis.url()).await?)
    };
    let client = OpenWeatherClient::with_timeout(
        api_key,
        &config.openweather.host,
        config.openweather.timeout(),
    )?
    .with_retry(config.retry.to_retry_config());
    info!(version = vedrfolnir::PKG_VERSION, host = client.host(), "vedr starting");

    let provider = Arc::new(OpenWeatherProvider::new(Arc::new(client)));
    let service = WeatherService::new(cache, provider).with_ttl(config.cache.ttl());

    match args.command {
        Command::City { city } => {
            let weather = service.get_one(&WeatherByCity::new(city)).await?;
            Ok(serde_json::to_string_pretty(&ServerResponse::success(weather))?)
        }
        Command::Batch { cities } => {
            let weathers = service.get_many(&WeatherByCities::new(cities)).await?;
            Ok(serde_json::to_string_pretty(&ServerResponse::success(weathers))?)
        }
        Command::Ping => Ok(serde_json::to_string_pretty(&ServerResponse::success("PONG"))?),
    }
}

/// Exit code per status class.
fn exit_code(status: u16) -> ExitCode {
    match status {
        400 => ExitCode::from(10),
        401 => ExitCode::from(11),
        404 => ExitCode::from(14),
        502 => ExitCode::from(20),
        _ => ExitCode::FAILURE,
    }
}
