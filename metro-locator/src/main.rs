use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use metro_locator::config::LocatorConfig;
use metro_locator::display::{DisplaySink, SinkError, encode_or_error};
use metro_locator::locator::{Locator, LocatorError};
use metro_locator::logging::{self, LogLevel};
use metro_locator::web::{AppState, create_router};

#[derive(Parser, Debug)]
#[command(name = "metro-locator", version)]
#[command(about = "Find the nearest WMATA station to an address and its next trains")]
struct Args {
    /// WMATA API key
    #[arg(long, env = "WMATA_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Directory holding the reference-data caches
    #[arg(long, env = "METRO_CACHE_DIR", default_value = ".", global = true)]
    cache_dir: PathBuf,

    /// Timeout for each upstream request, in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Log level
    #[arg(long, value_enum, ignore_case = true, default_value = "INFO", global = true)]
    log_level: LogLevel,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the coordinates of an address
    Geolocate {
        address: String,
    },
    /// Print (or push to the display) predictions for the nearest station
    Predict {
        address: String,

        /// Push the encoded payload to the ESP32 display instead of printing
        #[arg(long)]
        esp32: bool,

        /// Hostname or URL of the ESP32 display
        #[arg(long, default_value = "esp32.local")]
        esp32_hostname: String,

        /// Number of times to run the prediction
        #[arg(long, default_value_t = 1)]
        run_n_times: u32,

        /// Seconds to wait between runs
        #[arg(long, default_value_t = 30)]
        sleep: u64,
    },
    /// Serve the display payload over HTTP
    Serve {
        address: String,

        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address {0:?}")]
    ListenAddr(String),

    #[error("{failed} of {total} runs failed")]
    RunsFailed { failed: u32, total: u32 },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_level, args.log_file.as_deref()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let api_key = args.api_key.unwrap_or_else(|| {
        warn!("WMATA_API_KEY not set. WMATA calls will fail.");
        String::new()
    });

    let config = LocatorConfig::new(api_key)
        .with_cache_dir(args.cache_dir)
        .with_timeout(args.timeout);
    let locator = Locator::from_config(&config)?;

    match args.command {
        Command::Geolocate { address } => {
            let coordinates = locator.geolocate(&address).await?;
            println!("{}", serde_json::to_string_pretty(&coordinates)?);
            Ok(())
        }
        Command::Predict {
            address,
            esp32,
            esp32_hostname,
            run_n_times,
            sleep,
        } => {
            let sink = if esp32 {
                Some(DisplaySink::new(&esp32_hostname)?)
            } else {
                None
            };
            predict(
                &locator,
                &address,
                sink.as_ref(),
                run_n_times,
                Duration::from_secs(sleep),
            )
            .await
        }
        Command::Serve {
            address,
            host,
            port,
        } => serve(locator, address, &host, port).await,
    }
}

/// Run the pipeline `runs` times. A failed run is logged and the next one
/// still happens.
async fn predict(
    locator: &Locator,
    address: &str,
    sink: Option<&DisplaySink>,
    runs: u32,
    sleep: Duration,
) -> Result<(), CliError> {
    let mut failed = 0;

    for run in 1..=runs {
        if run > 1 {
            tokio::time::sleep(sleep).await;
        }
        info!(run, of = runs, "running prediction");

        let succeeded = match sink {
            Some(sink) => push_once(locator, address, sink).await,
            None => print_once(locator, address).await,
        };
        if !succeeded {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::RunsFailed {
            failed,
            total: runs,
        });
    }
    Ok(())
}

async fn print_once(locator: &Locator, address: &str) -> bool {
    let result = locator
        .predict(address)
        .await
        .map_err(CliError::from)
        .and_then(|doc| Ok(serde_json::to_string_pretty(&doc)?));

    match result {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            error!(error = %e, "prediction failed");
            false
        }
    }
}

/// Push one payload. Delivery failures are logged and do not fail the run.
async fn push_once(locator: &Locator, address: &str, sink: &DisplaySink) -> bool {
    let report = locator.report(address).await;
    let payload = encode_or_error(&report);

    if let Err(e) = sink.send(&payload).await {
        warn!(url = sink.url(), error = %e, "unable to send payload to display");
    }

    !payload.is_error()
}

async fn serve(locator: Locator, address: String, host: &str, port: u16) -> Result<(), CliError> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|_| CliError::ListenAddr(format!("{host}:{port}")))?;

    let app = create_router(AppState::new(locator, address));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "serving display payloads");
    axum::serve(listener, app).await?;
    Ok(())
}
