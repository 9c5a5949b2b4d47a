use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::time;

use paystream_client::{ClientConfig, HttpLedger, StreamLedger};
use paystream_core::{format_amount, Clock, StreamStatus};
use paystream_monitor::{create_example_config, MonitorConfig, MonitorRegistry, SystemClock};

#[derive(Parser, Debug)]
#[command(name = "paystream-monitor")]
#[command(about = "PayStream off-chain valuation and reconciliation service")]
struct Args {
    /// Path to monitor configuration file
    #[arg(short, long, default_value = "monitor.toml")]
    config: String,

    /// Ledger gateway URL override
    #[arg(short, long)]
    ledger_url: Option<String>,

    /// Reconciliation poll interval override in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Write an example configuration file and exit
    #[arg(long)]
    write_example_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    if args.write_example_config {
        create_example_config(&args.config)?;
        log::info!("Wrote example configuration to {}", args.config);
        return Ok(());
    }

    log::info!("Starting PayStream monitor");

    // Load configuration
    let mut config = MonitorConfig::load(&args.config)?;
    if let Some(ledger_url) = args.ledger_url {
        config.ledger_url = ledger_url;
    }
    if let Some(interval) = args.interval {
        config.poll_interval_secs = interval;
    }

    log::info!("Ledger gateway: {}", config.ledger_url);
    log::info!(
        "Poll interval: {}s, refresh interval: {}s",
        config.poll_interval_secs,
        config.refresh_interval_secs,
    );

    let client_config = ClientConfig {
        ledger_url: config.ledger_url.clone(),
        metadata_url: config.metadata_url.clone(),
        token_decimals: config.token_decimals,
        request_timeout_ms: config.request_timeout_ms,
    };
    let ledger: Arc<dyn StreamLedger> = Arc::new(HttpLedger::new(&client_config));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let mut registry = MonitorRegistry::new(
        ledger.clone(),
        clock.clone(),
        Duration::from_secs(config.poll_interval_secs),
        Duration::from_secs(config.refresh_interval_secs),
    );

    // Start watching every enabled stream; a stream the ledger cannot
    // resolve is skipped, not fatal
    for entry in config.enabled_streams() {
        match ledger.read_stream(entry.stream_id).await {
            Ok(params) => {
                // A malformed snapshot must never reach the projector
                if let Err(e) = params.validate() {
                    log::error!(
                        "Stream '{}' ({}) has malformed terms: {}",
                        entry.name,
                        entry.stream_id.short(),
                        e,
                    );
                    continue;
                }
                registry.watch(entry.stream_id, params);
                log::info!(
                    "Watching stream '{}' ({}): {} -> {}",
                    entry.name,
                    entry.stream_id.short(),
                    params.streamer.short(),
                    params.recipient.short(),
                );
            }
            Err(e) => {
                log::error!(
                    "Failed to read stream '{}' ({}): {}",
                    entry.name,
                    entry.stream_id.short(),
                    e,
                );
            }
        }
    }

    if registry.is_empty() {
        log::warn!("No streams are being watched");
    }

    // Display loop: one line per stream per refresh tick
    let mut ticker = time::interval(Duration::from_secs(config.refresh_interval_secs));
    let mut iteration = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down, cancelling {} stream task pairs", registry.len());
                registry.stop_all();
                return Ok(());
            }
        }
        iteration += 1;

        for id in registry.watched() {
            if let Some(value) = registry.value(id) {
                log::info!(
                    "stream {}: {} | remaining {} | claimable {}",
                    id.short(),
                    status_line(&value.status),
                    format_amount(value.remaining, config.token_decimals),
                    format_amount(value.available_to_claim, config.token_decimals),
                );
            }
        }

        if iteration % 100 == 0 {
            log::info!(
                "Monitor health - iteration {}, {} streams watched",
                iteration,
                registry.len(),
            );
        }
    }
}

fn status_line(status: &StreamStatus) -> String {
    if status.is_finished {
        "finished".to_string()
    } else if status.is_started {
        "live".to_string()
    } else {
        format!("starting in {}s", status.time_until_start)
    }
}
