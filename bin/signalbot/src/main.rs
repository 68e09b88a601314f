use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use tracing_subscriber::EnvFilter;

use common::Config;
use engine::{
    BinanceClient, CycleOutcome, Dispatcher, RunOutcome, SignalCycle, SignalStore, WeekendGate,
};
use strategy::WatchlistConfig;

/// One run per invocation: an external scheduler (cron, systemd timer, CI
/// schedule) decides how often this executes.
#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // ── Config ───────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let watchlist = match &cfg.watchlist_path {
        Some(path) => WatchlistConfig::load(path)
            .unwrap_or_else(|e| panic!("Failed to load watchlist: {e}")),
        None => WatchlistConfig::default(),
    };
    info!(
        mode = %cfg.delivery_mode,
        symbol = %watchlist.symbol,
        timeframes = watchlist.timeframes.len(),
        "SignalBot starting"
    );

    // ── Collaborators ────────────────────────────────────────────────────────
    let source = BinanceClient::new(&cfg.binance_base_url)
        .unwrap_or_else(|e| panic!("Failed to build candle source: {e}"));
    let channels =
        channels::from_config(&cfg).unwrap_or_else(|e| panic!("Failed to set up channels: {e}"));
    let dispatcher = Dispatcher::new(channels);
    if dispatcher.is_empty() {
        warn!("No notification channels configured - alerts will be dropped");
    } else {
        info!(channels = ?dispatcher.channel_names(), "Notification channels ready");
    }
    let store = SignalStore::new(&cfg.signal_state_path);
    let gate = WeekendGate::new(&cfg.gate_timezone, cfg.skip_weekends)
        .unwrap_or_else(|e| panic!("Invalid weekend gate: {e}"));

    let cycle = SignalCycle::new(Arc::new(source), dispatcher, store, &watchlist).with_gate(gate);

    // ── Run once ─────────────────────────────────────────────────────────────
    let run_id = uuid::Uuid::new_v4();
    let outcome = cycle
        .run(&watchlist.timeframes)
        .instrument(info_span!("run", %run_id))
        .await;

    match outcome {
        RunOutcome::Gated => info!(%run_id, "Run skipped by weekend gate"),
        RunOutcome::Completed(results) => {
            let dispatched = results
                .iter()
                .filter(|(_, o)| matches!(o, CycleOutcome::Dispatched { .. }))
                .count();
            let skipped = results
                .iter()
                .filter(|(_, o)| matches!(o, CycleOutcome::Skipped { .. }))
                .count();
            for (tf, o) in &results {
                info!(%run_id, timeframe = %tf, label = %tf.label, outcome = %o, "Summary");
            }
            info!(%run_id, dispatched, skipped, "Run complete");
        }
    }
}
