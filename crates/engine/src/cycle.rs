use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use common::{Bias, Candle, CandleSource, Error, Result, Timeframe};
use strategy::indicators::{self, IndicatorParams};
use strategy::{classify, AlertFormatter, WatchlistConfig};

use crate::dispatch::Dispatcher;
use crate::gate::WeekendGate;
use crate::store::SignalStore;

/// Terminal state of one timeframe in one run.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// No usable data or indicators; nothing was touched.
    Skipped { reason: String },
    /// Bias unchanged or `none`; no alert, no state write.
    Idle { bias: Bias, stored: Bias },
    /// Bias changed; alert fanned out and state written.
    Dispatched {
        bias: Bias,
        previous: Bias,
        delivered: usize,
        failed: usize,
        persisted: bool,
    },
}

impl std::fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleOutcome::Skipped { reason } => write!(f, "skipped ({reason})"),
            CycleOutcome::Idle { bias, stored } => write!(f, "idle (now {bias}, last {stored})"),
            CycleOutcome::Dispatched {
                bias,
                previous,
                delivered,
                failed,
                ..
            } => write!(
                f,
                "dispatched {previous} -> {bias} ({delivered} delivered, {failed} failed)"
            ),
        }
    }
}

/// Result of a whole run across timeframes.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The weekend gate was closed; no timeframe was evaluated.
    Gated,
    Completed(Vec<(Timeframe, CycleOutcome)>),
}

/// One evaluation pipeline: fetch → indicators → classify → compare →
/// dispatch → persist, applied to each timeframe in turn.
pub struct SignalCycle {
    source: Arc<dyn CandleSource>,
    dispatcher: Dispatcher,
    store: SignalStore,
    gate: Option<WeekendGate>,
    symbol: String,
    candle_limit: u32,
    params: IndicatorParams,
    formatter: AlertFormatter,
}

impl SignalCycle {
    pub fn new(
        source: Arc<dyn CandleSource>,
        dispatcher: Dispatcher,
        store: SignalStore,
        watchlist: &WatchlistConfig,
    ) -> Self {
        Self {
            source,
            dispatcher,
            store,
            gate: None,
            symbol: watchlist.symbol.clone(),
            candle_limit: watchlist.candle_limit,
            params: watchlist.indicator_params(),
            formatter: watchlist.alert_formatter(),
        }
    }

    pub fn with_gate(mut self, gate: WeekendGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn store(&self) -> &SignalStore {
        &self.store
    }

    /// Run every timeframe once, honouring the weekend gate.
    pub async fn run(&self, timeframes: &[Timeframe]) -> RunOutcome {
        self.run_at(Utc::now(), timeframes).await
    }

    pub async fn run_at(&self, now: DateTime<Utc>, timeframes: &[Timeframe]) -> RunOutcome {
        if let Some(gate) = &self.gate {
            if !gate.is_open_at(now) {
                info!(tz = %gate.timezone(), "Weekend - no signals are sent");
                return RunOutcome::Gated;
            }
        }

        let mut outcomes = Vec::with_capacity(timeframes.len());
        for tf in timeframes {
            let outcome = self.evaluate(tf).await;
            info!(timeframe = %tf, outcome = %outcome, "Timeframe evaluated");
            outcomes.push((tf.clone(), outcome));
        }
        RunOutcome::Completed(outcomes)
    }

    /// Evaluate a single timeframe. Never fails: every problem ends in
    /// [`CycleOutcome::Skipped`] for this timeframe only.
    pub async fn evaluate(&self, tf: &Timeframe) -> CycleOutcome {
        // FETCHING
        let candles = match self.fetch(tf).await {
            Ok(c) => c,
            Err(e) => {
                warn!(timeframe = %tf, symbol = %self.symbol, error = %e, "Skipping timeframe");
                return skipped(e.to_string());
            }
        };

        // INDICATING
        let report = match indicators::compute(&candles, &self.params) {
            Ok(r) => r,
            Err(e) => {
                warn!(timeframe = %tf, error = %e, "Indicator computation failed - skipping");
                return skipped(e.to_string());
            }
        };
        if !report.warm {
            warn!(
                timeframe = %tf,
                candles = candles.len(),
                needed = self.params.warm_up(),
                "Insufficient history - indicators are not fully warmed"
            );
        }

        // CLASSIFYING
        let bias = match classify(&report.snapshot, &report.fibonacci) {
            Ok(b) => b,
            Err(e) => {
                warn!(timeframe = %tf, error = %e, "Cannot classify snapshot - skipping");
                return skipped(e.to_string());
            }
        };

        // COMPARING
        let stored = self.store.get(&tf.interval);
        debug!(timeframe = %tf, %bias, %stored, rsi = report.snapshot.rsi, "Bias classified");
        if !bias.is_actionable() || bias == stored {
            info!(timeframe = %tf, %bias, %stored, "No new signal - nothing sent");
            return CycleOutcome::Idle { bias, stored };
        }

        // DISPATCHING
        let alert = match self
            .formatter
            .render(tf, bias, &report.snapshot, &report.fibonacci)
        {
            Ok(a) => a,
            Err(e) => {
                warn!(timeframe = %tf, error = %e, "Cannot format alert - skipping");
                return skipped(e.to_string());
            }
        };
        let dispatch = self.dispatcher.dispatch(alert.text()).await;
        if dispatch.all_failed() {
            error!(timeframe = %tf, %bias, "Alert could not be delivered on any channel");
        }

        // PERSISTING
        let persisted = match self.store.set(&tf.interval, bias) {
            Ok(()) => true,
            Err(e) => {
                error!(timeframe = %tf, %bias, error = %e, "Failed to persist signal state");
                false
            }
        };
        info!(timeframe = %tf, previous = %stored, %bias, "New signal dispatched");

        CycleOutcome::Dispatched {
            bias,
            previous: stored,
            delivered: dispatch.delivered.len(),
            failed: dispatch.failed.len(),
            persisted,
        }
    }

    /// Candles for one timeframe. Any source failure, and an empty answer,
    /// is reported as [`Error::DataUnavailable`].
    async fn fetch(&self, tf: &Timeframe) -> Result<Vec<Candle>> {
        match self
            .source
            .candles(&self.symbol, &tf.interval, self.candle_limit)
            .await
        {
            Ok(c) if !c.is_empty() => Ok(c),
            Ok(_) => Err(Error::DataUnavailable(format!(
                "{} {}: no candles returned",
                self.symbol, tf.interval
            ))),
            Err(e) => Err(Error::DataUnavailable(format!(
                "{} {}: {e}",
                self.symbol, tf.interval
            ))),
        }
    }
}

fn skipped(reason: impl Into<String>) -> CycleOutcome {
    CycleOutcome::Skipped {
        reason: reason.into(),
    }
}
