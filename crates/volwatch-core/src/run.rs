//! The run pipeline: fetch, detect, notify, strictly in universe order.

use log::{info, warn};

use crate::detector::{self, AnomalyResult};
use crate::history::{HistoryProvider, SourceError};
use crate::notify::{format_alert, liveness_text, Delivery, Notifier};
use crate::universe::Universe;
use crate::Symbol;

/// One triggered ticker with its verdict and delivery outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerAlert {
    pub symbol: Symbol,
    pub result: AnomalyResult,
    pub delivery: Delivery,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Tickers whose history reached the detector.
    pub evaluated: usize,
    /// Tickers skipped because the provider returned no history.
    pub skipped: Vec<Symbol>,
    /// Triggered anomalies in discovery order, each with its delivery outcome.
    pub alerts: Vec<TickerAlert>,
}

/// Execute one complete scan over `universe`.
///
/// Sequential by contract: one ticker's fetch finishes before the next
/// begins, and alerts are sent in the order anomalies were discovered so the
/// channel's message order matches ticker iteration order. Provider errors
/// other than the empty-history case propagate and end the run; delivery
/// failures are recorded and logged but never abort it.
pub async fn run(
    universe: &Universe,
    provider: &dyn HistoryProvider,
    notifier: &dyn Notifier,
) -> Result<RunReport, SourceError> {
    match notifier.send(&liveness_text()).await {
        Delivery::Delivered => info!("liveness message delivered"),
        Delivery::Failed { reason } => warn!("liveness message failed: {reason}"),
    }

    let mut evaluated = 0;
    let mut skipped = Vec::new();
    let mut triggered = Vec::new();

    for entry in universe.iter() {
        let series = provider.daily_history(&entry.symbol).await?;
        if series.is_empty() {
            warn!("no history for {}, skipping", entry.symbol);
            skipped.push(entry.symbol.clone());
            continue;
        }

        evaluated += 1;
        let result = detector::detect(&series);
        info!(
            "{}: volume={} avg={:.2} change={:.2}% triggered={}",
            entry.symbol,
            result.latest_volume,
            result.rolling_avg,
            result.price_change_pct,
            result.triggered,
        );

        if result.triggered {
            triggered.push((entry.symbol.clone(), result));
        }
    }

    let mut alerts = Vec::with_capacity(triggered.len());
    for (symbol, result) in triggered {
        let text = format_alert(&symbol, &result);
        let delivery = notifier.send(&text).await;
        match &delivery {
            Delivery::Delivered => info!("alert sent for {symbol}"),
            Delivery::Failed { reason } => warn!("alert for {symbol} failed: {reason}"),
        }
        alerts.push(TickerAlert {
            symbol,
            result,
            delivery,
        });
    }

    if alerts.is_empty() {
        info!("no volume/price anomalies detected");
    }

    Ok(RunReport {
        evaluated,
        skipped,
        alerts,
    })
}
