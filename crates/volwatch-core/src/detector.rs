//! Volume/price anomaly rule.
//!
//! A bar is anomalous when its volume exceeds twice the trailing 30-day
//! average while the same-day close moves less than 1% against the prior
//! close. This is the only decision logic in the system; it is a pure
//! function of one ticker's bar series.

use serde::Serialize;

use crate::BarSeries;

/// Trailing window length for the volume mean.
pub const VOLUME_WINDOW: usize = 30;

/// Latest volume must exceed this multiple of the rolling average.
pub const VOLUME_SPIKE_MULTIPLIER: f64 = 2.0;

/// Same-day absolute price change must stay below this fraction.
pub const PRICE_STABILITY_LIMIT: f64 = 0.01;

/// Per-ticker verdict with its supporting metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyResult {
    pub triggered: bool,
    pub latest_volume: u64,
    pub rolling_avg: f64,
    /// Absolute close-to-close change, expressed as a percentage.
    pub price_change_pct: f64,
}

impl AnomalyResult {
    /// Fixed verdict for series shorter than [`VOLUME_WINDOW`]. Insufficient
    /// history is an expected case, not an error.
    pub const fn insufficient_history() -> Self {
        Self {
            triggered: false,
            latest_volume: 0,
            rolling_avg: 0.0,
            price_change_pct: 0.0,
        }
    }
}

/// Evaluate the anomaly rule over the most recent bar of `series`.
///
/// The rolling average is a simple arithmetic mean over exactly the trailing
/// [`VOLUME_WINDOW`] volumes, ending at and including the last bar. A prior
/// close of exactly zero defines the price change as zero rather than
/// dividing by it.
pub fn detect(series: &BarSeries) -> AnomalyResult {
    let bars = &series.bars;
    if bars.len() < VOLUME_WINDOW {
        return AnomalyResult::insufficient_history();
    }

    let window = &bars[bars.len() - VOLUME_WINDOW..];
    let rolling_avg =
        window.iter().map(|bar| bar.volume as f64).sum::<f64>() / VOLUME_WINDOW as f64;

    let latest = &bars[bars.len() - 1];
    let previous = &bars[bars.len() - 2];

    let price_change = if previous.close == 0.0 {
        0.0
    } else {
        ((latest.close - previous.close) / previous.close).abs()
    };

    let triggered = latest.volume as f64 > VOLUME_SPIKE_MULTIPLIER * rolling_avg
        && price_change < PRICE_STABILITY_LIMIT;

    AnomalyResult {
        triggered,
        latest_volume: latest.volume,
        rolling_avg,
        price_change_pct: price_change * 100.0,
    }
}
