//! Ticker universe configuration.
//!
//! The universe is an explicit, ordered structure passed into the run rather
//! than a global constant, so tests can substitute synthetic watchlists.

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Market category tag for a watched ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Domestic,
    International,
}

/// One watched instrument with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub symbol: Symbol,
    pub category: Category,
}

impl TickerEntry {
    pub fn new(symbol: Symbol, category: Category) -> Self {
        Self { symbol, category }
    }
}

/// Ordered set of tickers evaluated in a run. Iteration order determines
/// fetch order and therefore notification order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    entries: Vec<TickerEntry>,
}

impl Universe {
    pub fn new(entries: Vec<TickerEntry>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The production watchlist: six domestic symbols followed by four
    /// international ones.
    pub fn default_watchlist() -> Self {
        let domestic = ["YPF", "TS", "GGAL", "BBVA", "LOMA", "MELI"];
        let international = ["AAPL", "GOOG", "MSFT", "AMZN"];

        let entries = domestic
            .into_iter()
            .map(|symbol| (symbol, Category::Domestic))
            .chain(
                international
                    .into_iter()
                    .map(|symbol| (symbol, Category::International)),
            )
            .map(|(symbol, category)| {
                TickerEntry::new(
                    Symbol::parse(symbol).expect("watchlist symbols are valid"),
                    category,
                )
            })
            .collect();

        Self::new(entries)
    }
}
