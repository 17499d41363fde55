//! Canonical domain types for volwatch market data.
//!
//! All models enforce their invariants at construction time:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Bar`] | One day's OHLCV record |
//! | [`BarSeries`] | Time-ordered bars for a symbol |
//! | [`Symbol`] | Validated ticker symbol |
//! | [`UtcDateTime`] | RFC3339 UTC timestamp |

mod models;
mod symbol;
mod timestamp;

pub use models::{Bar, BarSeries};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
