//! Provider adapters.

mod yahoo;

pub use yahoo::YahooHistory;
