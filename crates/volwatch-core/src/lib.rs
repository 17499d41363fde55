//! # Volwatch Core
//!
//! Domain model and pipeline for the volwatch anomaly alerting job: fetch a
//! year of daily bars per watched ticker, evaluate a volume/price anomaly
//! rule, and deliver a Telegram alert per triggered ticker. One run per
//! invocation, strictly sequential, stateless across runs.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance chart) |
//! | [`detector`] | The volume/price anomaly rule |
//! | [`domain`] | Domain models (Bar, BarSeries, Symbol) |
//! | [`error`] | Validation and configuration errors |
//! | [`history`] | History provider contract |
//! | [`http_client`] | HTTP client abstraction |
//! | [`notify`] | Notifier contract and Telegram delivery |
//! | [`run`] | The sequential run pipeline |
//! | [`settings`] | Credential loading from the environment |
//! | [`universe`] | Watched ticker configuration |
//!
//! ## Error handling
//!
//! Three flat categories cover the whole system: missing credentials are
//! fatal at startup ([`ConfigError`]), per-ticker empty history is skipped
//! and logged, and delivery failures are reported as [`Delivery`] values and
//! logged. Only provider transport/parse failures propagate to the process
//! boundary as [`SourceError`].

pub mod adapters;
pub mod detector;
pub mod domain;
pub mod error;
pub mod history;
pub mod http_client;
pub mod notify;
pub mod run;
pub mod settings;
pub mod universe;

// Re-export commonly used types at crate root for convenience

pub use adapters::YahooHistory;

pub use detector::{
    detect, AnomalyResult, PRICE_STABILITY_LIMIT, VOLUME_SPIKE_MULTIPLIER, VOLUME_WINDOW,
};

pub use domain::{Bar, BarSeries, Symbol, UtcDateTime};

pub use error::{ConfigError, ValidationError};

pub use history::{HistoryProvider, SourceError, SourceErrorKind};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use notify::{format_alert, liveness_text, AlertMessage, Delivery, Notifier, TelegramNotifier};

pub use run::{run, RunReport, TickerAlert};

pub use settings::Settings;

pub use universe::{Category, TickerEntry, Universe};
