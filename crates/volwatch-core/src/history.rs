//! History provider contract.
//!
//! The fetch step is treated as a black box behind [`HistoryProvider`]: given
//! a symbol it yields one year of daily bars, or an empty series when the
//! provider has nothing for that symbol. Empty is an expected outcome handled
//! by the pipeline; transport and parse failures surface as [`SourceError`].

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{BarSeries, Symbol};

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    Internal,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Market-data source contract.
///
/// Implementations must be `Send + Sync`; the pipeline calls them strictly
/// sequentially, one symbol at a time, with a single attempt per symbol.
pub trait HistoryProvider: Send + Sync {
    /// Fetch one year of daily bars for `symbol`, oldest first.
    ///
    /// An empty [`BarSeries`] means the provider has no history for the
    /// symbol; the caller skips it without treating the run as failed.
    fn daily_history<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<BarSeries, SourceError>> + Send + 'a>>;
}
