use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::debug;
use serde::Deserialize;

use crate::history::{HistoryProvider, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{Bar, BarSeries, Symbol, UtcDateTime};

const CHART_RANGE: &str = "1y";
const CHART_INTERVAL: &str = "1d";

/// Yahoo Finance chart adapter for daily history.
///
/// One GET per symbol against the v8 chart endpoint, no retry. Yahoo answers
/// unknown or delisted symbols with HTTP 404 carrying a chart-level error
/// object, or with a null result set; all of those map to an empty series so
/// the caller skips the ticker. Other statuses, transport failures, and
/// malformed payloads remain run-level fatal.
#[derive(Clone)]
pub struct YahooHistory {
    http_client: Arc<dyn HttpClient>,
}

impl YahooHistory {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    async fn fetch_chart(&self, symbol: &Symbol) -> Result<BarSeries, SourceError> {
        let endpoint = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval={}",
            urlencoding::encode(symbol.as_str()),
            CHART_RANGE,
            CHART_INTERVAL,
        );

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
        })?;

        // Unknown or delisted symbols come back as 404, not as a transport
        // problem. The ticker is skipped, never fatal.
        if response.status == 404 {
            debug!("yahoo has no chart for {symbol} (404)");
            return Ok(BarSeries::empty(symbol.clone()));
        }

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        let chart: YahooChartResponse = serde_json::from_str(&response.body)
            .map_err(|error| SourceError::internal(format!("failed to parse yahoo chart: {error}")))?;

        if let Some(error) = &chart.chart.error {
            debug!(
                "yahoo chart error for {symbol}: {} ({})",
                error.description.as_deref().unwrap_or("no description"),
                error.code.as_deref().unwrap_or("no code"),
            );
            return Ok(BarSeries::empty(symbol.clone()));
        }

        let Some(result) = chart.chart.result.as_ref().and_then(|results| results.first()) else {
            return Ok(BarSeries::empty(symbol.clone()));
        };
        let Some(timestamp) = result.timestamp.as_ref() else {
            return Ok(BarSeries::empty(symbol.clone()));
        };
        let quote = result
            .indicators
            .quote
            .first()
            .ok_or_else(|| SourceError::internal("no quote data in chart response"))?;

        let mut bars = Vec::with_capacity(timestamp.len());
        for (i, &ts_value) in timestamp.iter().enumerate() {
            let ts_offset = time::OffsetDateTime::from_unix_timestamp(ts_value)
                .map_err(|error| SourceError::internal(format!("invalid timestamp: {error}")))?;
            let ts = UtcDateTime::from_offset_datetime(ts_offset)
                .map_err(|error| SourceError::internal(format!("timestamp not UTC: {error}")))?;

            // Yahoo pads the arrays with nulls on non-trading positions.
            if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
                quote.open.get(i),
                quote.high.get(i),
                quote.low.get(i),
                quote.close.get(i),
            ) {
                let volume = quote
                    .volume
                    .get(i)
                    .copied()
                    .flatten()
                    .map_or(0, |v| v.max(0) as u64);

                if let Ok(bar) = Bar::new(ts, *open, *high, *low, *close, volume) {
                    bars.push(bar);
                }
            }
        }

        Ok(BarSeries::new(symbol.clone(), bars))
    }
}

impl HistoryProvider for YahooHistory {
    fn daily_history<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<BarSeries, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_chart(symbol))
    }
}

// Yahoo Finance chart response structures (subset we consume).
#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

/// Chart-level error object, e.g. `{"code":"Not Found","description":...}`.
#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::SourceErrorKind;
    use crate::http_client::{HttpError, HttpResponse};
    use std::sync::Mutex;

    struct ScriptedHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn returning(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn chart_body(timestamps: &[i64], closes: &[f64], volumes: &[i64]) -> String {
        let opens: Vec<f64> = closes.to_vec();
        serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": timestamps,
                    "indicators": {
                        "quote": [{
                            "open": opens,
                            "high": closes,
                            "low": closes,
                            "close": closes,
                            "volume": volumes,
                        }]
                    }
                }],
                "error": null
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn parses_chart_into_ordered_bars() {
        let body = chart_body(
            &[1_704_067_200, 1_704_153_600],
            &[50.0, 51.0],
            &[1_000, 2_000],
        );
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(body))));
        let adapter = YahooHistory::new(client.clone());
        let symbol = Symbol::parse("MELI").expect("valid symbol");

        let series = adapter
            .daily_history(&symbol)
            .await
            .expect("chart should parse");

        assert_eq!(series.len(), 2);
        assert_eq!(series.bars[0].volume, 1_000);
        assert_eq!(series.bars[1].close, 51.0);

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1, "single attempt per symbol");
        assert!(requests[0].url.contains("/v8/finance/chart/MELI"));
        assert!(requests[0].url.contains("range=1y"));
        assert!(requests[0].url.contains("interval=1d"));
    }

    #[tokio::test]
    async fn missing_timestamps_yield_empty_series() {
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": null,
                    "indicators": { "quote": [{
                        "open": [], "high": [], "low": [], "close": [], "volume": []
                    }]}
                }],
                "error": null
            }
        })
        .to_string();
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(body))));
        let adapter = YahooHistory::new(client);
        let symbol = Symbol::parse("GGAL").expect("valid symbol");

        let series = adapter
            .daily_history(&symbol)
            .await
            .expect("empty chart is not an error");
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn null_padded_positions_are_skipped() {
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": [1_704_067_200, 1_704_153_600],
                    "indicators": { "quote": [{
                        "open": [50.0, null],
                        "high": [50.0, null],
                        "low": [50.0, null],
                        "close": [50.0, null],
                        "volume": [1_000, null],
                    }]}
                }],
                "error": null
            }
        })
        .to_string();
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(body))));
        let adapter = YahooHistory::new(client);
        let symbol = Symbol::parse("TS").expect("valid symbol");

        let series = adapter.daily_history(&symbol).await.expect("must parse");
        assert_eq!(series.len(), 1);
    }

    const NOT_FOUND_BODY: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

    #[tokio::test]
    async fn unknown_symbol_404_yields_empty_series() {
        // Mistyped or delisted symbols answer 404 with a chart error body;
        // the ticker must be skipped, never aborting the run.
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::with_status(
            404,
            NOT_FOUND_BODY,
        ))));
        let adapter = YahooHistory::new(client);
        let symbol = Symbol::parse("NOSUCH").expect("valid symbol");

        let series = adapter
            .daily_history(&symbol)
            .await
            .expect("unknown symbol is a skip, not a failure");
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn chart_error_body_yields_empty_series() {
        // Same not-found payload delivered with a 200 status.
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::ok_json(
            NOT_FOUND_BODY,
        ))));
        let adapter = YahooHistory::new(client);
        let symbol = Symbol::parse("NOSUCH").expect("valid symbol");

        let series = adapter
            .daily_history(&symbol)
            .await
            .expect("chart error is a skip, not a failure");
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn bad_status_maps_to_unavailable() {
        let client = Arc::new(ScriptedHttpClient::returning(Ok(HttpResponse::with_status(
            503, "",
        ))));
        let adapter = YahooHistory::new(client);
        let symbol = Symbol::parse("BBVA").expect("valid symbol");

        let error = adapter
            .daily_history(&symbol)
            .await
            .expect_err("must surface the status");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.message().contains("503"));
    }

    #[tokio::test]
    async fn transport_error_maps_to_unavailable() {
        let client = Arc::new(ScriptedHttpClient::returning(Err(HttpError::new(
            "upstream timeout",
        ))));
        let adapter = YahooHistory::new(client);
        let symbol = Symbol::parse("LOMA").expect("valid symbol");

        let error = adapter
            .daily_history(&symbol)
            .await
            .expect_err("must surface the transport failure");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
    }
}
