use std::time::{Duration, Instant};
use reqwest::Client as HttpClient;
use reqwest::header::RETRY_AFTER;
use super::models::{ApiError, ErrorResponse, TickerPriceResponse};
use crate::models::TickerSymbol;
use tracing::{debug, warn};

/// Longest slice of an upstream error body carried into an error message
const MAX_ERROR_BODY: usize = 200;

/// Client for the Binance spot market-data API
pub struct MarketDataClient {
    http_client: HttpClient,
    base_url: String,
}

impl MarketDataClient {
    /// Create a client against `base_url` (e.g. `https://api.binance.com/api/v3`).
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Map a non-success response onto an [`ApiError`]
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status_code = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        // Binance explains 4xx failures as {"code": -1121, "msg": "Invalid symbol."}
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|err| err.msg)
            .unwrap_or_else(|| summarize_body(&body_text));

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            418 | 429 => {
                warn!(status = status_code, ?retry_after, "market data rate limited");
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::Http(status_code, message),
        }
    }

    /// GET /ticker/price?symbol={pair}
    ///
    /// Returns the latest traded price for the pair. One attempt, no retries.
    pub async fn get_ticker_price(&self, pair: &TickerSymbol) -> Result<f64, ApiError> {
        let url = format!("{}/ticker/price", self.base_url);
        debug!(%pair, %url, "requesting ticker price");

        let response = self.http_client
            .get(&url)
            .query(&[("symbol", pair.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        // Only a JSON object is a ticker; serde would otherwise accept ["BTCUSDT", "1.0"]
        if !value.is_object() {
            return Err(ApiError::Deserialization(format!(
                "expected a JSON object, got {}",
                summarize_body(&body)
            )));
        }

        let ticker: TickerPriceResponse = serde_json::from_value(value)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        if let Some(symbol) = &ticker.symbol {
            if symbol != pair.as_str() {
                warn!(requested = %pair, returned = %symbol, "market data returned a different symbol");
            }
        }

        ticker.price()
    }

    /// GET /ping
    ///
    /// Connectivity check; returns the round-trip time.
    pub async fn ping(&self) -> Result<Duration, ApiError> {
        let url = format!("{}/ping", self.base_url);
        let start = Instant::now();

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        Ok(start.elapsed())
    }
}

fn summarize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{unreachable_base_url, MockServer};

    fn client(base_url: &str) -> MarketDataClient {
        MarketDataClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    fn pair(raw: &str) -> TickerSymbol {
        TickerSymbol::normalize(raw).unwrap()
    }

    #[tokio::test]
    async fn test_ticker_price_success() {
        let server = MockServer::single(200, r#"{"symbol":"BTCUSDT","price":"67234.50000000"}"#).await;

        let price = client(&server.base_url).get_ticker_price(&pair("btc")).await.unwrap();

        assert_eq!(price, 67234.5);
        let requests = server.requests();
        assert!(requests[0].starts_with("GET /ticker/price?symbol=BTCUSDT "));
    }

    #[tokio::test]
    async fn test_invalid_symbol_uses_binance_message() {
        let server = MockServer::single(400, r#"{"code":-1121,"msg":"Invalid symbol."}"#).await;

        let err = client(&server.base_url).get_ticker_price(&pair("xyz")).await.unwrap_err();

        assert_eq!(err, ApiError::BadRequest("Invalid symbol.".to_string()));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let server = MockServer::single(500, "upstream exploded").await;

        let err = client(&server.base_url).get_ticker_price(&pair("xyz")).await.unwrap_err();

        assert_eq!(err, ApiError::ServerError(500, "upstream exploded".to_string()));
    }

    #[tokio::test]
    async fn test_rate_limited_status() {
        let server = MockServer::single(429, "").await;

        let err = client(&server.base_url).get_ticker_price(&pair("btc")).await.unwrap_err();

        assert!(matches!(err, ApiError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::single(200, "<html>nope</html>").await;

        let err = client(&server.base_url).get_ticker_price(&pair("eth")).await.unwrap_err();

        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_array_body_is_not_a_ticker() {
        let server = MockServer::single(200, r#"["BTCUSDT","67234.5"]"#).await;

        let err = client(&server.base_url).get_ticker_price(&pair("btc")).await.unwrap_err();

        assert!(matches!(err, ApiError::Deserialization(ref msg) if msg.starts_with("expected a JSON object")), "{err}");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let base_url = unreachable_base_url().await;

        let err = client(&base_url).get_ticker_price(&pair("btc")).await.unwrap_err();

        assert!(matches!(err, ApiError::Request(_)));
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::single(200, "{}").await;

        assert!(client(&server.base_url).ping().await.is_ok());
        assert!(server.requests()[0].starts_with("GET /ping "));
    }
}
