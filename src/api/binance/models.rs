use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Body of `GET /ticker/price?symbol=...`
///
/// Binance sends the price as a string; some compatible endpoints send a number,
/// so the raw JSON value is kept and converted by [`TickerPriceResponse::price`].
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPriceResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "price")]
    pub raw_price: Option<Value>,
}

impl TickerPriceResponse {
    pub fn price(&self) -> Result<f64, ApiError> {
        let raw = self.raw_price.as_ref().ok_or(ApiError::MissingPrice)?;

        let price = match raw {
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ApiError::InvalidPrice(s.clone()))?,
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ApiError::InvalidPrice(n.to_string()))?,
            other => return Err(ApiError::InvalidPrice(other.to_string())),
        };

        if !price.is_finite() {
            return Err(ApiError::InvalidPrice(raw.to_string()));
        }
        Ok(price)
    }
}

/// Error body Binance returns alongside 4xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub msg: Option<String>,
}

/// Errors from the market-data API
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Rate Limited. Retry after {}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    #[error("HTTP Error ({0}): {1}")]
    Http(u16, String),
    #[error("Failed to parse response: {0}")]
    Deserialization(String),
    #[error("response has no price field")]
    MissingPrice,
    #[error("price '{0}' is not a number")]
    InvalidPrice(String),
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("{}s", secs),
        None => "a moment".to_string(),
    }
}
