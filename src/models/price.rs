//! Price lookup models

use std::fmt;
use thiserror::Error;
use crate::utils::format_usd;

/// Quote asset every bare ticker is priced in
pub const QUOTE_SUFFIX: &str = "USDT";

#[derive(Debug, Error, PartialEq)]
pub enum SymbolError {
    #[error("symbol is empty")]
    Empty,
}

/// Canonical market pair such as `BTCUSDT`.
///
/// Always upper-case and always ends in [`QUOTE_SUFFIX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Upper-case the input and append the quote suffix when it is missing.
    /// Blank input is rejected instead of becoming a bare `USDT`.
    pub fn normalize(raw: &str) -> Result<Self, SymbolError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SymbolError::Empty);
        }

        let mut symbol = trimmed.to_uppercase();
        if !symbol.ends_with(QUOTE_SUFFIX) {
            symbol.push_str(QUOTE_SUFFIX);
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a single price lookup, rendered straight to text
#[derive(Debug, Clone, PartialEq)]
pub enum PriceQuoteResult {
    Quote { pair: TickerSymbol, price: f64 },
    Failed { pair: String, error: String },
}

impl fmt::Display for PriceQuoteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceQuoteResult::Quote { pair, price } => write!(
                f,
                "💰 The current price of **{}** is **${}**",
                pair,
                format_usd(*price)
            ),
            PriceQuoteResult::Failed { pair, error } => {
                write!(f, "❌ Failed to fetch price for {}. Error: {}", pair, error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_suffix_and_uppercases() {
        assert_eq!(TickerSymbol::normalize("btc").unwrap().as_str(), "BTCUSDT");
        assert_eq!(TickerSymbol::normalize(" Sol ").unwrap().as_str(), "SOLUSDT");
    }

    #[test]
    fn test_already_qualified_pair_not_doubled() {
        assert_eq!(TickerSymbol::normalize("ethusdt").unwrap().as_str(), "ETHUSDT");
        assert_eq!(TickerSymbol::normalize("ETHUSDT").unwrap().as_str(), "ETHUSDT");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["btc", "ethUsdt", "DOGE", "usdt", "x"] {
            let once = TickerSymbol::normalize(raw).unwrap();
            let twice = TickerSymbol::normalize(once.as_str()).unwrap();
            assert_eq!(once, twice, "input {raw}");
            assert!(once.as_str().ends_with(QUOTE_SUFFIX));
            assert_eq!(once.as_str(), once.as_str().to_uppercase());
        }
    }

    #[test]
    fn test_empty_symbol_rejected() {
        assert_eq!(TickerSymbol::normalize(""), Err(SymbolError::Empty));
        assert_eq!(TickerSymbol::normalize("   "), Err(SymbolError::Empty));
    }

    #[test]
    fn test_render_quote_and_failure() {
        let quote = PriceQuoteResult::Quote {
            pair: TickerSymbol::normalize("btc").unwrap(),
            price: 67234.5,
        };
        assert_eq!(
            quote.to_string(),
            "💰 The current price of **BTCUSDT** is **$67,234.50**"
        );

        let failed = PriceQuoteResult::Failed {
            pair: "XYZUSDT".to_string(),
            error: "Not Found".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "❌ Failed to fetch price for XYZUSDT. Error: Not Found"
        );
    }
}
