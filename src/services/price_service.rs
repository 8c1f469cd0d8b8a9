use crate::api::binance::MarketDataClient;
use crate::models::{PriceQuoteResult, TickerSymbol};
use tracing::{info, warn};

/// Shown in place of the pair when the model sent a blank symbol
const BLANK_SYMBOL: &str = "<empty>";

/// Look up the latest price for a user-supplied ticker.
///
/// `raw_symbol` may be a bare asset (`btc`) or a full pair (`BTCUSDT`).
/// Every failure (blank symbol, network, status, body) is folded into the
/// returned [`PriceQuoteResult::Failed`].
pub async fn get_price(client: &MarketDataClient, raw_symbol: &str) -> PriceQuoteResult {
    let pair = match TickerSymbol::normalize(raw_symbol) {
        Ok(pair) => pair,
        Err(e) => {
            warn!(symbol = raw_symbol, error = %e, "rejected price lookup");
            return PriceQuoteResult::Failed {
                pair: BLANK_SYMBOL.to_string(),
                error: e.to_string(),
            };
        }
    };

    match client.get_ticker_price(&pair).await {
        Ok(price) => {
            info!(%pair, price, "price lookup succeeded");
            PriceQuoteResult::Quote { pair, price }
        }
        Err(e) => {
            warn!(%pair, error = %e, "price lookup failed");
            PriceQuoteResult::Failed {
                pair: pair.to_string(),
                error: e.to_string(),
            }
        }
    }
}

/// Same as [`get_price`], rendered straight to the display string handed back to the model
pub async fn fetch_price(client: &MarketDataClient, raw_symbol: &str) -> String {
    get_price(client, raw_symbol).await.to_string()
}
