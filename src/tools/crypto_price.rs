use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use super::{parse_args, Tool, ToolError};
use crate::api::binance::MarketDataClient;
use crate::services::price_service;

pub const TOOL_NAME: &str = "get_crypto_price";

/// Latest price of a cryptocurrency against USDT
pub struct CryptoPriceTool {
    client: Arc<MarketDataClient>,
}

#[derive(Debug, Deserialize)]
struct CryptoPriceArgs {
    symbol: String,
}

impl CryptoPriceTool {
    pub fn new(client: Arc<MarketDataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CryptoPriceTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fetch the current price of a cryptocurrency from Binance. \
         Pass the bare asset ticker such as BTC, ETH or SOL; it is converted \
         to the USDT pair (BTC -> BTCUSDT) automatically."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Asset ticker, e.g. BTC"
                }
            },
            "required": ["symbol"]
        })
    }

    async fn invoke(&self, args: Value) -> Result<String, ToolError> {
        let args: CryptoPriceArgs = parse_args(args)?;
        Ok(price_service::fetch_price(&self.client, &args.symbol).await)
    }
}
