//! Data models shared by commands, services and tools

pub mod ping;
pub mod price;

pub use ping::PingMetrics;
pub use price::{PriceQuoteResult, TickerSymbol};
