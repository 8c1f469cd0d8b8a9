//! Ping/status command models

/// Bot ping metrics and uptime information
#[derive(Debug)]
pub struct PingMetrics {
    pub response_roundtrip: u64,
    /// `None` when the market-data endpoint could not be reached
    pub market_data_latency: Option<u64>,
    pub uptime: String,
}
