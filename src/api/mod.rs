pub mod binance;
pub mod llm;
