pub mod agent_service;
pub mod ping_service;
pub mod price_service;

pub use agent_service::CryptoAgent;
