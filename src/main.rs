use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn, error, debug};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod tools;
mod utils;
#[cfg(test)]
mod test_support;

use api::binance::MarketDataClient;
use api::llm::ChatCompletionsClient;
use config::Config;
use services::CryptoAgent;
use tools::{CryptoPriceTool, ToolRegistry};

struct Handler;

struct BotData;

impl TypeMapKey for BotData {
    type Value = Instant;
}

struct AgentHandle;

impl TypeMapKey for AgentHandle {
    type Value = Arc<CryptoAgent>;
}

struct MarketData;

impl TypeMapKey for MarketData {
    type Value = Arc<MarketDataClient>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Check for rate limits now that bot is connected
        debug!("Checking Discord rate limit status...");
        match ctx.http.get_current_user().await {
            Ok(_) => {
                info!("No rate limit detected - Bot is fully ready!");
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("429") || error_msg.contains("rate limit") || error_msg.contains("Ratelimited") {
                    warn!("Bot is being rate limited by Discord! Error: {}", error_msg);
                } else {
                    warn!("Failed to check rate limit status: {}", error_msg);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("crypto_agent_bot=debug".parse().unwrap())
            .add_directive("serenity=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🤖 Starting crypto assistant bot...");

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!(
        "Model: {} via {} | Market data: {}",
        config.llm_model, config.llm_base_url, config.market_data_base_url
    );

    // Build API clients
    let market_data = match MarketDataClient::new(&config.market_data_base_url, config.http_timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build market data client: {}", e);
            return;
        }
    };

    let model = match ChatCompletionsClient::new(
        &config.llm_api_key,
        &config.llm_base_url,
        &config.llm_model,
        config.http_timeout,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build model client: {}", e);
            return;
        }
    };

    // Register tools and build the agent
    let mut tools = ToolRegistry::new();
    tools.register(CryptoPriceTool::new(market_data.clone()));
    info!("Registered {} tool(s)", tools.len());

    let agent = Arc::new(CryptoAgent::new(
        model,
        tools,
        config.agent_max_turns,
        config.agent_timeout,
    ));

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    // Store the start time, agent and market data client in client data
    {
        let mut data = client.data.write().await;
        data.insert::<BotData>(Instant::now());
        data.insert::<AgentHandle>(agent);
        data.insert::<MarketData>(market_data);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
