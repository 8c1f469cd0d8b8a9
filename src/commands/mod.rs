pub mod ask;
pub mod help;
pub mod ping;
pub mod price;

use std::sync::Arc;
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;
use crate::api::binance::MarketDataClient;
use crate::services::CryptoAgent;
use crate::utils::user_facing_error;

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    let content = msg.content.trim();
    let Some(command) = content.split_whitespace().next() else {
        return;
    };
    let rest = content[command.len()..].trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let result = match command {
        "$ping" => ping::execute(ctx, msg).await,
        "$help" => help::execute(ctx, msg).await,
        "$price" | "$p" => price::execute(ctx, msg, &args).await,
        "$ask" => ask::execute(ctx, msg, rest).await,
        _ => {
            let bot_id = ctx.cache.current_user().id;
            let is_dm = msg.guild_id.is_none();
            let Some(text) = agent_input(content, is_dm, msg.mentions_user_id(bot_id), bot_id) else {
                return;
            };
            ask::execute(ctx, msg, &text).await
        }
    };

    if let Err(e) = result {
        tracing::error!("❌ Error executing command {}: {}", command, e);

        let embed = serenity::builder::CreateEmbed::default()
            .title("Command Error")
            .description(user_facing_error(&e))
            .color(0xff0000);

        if let Err(e) = msg.channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
            .await
        {
            tracing::warn!("Failed to send error embed: {}", e);
        }
    }
}

/// Text to hand the agent for a free-form message, or `None` when the bot should stay quiet.
///
/// Guild messages only reach the agent when they mention the bot. A bare
/// mention yields an empty string so `ask` can prompt for a question.
pub fn agent_input(content: &str, is_dm: bool, mentions_bot: bool, bot_id: UserId) -> Option<String> {
    if !is_dm && !mentions_bot {
        return None;
    }
    Some(strip_mention(content, bot_id))
}

/// Remove `<@id>` / `<@!id>` mentions of the bot from a message
pub fn strip_mention(content: &str, bot_id: UserId) -> String {
    content
        .replace(&format!("<@{}>", bot_id), "")
        .replace(&format!("<@!{}>", bot_id), "")
        .trim()
        .to_string()
}

pub(crate) async fn get_agent(ctx: &Context) -> Result<Arc<CryptoAgent>, String> {
    let data = ctx.data.read().await;
    data.get::<crate::AgentHandle>()
        .cloned()
        .ok_or_else(|| "Agent not initialized".to_string())
}

pub(crate) async fn get_market_data(ctx: &Context) -> Result<Arc<MarketDataClient>, String> {
    let data = ctx.data.read().await;
    data.get::<crate::MarketData>()
        .cloned()
        .ok_or_else(|| "Market data client not initialized".to_string())
}
