use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::utils::{split_message, DISCORD_MESSAGE_LIMIT};

pub async fn execute(ctx: &Context, msg: &Message, text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Ask me something, e.g. `$ask what is BTC trading at?`".to_string());
    }

    let agent = super::get_agent(ctx).await?;
    tracing::info!("💬 Agent request from user {} ({} chars)", msg.author.id, text.len());

    if let Err(e) = msg.channel_id.broadcast_typing(&ctx.http).await {
        tracing::warn!("Failed to broadcast typing: {}", e);
    }

    let reply = agent.run(text).await.map_err(|e| e.to_string())?;

    for (i, chunk) in split_message(&reply, DISCORD_MESSAGE_LIMIT).into_iter().enumerate() {
        let mut message = serenity::builder::CreateMessage::default().content(chunk);
        if i == 0 {
            message = message.reference_message(msg);
        }
        msg.channel_id
            .send_message(ctx, message)
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
