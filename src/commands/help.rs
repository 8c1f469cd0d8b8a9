use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 Crypto Assistant Help")
        .description("Ask about cryptocurrency prices in plain language. Prices come from Binance and are quoted against USDT.")
        .color(0x00b0f4)
        .field(
            "🎯 General",
            "`$ping` - Check bot and market data latency\n`$help` - Show this help message",
            false,
        )
        .field(
            "💬 Assistant",
            "`$ask <question>` - Ask the assistant, e.g. `$ask how much is ETH?`\nYou can also DM the bot or mention it.",
            false,
        )
        .field(
            "💹 Prices",
            "`$price <TICKER>` - Latest price, e.g. `$price btc` or `$price SOLUSDT`",
            false,
        );

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
