use serenity::model::channel::Message;
use serenity::prelude::Context;
use crate::models::PriceQuoteResult;
use crate::services::price_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    tracing::info!("💹 Price command called with args: {:?}", args);

    let Some(symbol) = args.first() else {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("💹 Price Command")
            .description("Display the latest Binance price of a coin against USDT")
            .field("Usage", "`$price <ticker>`", false)
            .field("Examples", "`$price btc`\n`$price ETH`\n`$price SOLUSDT`", false)
            .color(0x00ff00);

        msg.channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(help_embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    };

    let client = super::get_market_data(ctx).await?;
    let result = price_service::get_price(&client, symbol).await;

    let color = match result {
        PriceQuoteResult::Quote { .. } => 0x00ff00,
        PriceQuoteResult::Failed { .. } => 0xff0000,
    };
    let embed = serenity::builder::CreateEmbed::default()
        .title("💹 Crypto Price")
        .description(result.to_string())
        .color(color);

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
