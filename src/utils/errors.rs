/// Turn an internal error description into the message shown in the error embed.
///
/// Provider and transport failures are collapsed into short categories so raw
/// upstream bodies never reach the channel.
/// Longest pass-through message; keeps the embed description well under Discord's limit
const MAX_PASSTHROUGH: usize = 500;

pub fn user_facing_error(error_msg: &str) -> String {
    let lower = error_msg.to_lowercase();

    if lower.contains("429") || lower.contains("rate limit") {
        "⚠️ **Rate Limited**: The assistant is busy right now. Please try again in a moment.".to_string()
    } else if lower.contains("timed out") {
        "⏱️ **Timed Out**: The assistant took too long to answer. Please try again.".to_string()
    } else if lower.contains("authentication failed") {
        "🔒 **Configuration Error**: The assistant could not authenticate with the model provider.".to_string()
    } else if lower.contains("model api error") {
        "⚠️ **Model Provider Error**: The model provider returned an error. Please try again later.".to_string()
    } else if lower.contains("http request") || lower.contains("request failed") {
        "⚠️ **Network Error**: Having trouble reaching the model provider. Please try again.".to_string()
    } else if !error_msg.trim().is_empty() {
        let shown: String = error_msg.trim().chars().take(MAX_PASSTHROUGH).collect();
        format!("❌ {}", shown)
    } else {
        "❌ An error occurred while executing the command.".to_string()
    }
}
