pub mod errors;
pub mod format;

pub use errors::user_facing_error;
pub use format::{format_usd, split_message, DISCORD_MESSAGE_LIMIT};
