mod console;
mod discord;

pub use console::ConsoleSink;
pub use discord::run_discord;

use async_trait::async_trait;

use crate::error::Result;

/// A chat message delivered by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub author_id: u64,
    pub channel_id: u64,
    pub text: String,
}

/// Outbound side of a chat session.
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<()>;
}
