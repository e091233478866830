use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::info;
use serenity::all::{ChannelId, Context, EventHandler, GatewayIntents, Http, Message, Ready};
use serenity::Client;

use super::{ChatSink, InboundMessage};
use crate::auth::Token;
use crate::error::RelayError;
use crate::relay::Relay;

struct DiscordSink {
    http: Arc<Http>,
}

#[async_trait]
impl ChatSink for DiscordSink {
    async fn send_message(&self, channel_id: u64, text: &str) -> crate::error::Result<()> {
        ChannelId::new(channel_id)
            .say(&self.http, text)
            .await
            .map_err(|e| RelayError::Chat(e.to_string()))?;
        Ok(())
    }
}

struct Handler {
    relay: Arc<Relay>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected to Discord as {}", ready.user.name);
        self.relay.set_identity(ready.user.id.get());
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let inbound = InboundMessage {
            author_id: msg.author.id.get(),
            channel_id: msg.channel_id.get(),
            text: msg.content,
        };
        let sink = DiscordSink {
            http: Arc::clone(&ctx.http),
        };

        self.relay.on_message(&sink, &inbound).await;
    }
}

/// Connects to the Discord gateway and relays messages until the
/// connection ends. Serenity dispatches each event on its own task.
pub async fn run_discord(token: &Token, relay: Arc<Relay>) -> Result<()> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token.as_str(), intents)
        .event_handler(Handler { relay })
        .await
        .context("Failed to create Discord client")?;

    info!("Opening Discord session");
    client.start().await.context("Discord client error")?;

    Ok(())
}
