use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::Token;
use crate::chat::{self, ConsoleSink, InboundMessage};
use crate::config::Config;
use crate::giphy::{GifCache, GifResolver, GiphyClient};
use crate::jenkins::JenkinsClient;
use crate::logging;
use crate::relay::{Interpreter, Relay};

#[derive(Parser)]
#[command(name = "cirelay")]
#[command(author, version, about = "Relays Discord chat commands to Jenkins", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./cirelay.{toml,json,yaml,yml})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, env = "JENKINS_URL")]
    jenkins_url: Option<String>,

    #[arg(long, global = true, env = "JENKINS_USER")]
    jenkins_user: Option<String>,

    #[arg(long, global = true, env = "JENKINS_TOKEN", hide_env_values = true)]
    jenkins_token: Option<String>,

    #[arg(long, global = true, env = "GIPHY_KEY", hide_env_values = true)]
    giphy_key: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and answer commands until the session ends
    Serve {
        #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
        discord_token: Option<String>,
    },
    /// Handle a single chat message and print the replies
    Exec {
        /// Message text, e.g. "!list"
        text: String,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        let log_file = self.log_file.as_deref().or(config.logging.file.as_deref());
        logging::init(log_file)?;

        let relay = Arc::new(self.build_relay(&config)?);

        match &self.command {
            Commands::Serve { discord_token } => {
                let token = discord_token
                    .clone()
                    .or_else(|| config.discord.token.clone())
                    .map(Token::from)
                    .context("Discord token missing: set DISCORD_TOKEN or [discord] token")?;

                chat::run_discord(&token, relay).await
            }
            Commands::Exec { text } => {
                let message = InboundMessage {
                    author_id: 0,
                    channel_id: 0,
                    text: text.clone(),
                };
                relay.on_message(&ConsoleSink, &message).await;
                Ok(())
            }
        }
    }

    fn build_relay(&self, config: &Config) -> Result<Relay> {
        let Some(base_url) = self
            .jenkins_url
            .as_deref()
            .or(config.jenkins.base_url.as_deref())
        else {
            bail!("Jenkins URL missing: set JENKINS_URL or [jenkins] base-url");
        };

        let token = self
            .jenkins_token
            .clone()
            .or_else(|| config.jenkins.token.clone())
            .map(Token::from)
            .context("Jenkins token missing: set JENKINS_TOKEN or [jenkins] token")?;

        let user = self.jenkins_user.as_deref().unwrap_or(&config.jenkins.user);

        info!("Relaying to Jenkins at {base_url} as '{user}'");
        let jenkins = JenkinsClient::new(base_url, user, token)?;

        let giphy_key = self
            .giphy_key
            .clone()
            .or_else(|| config.giphy.api_key.clone())
            .unwrap_or_else(|| {
                warn!("No Giphy API key configured, GIF commands will fail");
                String::new()
            });
        let giphy = GiphyClient::new(&config.giphy.base_url, Token::from(giphy_key))?;
        let gifs = GifResolver::new(giphy, GifCache::default());

        let interpreter = Interpreter::new(config.easter_eggs.clone());

        Ok(Relay::new(jenkins, gifs, interpreter, config.glyphs.clone()))
    }
}
