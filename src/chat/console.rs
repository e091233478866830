use async_trait::async_trait;

use super::ChatSink;
use crate::error::Result;
use crate::output::dim;

/// Prints replies to stdout, for running single commands from a terminal.
pub struct ConsoleSink;

#[async_trait]
impl ChatSink for ConsoleSink {
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<()> {
        println!("{} {text}", dim(format!("#{channel_id}")));
        Ok(())
    }
}
