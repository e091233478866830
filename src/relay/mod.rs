mod command;
mod render;

pub use command::{default_easter_eggs, Command, EasterEgg, Interpreter, GIF_SEARCH_LIMIT};
pub use render::Glyphs;

use std::sync::OnceLock;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::chat::{ChatSink, InboundMessage};
use crate::error::Result;
use crate::giphy::GifResolver;
use crate::jenkins::JenkinsClient;
use crate::params::ParameterBlock;

use render::{render_job_list, render_parameters, HELP_TEXT};

/// Routes chat commands to Jenkins and Giphy and posts the outcome back.
///
/// Every failure is turned into a reply here; nothing propagates past
/// [`Relay::on_message`].
pub struct Relay {
    jenkins: JenkinsClient,
    gifs: GifResolver,
    interpreter: Interpreter,
    glyphs: Glyphs,
    identity: OnceLock<u64>,
}

impl Relay {
    pub fn new(
        jenkins: JenkinsClient,
        gifs: GifResolver,
        interpreter: Interpreter,
        glyphs: Glyphs,
    ) -> Self {
        Self {
            jenkins,
            gifs,
            interpreter,
            glyphs,
            identity: OnceLock::new(),
        }
    }

    /// Records the bot's own user id so its messages are ignored.
    pub fn set_identity(&self, user_id: u64) {
        if self.identity.set(user_id).is_err() {
            debug!("Session identity already set");
        }
    }

    pub async fn on_message(&self, sink: &dyn ChatSink, message: &InboundMessage) {
        if self.identity.get() == Some(&message.author_id) {
            return;
        }

        let command = self.interpreter.interpret(&message.text);
        if command == Command::Unrecognized {
            return;
        }

        debug!("Handling {command:?} in channel {}", message.channel_id);
        self.dispatch(sink, message.channel_id, command).await;
    }

    async fn dispatch(&self, sink: &dyn ChatSink, channel_id: u64, command: Command) {
        let reply = match command {
            Command::ListJobs => match self.job_list().await {
                Ok(list) => format!("Jenkins Job List:\n{list}"),
                Err(e) => format!("Error fetching Jenkins job list: {e}"),
            },
            Command::RunPipeline(pipeline) => match self.jenkins.trigger_build(&pipeline).await {
                Ok(()) => format!("Jenkins pipeline '{pipeline}' triggered successfully!"),
                Err(e) => format!("Error triggering Jenkins pipeline '{pipeline}': {e}"),
            },
            Command::RunPipelineWithParameters(pipeline, params) => {
                match self.run_with_parameters(&pipeline, &params).await {
                    Ok(()) => format!("Jenkins pipeline '{pipeline}' triggered successfully!"),
                    Err(e) => format!("Error triggering Jenkins pipeline '{pipeline}': {e}"),
                }
            }
            Command::Proceed(pipeline) => match self.proceed(&pipeline).await {
                Ok(()) => format!("Jenkins pipeline '{pipeline}' proceeded successfully!"),
                Err(e) => format!("Error proceeding Jenkins pipeline '{pipeline}': {e}"),
            },
            Command::Abort(pipeline) => match self.abort(&pipeline).await {
                Ok(()) => format!("Jenkins pipeline '{pipeline}' aborted"),
                Err(e) => format!("Error aborting Jenkins pipeline '{pipeline}': {e}"),
            },
            Command::FetchParameters(pipeline) => match self.last_parameters(&pipeline).await {
                Ok(parameters) => format!(
                    "Parameters from previous run:{}",
                    render_parameters(&parameters)
                ),
                Err(e) => format!("Error fetching parameters for '{pipeline}': {e}"),
            },
            Command::SearchGif(term) => match self.gifs.resolve(&term, GIF_SEARCH_LIMIT).await {
                Ok(url) => url,
                Err(e) => format!("Couldn't fetch GIF for '{term}': {e}"),
            },
            Command::EasterEgg(egg) => {
                self.say(sink, channel_id, &egg.reply).await;
                match self.gifs.resolve(&egg.term, egg.limit).await {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("Failed to fetch '{}' GIF: {e}", egg.term);
                        return;
                    }
                }
            }
            Command::Help => HELP_TEXT.to_string(),
            Command::Malformed(reply) => reply,
            Command::Unrecognized => return,
        };

        self.say(sink, channel_id, &reply).await;
    }

    async fn say(&self, sink: &dyn ChatSink, channel_id: u64, text: &str) {
        if let Err(e) = sink.send_message(channel_id, text).await {
            warn!("Failed to reply in channel {channel_id}: {e}");
        }
    }

    async fn job_list(&self) -> Result<String> {
        let jobs = self.jenkins.list_jobs().await?;
        let statuses = join_all(jobs.iter().map(|job| self.jenkins.job_status(job))).await;

        let jobs: Vec<_> = jobs.into_iter().zip(statuses).collect();
        Ok(render_job_list(&jobs, &self.glyphs))
    }

    async fn run_with_parameters(&self, pipeline: &str, params: &ParameterBlock) -> Result<()> {
        info!("Triggering '{pipeline}' with parameters {:?}", params.pairs().collect::<Vec<_>>());
        self.jenkins
            .trigger_build_with_parameters(pipeline, params)
            .await
    }

    async fn proceed(&self, pipeline: &str) -> Result<()> {
        let build = self.jenkins.last_build_number(pipeline).await?;
        self.jenkins.proceed_input(pipeline, build).await
    }

    async fn abort(&self, pipeline: &str) -> Result<()> {
        let build = self.jenkins.last_build_number(pipeline).await?;
        self.jenkins.abort_input(pipeline, build).await
    }

    async fn last_parameters(&self, pipeline: &str) -> Result<Vec<(String, String)>> {
        let build = self.jenkins.last_build_number(pipeline).await?;
        self.jenkins.build_parameters(pipeline, build).await
    }
}

#[cfg(test)]
mod tests;
