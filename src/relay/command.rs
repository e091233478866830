use serde::{Deserialize, Serialize};

use crate::params::{self, ParameterBlock};

/// A keyword that gets a canned reply plus a GIF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EasterEgg {
    /// Matched anywhere in the message.
    pub keyword: String,
    /// Sent before the GIF lookup starts.
    pub reply: String,
    pub term: String,
    #[serde(default = "default_egg_limit")]
    pub limit: u32,
}

fn default_egg_limit() -> u32 {
    20
}

pub fn default_easter_eggs() -> Vec<EasterEgg> {
    let egg = |keyword: &str, reply: &str, term: &str, limit| EasterEgg {
        keyword: keyword.to_string(),
        reply: reply.to_string(),
        term: term.to_string(),
        limit,
    };

    vec![
        egg("!steak", "time", "steak", 50),
        egg("!reek", "Reek, Reek, it rhymes with meek", "theon-greyjoy-reek", 20),
        egg("!croikey", "mayte", "crikey", 20),
    ]
}

/// Result limit for `!gif` searches.
pub const GIF_SEARCH_LIMIT: u32 = 20;

/// A classified chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListJobs,
    RunPipeline(String),
    RunPipelineWithParameters(String, ParameterBlock),
    Proceed(String),
    Abort(String),
    FetchParameters(String),
    SearchGif(String),
    EasterEgg(EasterEgg),
    Help,
    /// A known command with bad syntax; holds the reply to send.
    Malformed(String),
    Unrecognized,
}

/// Turns raw chat text into a [`Command`].
///
/// Rules are tried in a fixed order and the first match wins, so
/// `!runparams` is checked before `!run` and keywords before everything.
pub struct Interpreter {
    easter_eggs: Vec<EasterEgg>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(default_easter_eggs())
    }
}

impl Interpreter {
    pub fn new(easter_eggs: Vec<EasterEgg>) -> Self {
        Self { easter_eggs }
    }

    pub fn interpret(&self, text: &str) -> Command {
        if let Some(egg) = self
            .easter_eggs
            .iter()
            .find(|egg| text.contains(egg.keyword.as_str()))
        {
            return Command::EasterEgg(egg.clone());
        }

        if let Some(rest) = text.strip_prefix("!gif ") {
            let term = rest.trim();
            if term.is_empty() {
                return Command::Malformed("Usage: !gif <search_term>".to_string());
            }
            return Command::SearchGif(term.to_string());
        }

        if text.contains("!list") {
            return Command::ListJobs;
        }

        if text.starts_with("!runparams") {
            return match params::parse(text) {
                Ok((pipeline, block)) => Command::RunPipelineWithParameters(pipeline, block),
                Err(e) => Command::Malformed(format!("Error handling !runparams: {e}")),
            };
        }

        let with_pipeline: [(&str, fn(String) -> Command); 4] = [
            ("!run", Command::RunPipeline),
            ("!proceed", Command::Proceed),
            ("!abort", Command::Abort),
            ("!parameters", Command::FetchParameters),
        ];
        for (prefix, command) in with_pipeline {
            if text.starts_with(prefix) {
                return match pipeline_argument(text) {
                    Some(pipeline) => command(pipeline),
                    None => Command::Malformed(format!("Usage: {prefix} <pipeline_name>")),
                };
            }
        }

        if text.starts_with("!help") {
            return Command::Help;
        }

        Command::Unrecognized
    }
}

/// Everything after the command word, whitespace-normalised.
fn pipeline_argument(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().skip(1).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
