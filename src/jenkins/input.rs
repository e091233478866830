use log::info;

use super::client::JenkinsClient;
use super::types::PendingInputAction;
use crate::error::{RelayError, Result};

impl JenkinsClient {
    /// Id of the first input step the build is waiting on.
    pub async fn pending_input_id(&self, name: &str, build_number: u64) -> Result<String> {
        let build = build_number.to_string();
        let url = self.job_endpoint(name, &[build.as_str(), "wfapi", "pendingInputActions"], None)?;

        let actions: Vec<PendingInputAction> = match self.get_json(url, "pendingInputActions").await {
            Ok(actions) => actions,
            Err(RelayError::ApiShape(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        actions
            .into_iter()
            .next()
            .and_then(|action| action.id)
            .ok_or_else(|| {
                RelayError::NotFound(format!(
                    "no pending input for '{name}' build #{build_number}"
                ))
            })
    }

    /// Approves the pending input step of a build.
    pub async fn proceed_input(&self, name: &str, build_number: u64) -> Result<()> {
        self.answer_input(name, build_number, "proceedEmpty").await
    }

    /// Rejects the pending input step of a build, aborting it.
    pub async fn abort_input(&self, name: &str, build_number: u64) -> Result<()> {
        self.answer_input(name, build_number, "abort").await
    }

    async fn answer_input(&self, name: &str, build_number: u64, answer: &str) -> Result<()> {
        let input_id = self.pending_input_id(name, build_number).await?;

        let build = build_number.to_string();
        let url = self.job_endpoint(name, &[build.as_str(), "input", input_id.as_str(), answer], None)?;
        info!("Answering input '{input_id}' of '{name}' #{build_number} with {answer}");

        self.post(url).await
    }
}
