use log::debug;
use reqwest::StatusCode;

use super::client::JenkinsClient;
use super::types::{JobList, JobStatus, LastBuild};
use crate::error::{RelayError, Result};

impl JenkinsClient {
    /// Names of all top-level jobs, in server order.
    pub async fn list_jobs(&self) -> Result<Vec<String>> {
        let url = self.endpoint(["api", "json"], Some("tree=jobs[name]"))?;
        let list: JobList = self.get_json(url, "jobs").await?;

        Ok(list.jobs.into_iter().filter_map(|job| job.name).collect())
    }

    /// Status of the job's last build.
    ///
    /// A non-200 answer (typically 404 for a job that has never run) maps to
    /// [`JobStatus::Unknown`]; only transport and decoding failures are errors.
    pub async fn job_status(&self, name: &str) -> Result<JobStatus> {
        let url = self.job_endpoint(name, &["lastBuild", "api", "json"], None)?;
        let response = self.get(url).await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("No last build for '{name}' (status {status})");
            return Ok(JobStatus::Unknown);
        }

        let body = response.text().await?;
        let build: LastBuild = serde_json::from_str(&body)
            .map_err(|e| RelayError::ApiShape(format!("unexpected format for 'lastBuild': {e}")))?;

        Ok(JobStatus::from_last_build(&build))
    }

    /// Number of the job's last build.
    pub async fn last_build_number(&self, name: &str) -> Result<u64> {
        let url = self.job_endpoint(name, &["lastBuild", "api", "json"], None)?;
        let build: LastBuild = self.get_json(url, "lastBuild").await?;

        build
            .build_number()
            .ok_or_else(|| RelayError::ApiShape("unable to extract build ID".to_string()))
    }
}
