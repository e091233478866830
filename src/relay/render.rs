use std::fmt::Write;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::jenkins::JobStatus;

/// Text shown next to each job in `!list`. Custom Discord emoji
/// (`<:name:id>`) work here too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Glyphs {
    pub success: String,
    pub failure: String,
    pub running: String,
    pub unknown: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            success: "✅".to_string(),
            failure: "❌".to_string(),
            running: "🔄".to_string(),
            unknown: "⚪".to_string(),
        }
    }
}

impl Glyphs {
    pub fn for_status(&self, status: JobStatus) -> &str {
        match status {
            JobStatus::Success => &self.success,
            JobStatus::Failure => &self.failure,
            JobStatus::Running => &self.running,
            JobStatus::Unknown => &self.unknown,
        }
    }
}

pub const HELP_TEXT: &str = "Available Commands:
!list ---------------------------> Fetches and displays the Jenkins job list
!run <pipeline_name> ---------> Triggers a Jenkins pipeline with the specified name
!proceed <pipeline_name> ----> Proceeds the current stage of a pipeline
!abort <pipeline_name> -------> Aborts the current stage of a pipeline
!parameters <pipeline_name> -> Fetches the parameters from the previous build
!gif <search_term> -----------> Posts a GIF

!runparams triggers a pipeline with parameters. Put the pipeline name on the
second line and one `key value` pair per line after it. Repeat a key to pass
several values:
!runparams
<pipeline_name>
parameterKey parameterValue1
parameterKey parameterValue2
otherKey other value";

/// One line per job. A job whose status lookup failed is shown with the
/// unknown glyph instead of failing the whole list.
pub fn render_job_list(jobs: &[(String, Result<JobStatus>)], glyphs: &Glyphs) -> String {
    let mut output = String::new();

    for (name, status) in jobs {
        let status = match status {
            Ok(status) => *status,
            Err(e) => {
                warn!("Failed to get status of job '{name}': {e}");
                JobStatus::Unknown
            }
        };
        let _ = writeln!(output, "{} **{}**", glyphs.for_status(status), name);
    }

    output
}

pub fn render_parameters(parameters: &[(String, String)]) -> String {
    parameters
        .iter()
        .fold(String::new(), |mut output, (name, value)| {
            let _ = write!(output, "\n\n**{name}:** \n{value}");
            output
        })
}
