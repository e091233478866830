use serde::Deserialize;
use serde_json::Value;

/// Outcome of a job's most recent build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failure,
    Running,
    /// Never run, not reachable, or a result other than success/failure
    /// (`ABORTED`, `UNSTABLE`, ...).
    Unknown,
}

impl JobStatus {
    pub(super) fn from_last_build(build: &LastBuild) -> Self {
        if build.in_progress == Some(true) {
            return Self::Running;
        }

        match build.result.as_deref() {
            Some("SUCCESS") => Self::Success,
            Some("FAILURE") => Self::Failure,
            _ => Self::Unknown,
        }
    }
}

/// `GET /api/json?tree=jobs[name]`
#[derive(Debug, Deserialize)]
pub(super) struct JobList {
    pub jobs: Vec<JobEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JobEntry {
    pub name: Option<String>,
}

/// `GET /job/{name}/lastBuild/api/json`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LastBuild {
    #[serde(default)]
    pub in_progress: Option<bool>,
    #[serde(default)]
    pub result: Option<String>,
    /// Jenkins sends the build id as a string; older versions send a number.
    #[serde(default)]
    pub id: Option<Value>,
}

impl LastBuild {
    pub fn build_number(&self) -> Option<u64> {
        match self.id.as_ref()? {
            Value::String(id) => id.trim().parse().ok(),
            Value::Number(id) => id.as_u64(),
            _ => None,
        }
    }
}

/// One entry of `GET /job/{name}/{build}/wfapi/pendingInputActions`
#[derive(Debug, Deserialize)]
pub(super) struct PendingInputAction {
    pub id: Option<String>,
}

/// `GET /job/{name}/api/json?tree=builds[actions[parameters[name,value]],number]`
#[derive(Debug, Deserialize)]
pub(super) struct BuildHistory {
    pub builds: Vec<BuildRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BuildRecord {
    pub number: u64,
    #[serde(default)]
    pub actions: Vec<Option<BuildAction>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BuildAction {
    #[serde(default)]
    pub parameters: Vec<BuildParameter>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BuildParameter {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl BuildParameter {
    /// Display text for the value; `None` for null values.
    pub fn display_value(&self) -> Option<String> {
        match &self.value {
            Value::Null => None,
            Value::String(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    }
}
