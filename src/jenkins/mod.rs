mod builds;
mod client;
mod input;
mod jobs;
mod types;


pub use client::{JenkinsClient, DEFAULT_USER};
pub use types::JobStatus;
