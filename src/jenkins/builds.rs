use log::{info, warn};
use url::form_urlencoded;

use super::client::JenkinsClient;
use super::types::BuildHistory;
use crate::error::{RelayError, Result};
use crate::params::ParameterBlock;

impl JenkinsClient {
    /// Starts a build of `name`.
    ///
    /// Jenkins only accepts `/build` for jobs without parameters and
    /// `/buildWithParameters` for jobs with them, so a failed `/build` is
    /// followed by exactly one `/buildWithParameters` attempt.
    pub async fn trigger_build(&self, name: &str) -> Result<()> {
        let url = self.job_endpoint(name, &["build"], None)?;

        match self.post(url).await {
            Ok(()) => {
                info!("Triggered '{name}'");
                Ok(())
            }
            Err(e) => {
                warn!("Triggering '{name}' without parameters failed ({e}), retrying with parameters");
                let url = self.job_endpoint(name, &["buildWithParameters"], None)?;
                self.post(url).await?;
                info!("Triggered '{name}' with default parameters");
                Ok(())
            }
        }
    }

    /// Starts a build of `name` with every value in `params` as a query pair.
    pub async fn trigger_build_with_parameters(
        &self,
        name: &str,
        params: &ParameterBlock,
    ) -> Result<()> {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.pairs())
            .finish();

        let url = self.job_endpoint(name, &["buildWithParameters"], Some(query.as_str()))?;
        self.post(url).await?;

        info!("Triggered '{name}' with {} parameter(s)", params.len());
        Ok(())
    }

    /// Parameters used by build `build_number` of `name`, in the order
    /// Jenkins reports them. Null values are left out.
    pub async fn build_parameters(
        &self,
        name: &str,
        build_number: u64,
    ) -> Result<Vec<(String, String)>> {
        let url = self.job_endpoint(
            name,
            &["api", "json"],
            Some("tree=builds[actions[parameters[name,value]],number]"),
        )?;
        let history: BuildHistory = self.get_json(url, "builds").await?;

        let build = history
            .builds
            .into_iter()
            .find(|build| build.number == build_number)
            .ok_or_else(|| {
                RelayError::NotFound(format!("build with runNumber {build_number} not found"))
            })?;

        let parameters = build
            .actions
            .into_iter()
            .flatten()
            .flat_map(|action| action.parameters)
            .filter_map(|param| {
                let value = param.display_value()?;
                Some((param.name, value))
            })
            .collect();

        Ok(parameters)
    }
}
