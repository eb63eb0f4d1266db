//! Analysis workflow.
//!
//! [`AnalysisSession`] is the single context object handed to the CLI layer:
//! it owns the credential store, the request parameters, and the last
//! produced report. One `analyze` call is a stateless render -> send ->
//! format pass; only the finished report is retained.

use std::time::Duration;

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::openrouter::{ApiClient, ApiOutcome, FailureKind};
use crate::prompt::{render, AnalysisMode};
use crate::report::Report;

/// Why an analysis did not produce a report
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// No API key configured; caught before any network traffic
    #[error("no API key configured")]
    MissingCredential,

    /// Nothing to analyze; caught before any network traffic
    #[error("no code to analyze")]
    EmptyInput,

    /// The exchange with the endpoint failed
    #[error("{message}")]
    Api { kind: FailureKind, message: String },
}

/// Everything one analysis run needs, constructed once per process.
pub struct AnalysisSession {
    credentials: CredentialStore,
    client: ApiClient,
    model: String,
    timeout: Duration,
    last_report: Option<Report>,
}

impl AnalysisSession {
    pub fn new(credentials: CredentialStore, config: &Config) -> Self {
        Self {
            credentials,
            client: ApiClient::with_base_url(config.endpoint()),
            model: config.api.model.clone(),
            timeout: Duration::from_secs(config.api.timeout_secs),
            last_report: None,
        }
    }

    /// Model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Rendered prompt for a submission, exposed for `--debug` output.
    pub fn preview_prompt(&self, code: &str, mode: AnalysisMode) -> String {
        render(mode, code).as_str().to_string()
    }

    /// Run one analysis. Empty input and a missing credential are rejected
    /// here, before the request is built; every other failure comes back
    /// classified from the exchange itself.
    pub async fn analyze(
        &mut self,
        code: &str,
        mode: AnalysisMode,
    ) -> Result<Report, AnalysisError> {
        if code.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let credential = self
            .credentials
            .load()
            .ok_or(AnalysisError::MissingCredential)?;

        let prompt = render(mode, code);
        let outcome = self
            .client
            .send(&prompt, &credential, &self.model, self.timeout)
            .await;

        match outcome {
            ApiOutcome::Success { body } => {
                let report = Report::new(mode, &self.model, body);
                self.last_report = Some(report.clone());
                Ok(report)
            }
            ApiOutcome::Failure { kind, message } => Err(AnalysisError::Api { kind, message }),
        }
    }

    /// The report from the most recent successful analysis.
    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// Clear retained state. Safe to call any number of times.
    pub fn reset(&mut self) {
        self.last_report = None;
    }
}
