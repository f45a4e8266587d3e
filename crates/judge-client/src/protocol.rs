use serde::{Deserialize, Serialize};

use algoarena_core::domain::SubmissionRequest;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BatchSubmission<'a> {
    pub submissions: Vec<SubmissionPayload<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubmissionPayload<'a> {
    pub source_code: &'a str,
    pub language_id: u32,
    pub stdin: &'a str,
    pub expected_output: &'a str,
}

impl<'a> From<&'a SubmissionRequest> for SubmissionPayload<'a> {
    fn from(request: &'a SubmissionRequest) -> Self {
        Self {
            source_code: &request.source_code,
            language_id: request.language_id,
            stdin: &request.stdin,
            expected_output: &request.expected_output,
        }
    }
}

/// One element of the batch-create response. Refused entries carry an error
/// object instead of a token.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedSubmission {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BatchStatus {
    pub submissions: Vec<SubmissionStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SubmissionStatus {
    pub token: String,
    pub status_id: u16,
}
