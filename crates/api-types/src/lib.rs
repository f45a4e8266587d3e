//! Shared request/response types used by API-facing crates.
//!
//! Field names follow the camelCase wire format of the authoring UI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

/// Tags arrive either as `"array, dp"` or as `["array", "dp"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    Delimited(String),
    List(Vec<String>),
}

/// Entries are deserialized leniently: missing strings become empty and are
/// judged by the domain layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibleTestCaseDto {
    pub input: String,
    pub output: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiddenTestCaseDto {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartCodeDto {
    pub language: String,
    pub initial_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceSolutionDto {
    pub language: String,
    pub complete_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: TagsField,
    #[serde(default)]
    pub visible_test_cases: Vec<VisibleTestCaseDto>,
    #[serde(default)]
    pub hidden_test_cases: Vec<HiddenTestCaseDto>,
    #[serde(default)]
    pub start_code: Vec<StartCodeDto>,
    #[serde(default)]
    pub reference_solution: Vec<ReferenceSolutionDto>,
}

/// Partial update. Absent and `null` fields are both left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProblemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Option<TagsField>,
    pub visible_test_cases: Option<Vec<Option<VisibleTestCaseDto>>>,
    pub hidden_test_cases: Option<Vec<Option<HiddenTestCaseDto>>>,
    pub start_code: Option<Vec<Option<StartCodeDto>>>,
    pub reference_solution: Option<Vec<Option<ReferenceSolutionDto>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: String,
    pub visible_test_cases: Vec<VisibleTestCaseDto>,
    /// Only echoed back to the author on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_test_cases: Option<Vec<HiddenTestCaseDto>>,
    pub start_code: Vec<StartCodeDto>,
    pub reference_solution: Vec<ReferenceSolutionDto>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub secure_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSummary {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProblemResponse {
    pub success: bool,
    pub message: String,
    pub data: ProblemDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: String,
    pub problem_id: String,
    pub language: String,
    pub status: String,
    pub code: String,
    pub test_cases_passed: u32,
    pub test_cases_total: u32,
    pub runtime_ms: Option<u32>,
    pub memory_kb: Option<u32>,
    pub error_message: Option<String>,
    pub created_at: String,
}
