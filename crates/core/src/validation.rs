//! Reference-solution validation.
//!
//! Every reference solution is run against every visible test case on the
//! judge. A problem is accepted only when all of those runs come back with
//! status 3; the first other status rejects the whole problem.

use std::sync::Arc;

use futures_util::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    JudgeClient, JudgeError, JudgeStatus, ReferenceSolution, SubmissionRequest, VisibleTestCase,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("No valid tokens received for {language}")]
    NoTokensReceived { language: String },
    #[error(
        "Reference solution for {language} failed test case. Status: {status_id} ({})",
        status_description(.status_id)
    )]
    ReferenceSolutionFailed { language: String, status_id: u16 },
    #[error("Reference solution validation failed for {language}: {source}")]
    Judge {
        language: String,
        #[source]
        source: JudgeError,
    },
}

/// How the per-language batches are dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// One language at a time; the next batch starts after the previous one
    /// fully resolved.
    #[default]
    Sequential,
    /// All languages at once, failing fast on the first rejection.
    Concurrent,
}

#[derive(Clone)]
pub struct ValidationEngine {
    judge: Arc<dyn JudgeClient>,
    mode: ValidationMode,
}

impl ValidationEngine {
    pub fn new(judge: Arc<dyn JudgeClient>) -> Self {
        Self {
            judge,
            mode: ValidationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    #[tracing::instrument(
        skip_all,
        fields(
            solutions = solutions.len(),
            test_cases = test_cases.len(),
            mode = ?self.mode
        )
    )]
    pub async fn validate_reference_solutions(
        &self,
        solutions: &[ReferenceSolution],
        test_cases: &[VisibleTestCase],
    ) -> Result<(), ValidationError> {
        if test_cases.is_empty() {
            debug!("no visible test cases, nothing to run");
            return Ok(());
        }

        match self.mode {
            ValidationMode::Sequential => {
                for solution in solutions {
                    self.validate_solution(solution, test_cases).await?;
                }
            }
            ValidationMode::Concurrent => {
                try_join_all(
                    solutions
                        .iter()
                        .map(|solution| self.validate_solution(solution, test_cases)),
                )
                .await?;
            }
        }

        info!("all reference solutions accepted");
        Ok(())
    }

    async fn validate_solution(
        &self,
        solution: &ReferenceSolution,
        test_cases: &[VisibleTestCase],
    ) -> Result<(), ValidationError> {
        let language = solution.language.as_str();
        let language_id = self
            .judge
            .resolve_language_id(language)
            .map_err(|_| ValidationError::UnsupportedLanguage(language.to_string()))?;

        let requests: Vec<SubmissionRequest> = test_cases
            .iter()
            .map(|case| SubmissionRequest {
                source_code: solution.complete_code.clone(),
                language_id,
                stdin: case.input.clone(),
                expected_output: case.output.clone(),
            })
            .collect();

        debug!(%language, language_id, batch = requests.len(), "submitting reference batch");
        let submitted = self
            .judge
            .submit_batch(&requests)
            .await
            .map_err(|source| judge_failure(language, source))?;

        let tokens: Vec<String> = submitted
            .into_iter()
            .filter_map(|slot| slot.token)
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.is_empty() {
            warn!(%language, "judge returned no usable tokens");
            return Err(ValidationError::NoTokensReceived {
                language: language.to_string(),
            });
        }

        let verdicts = self
            .judge
            .poll_results(&tokens)
            .await
            .map_err(|source| judge_failure(language, source))?;

        if let Some(failed) = verdicts.iter().find(|verdict| !verdict.is_accepted()) {
            warn!(
                %language,
                token = %failed.token,
                status_id = failed.status_id,
                status = failed.status().description(),
                "reference solution rejected"
            );
            return Err(ValidationError::ReferenceSolutionFailed {
                language: language.to_string(),
                status_id: failed.status_id,
            });
        }

        info!(%language, runs = verdicts.len(), "reference solution accepted");
        Ok(())
    }
}

fn status_description(status_id: &u16) -> &'static str {
    JudgeStatus::from_id(*status_id).description()
}

fn judge_failure(language: &str, source: JudgeError) -> ValidationError {
    match source {
        JudgeError::UnsupportedLanguage(_) => {
            ValidationError::UnsupportedLanguage(language.to_string())
        }
        source => ValidationError::Judge {
            language: language.to_string(),
            source,
        },
    }
}
