use std::sync::Arc;

use algoarena_core::ValidationEngine;
use algoarena_core::domain::{ProblemDefinition, ProblemId, ProblemPatch, UserId};
use tracing::{debug, info};

use super::{ServiceError, ServiceResult};
use crate::repository::{
    NewProblem, ProblemRecord, ProblemRepository, ProblemSummaryRecord, UserRepository,
    VideoRecord, VideoRepository,
};

/// A stored problem with its editorial video, if one was uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemView {
    pub problem: ProblemRecord,
    pub video: Option<VideoRecord>,
}

/// Authoring workflow: nothing reaches the store until every reference
/// solution has passed every visible test case on the judge.
#[derive(Clone)]
pub struct ProblemService {
    problems: Arc<dyn ProblemRepository>,
    users: Arc<dyn UserRepository>,
    videos: Arc<dyn VideoRepository>,
    validation: ValidationEngine,
}

impl ProblemService {
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        users: Arc<dyn UserRepository>,
        videos: Arc<dyn VideoRepository>,
        validation: ValidationEngine,
    ) -> Self {
        Self {
            problems,
            users,
            videos,
            validation,
        }
    }

    #[tracing::instrument(skip(self, definition), fields(title = %definition.title))]
    pub async fn create_problem(
        &self,
        definition: ProblemDefinition,
        creator: UserId,
    ) -> ServiceResult<ProblemRecord> {
        if self.users.find_by_id(creator).await?.is_none() {
            return Err(ServiceError::NotFound("user"));
        }
        definition.check_required_fields()?;

        self.validation
            .validate_reference_solutions(
                &definition.reference_solutions,
                &definition.visible_test_cases,
            )
            .await?;

        let record = self
            .problems
            .create(NewProblem {
                definition,
                problem_creator: creator,
            })
            .await?;
        info!(problem_id = %record.id, "problem created");
        Ok(record)
    }

    /// Lets callers report a missing problem before judging the request body.
    pub async fn ensure_exists(&self, problem_id: ProblemId) -> ServiceResult<()> {
        match self.problems.find_by_id(problem_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound("problem")),
        }
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update_problem(
        &self,
        problem_id: ProblemId,
        mut patch: ProblemPatch,
    ) -> ServiceResult<ProblemRecord> {
        let Some(existing) = self.problems.find_by_id(problem_id).await? else {
            return Err(ServiceError::NotFound("problem"));
        };

        patch.drop_incomplete_entries();

        if patch.requires_revalidation() {
            let solutions = patch.reference_solutions.as_deref().unwrap_or_default();
            let cases = patch.visible_test_cases.as_deref().unwrap_or_default();
            self.validation
                .validate_reference_solutions(solutions, cases)
                .await?;
        } else {
            debug!("patch does not carry both test cases and solutions, skipping validation");
        }

        if patch.is_empty() {
            debug!("nothing left to write after filtering");
            return Ok(existing);
        }

        let updated = self
            .problems
            .update(problem_id, patch)
            .await?
            .ok_or(ServiceError::NotFound("problem"))?;
        info!(problem_id = %updated.id, "problem updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_problem(&self, problem_id: ProblemId) -> ServiceResult<()> {
        if !self.problems.delete(problem_id).await? {
            return Err(ServiceError::NotFound("problem"));
        }
        info!(%problem_id, "problem deleted");
        Ok(())
    }

    pub async fn get_problem(&self, problem_id: ProblemId) -> ServiceResult<ProblemView> {
        let problem = self
            .problems
            .find_by_id(problem_id)
            .await?
            .ok_or(ServiceError::NotFound("problem"))?;
        let video = self.videos.find_by_problem_id(problem_id).await?;

        Ok(ProblemView { problem, video })
    }

    pub async fn list_problems(&self) -> ServiceResult<Vec<ProblemSummaryRecord>> {
        let summaries = self.problems.list_summaries().await?;
        if summaries.is_empty() {
            return Err(ServiceError::NotFound("problems"));
        }
        Ok(summaries)
    }
}
