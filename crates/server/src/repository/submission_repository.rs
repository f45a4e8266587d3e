use super::RepoResult;
use crate::entity::submission;
use algoarena_core::domain::{Language, ProblemId, SubmissionId, SubmissionStatus, UserId};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub language: Language,
    pub status: SubmissionStatus,
    pub source_code: String,
    pub test_cases_passed: u32,
    pub test_cases_total: u32,
    pub runtime_ms: Option<u32>,
    pub memory_kb: Option<u32>,
    pub error_message: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Written by the judging pipeline; only read back here.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub language: Language,
    pub status: SubmissionStatus,
    pub source_code: String,
    pub test_cases_passed: u32,
    pub test_cases_total: u32,
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, new_submission: NewSubmission) -> RepoResult<SubmissionRecord>;
    async fn list_by_user_and_problem(
        &self,
        user_id: UserId,
        problem_id: ProblemId,
    ) -> RepoResult<Vec<SubmissionRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmSubmissionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_language(code: i16) -> anyhow::Result<Language> {
        match code {
            0 => Ok(Language::Rust),
            1 => Ok(Language::Cpp),
            2 => Ok(Language::Java),
            3 => Ok(Language::Python),
            4 => Ok(Language::Go),
            5 => Ok(Language::JavaScript),
            6 => Ok(Language::TypeScript),
            _ => Err(anyhow!("invalid submission.language code from database: {code}")),
        }
    }

    fn map_language_code(language: Language) -> i16 {
        match language {
            Language::Rust => 0,
            Language::Cpp => 1,
            Language::Java => 2,
            Language::Python => 3,
            Language::Go => 4,
            Language::JavaScript => 5,
            Language::TypeScript => 6,
        }
    }

    fn map_status(code: i16) -> anyhow::Result<SubmissionStatus> {
        match code {
            0 => Ok(SubmissionStatus::Pending),
            1 => Ok(SubmissionStatus::Running),
            2 => Ok(SubmissionStatus::Accepted),
            3 => Ok(SubmissionStatus::WrongAnswer),
            4 => Ok(SubmissionStatus::TimeLimitExceeded),
            5 => Ok(SubmissionStatus::RuntimeError),
            6 => Ok(SubmissionStatus::CompileError),
            7 => Ok(SubmissionStatus::InternalError),
            _ => Err(anyhow!("invalid submission.status code from database: {code}")),
        }
    }

    fn map_status_code(status: SubmissionStatus) -> i16 {
        match status {
            SubmissionStatus::Pending => 0,
            SubmissionStatus::Running => 1,
            SubmissionStatus::Accepted => 2,
            SubmissionStatus::WrongAnswer => 3,
            SubmissionStatus::TimeLimitExceeded => 4,
            SubmissionStatus::RuntimeError => 5,
            SubmissionStatus::CompileError => 6,
            SubmissionStatus::InternalError => 7,
        }
    }

    fn non_negative(column: &str, value: i32) -> anyhow::Result<u32> {
        u32::try_from(value).map_err(|_| {
            anyhow!("invalid submission.{column} from database: {value} (must be non-negative)")
        })
    }

    fn map_model(model: submission::Model) -> anyhow::Result<SubmissionRecord> {
        let id = SubmissionId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid submission.id '{}' from database: {e}", model.id))?;
        let user_id = UserId::from_str(&model.user_id).map_err(|e| {
            anyhow!(
                "invalid submission.user_id '{}' from database: {e}",
                model.user_id
            )
        })?;
        let problem_id = ProblemId::from_str(&model.problem_id).map_err(|e| {
            anyhow!(
                "invalid submission.problem_id '{}' from database: {e}",
                model.problem_id
            )
        })?;

        Ok(SubmissionRecord {
            id,
            user_id,
            problem_id,
            language: Self::map_language(model.language)?,
            status: Self::map_status(model.status)?,
            source_code: model.source_code,
            test_cases_passed: Self::non_negative("test_cases_passed", model.test_cases_passed)?,
            test_cases_total: Self::non_negative("test_cases_total", model.test_cases_total)?,
            runtime_ms: model
                .runtime_ms
                .map(|v| Self::non_negative("runtime_ms", v))
                .transpose()?,
            memory_kb: model
                .memory_kb
                .map(|v| Self::non_negative("memory_kb", v))
                .transpose()?,
            error_message: model.error_message,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl SubmissionRepository for SeaOrmSubmissionRepository {
    async fn create(&self, new_submission: NewSubmission) -> RepoResult<SubmissionRecord> {
        let id = SubmissionId::new();
        let now = Utc::now().naive_utc();

        let active_model = submission::ActiveModel {
            id: Set(id.to_string()),
            user_id: Set(new_submission.user_id.to_string()),
            problem_id: Set(new_submission.problem_id.to_string()),
            language: Set(Self::map_language_code(new_submission.language)),
            status: Set(Self::map_status_code(new_submission.status)),
            source_code: Set(new_submission.source_code),
            test_cases_passed: Set(i32::try_from(new_submission.test_cases_passed)
                .map_err(|_| anyhow!("test_cases_passed out of range"))?),
            test_cases_total: Set(i32::try_from(new_submission.test_cases_total)
                .map_err(|_| anyhow!("test_cases_total out of range"))?),
            runtime_ms: Set(None),
            memory_kb: Set(None),
            error_message: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Self::map_model(model)?)
    }

    async fn list_by_user_and_problem(
        &self,
        user_id: UserId,
        problem_id: ProblemId,
    ) -> RepoResult<Vec<SubmissionRecord>> {
        let models = submission::Entity::find()
            .filter(submission::Column::UserId.eq(user_id.to_string()))
            .filter(submission::Column::ProblemId.eq(problem_id.to_string()))
            .order_by_asc(submission::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(Self::map_model)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }
}
