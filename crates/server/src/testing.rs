//! In-memory stand-ins for the store and the judge.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use algoarena_core::domain::{
    JudgeClient, JudgeError, Language, ProblemId, ProblemPatch, SubmissionId, SubmissionRequest,
    SubmissionToken, UserId, Verdict,
};
use async_trait::async_trait;
use chrono::Utc;
use judge_client::judge0_language_id;

use crate::repository::{
    NewProblem, NewSubmission, NewUser, ProblemRecord, ProblemRepository, ProblemSummaryRecord,
    RepoResult, RepositoryError, SubmissionRecord, SubmissionRepository, UserRecord,
    UserRepository, VideoRecord, VideoRepository,
};

#[derive(Default)]
pub struct InMemoryProblems {
    records: Mutex<Vec<ProblemRecord>>,
    solved: Mutex<Vec<(UserId, ProblemId)>>,
}

impl InMemoryProblems {
    pub fn all(&self) -> Vec<ProblemRecord> {
        self.records.lock().expect("lock problems").clone()
    }

    pub fn mark_solved(&self, user_id: UserId, problem_id: ProblemId) {
        self.solved
            .lock()
            .expect("lock solved")
            .push((user_id, problem_id));
    }

    fn summary(record: &ProblemRecord) -> ProblemSummaryRecord {
        ProblemSummaryRecord {
            id: record.id,
            title: record.title.clone(),
            difficulty: record.difficulty,
            tags: record.tags.clone(),
        }
    }

    fn ensure_unique_title(
        records: &[ProblemRecord],
        title: &str,
        except: Option<ProblemId>,
    ) -> RepoResult<()> {
        if records
            .iter()
            .any(|record| record.title == title && Some(record.id) != except)
        {
            return Err(RepositoryError::Duplicate {
                field: "title".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProblemRepository for InMemoryProblems {
    async fn create(&self, new_problem: NewProblem) -> RepoResult<ProblemRecord> {
        let mut records = self.records.lock().expect("lock problems");
        let definition = new_problem.definition;
        let title = definition.title.trim().to_string();
        Self::ensure_unique_title(&records, &title, None)?;

        let record = ProblemRecord {
            id: ProblemId::new(),
            title,
            description: definition.description.trim().to_string(),
            difficulty: definition.difficulty,
            tags: definition.tags,
            visible_test_cases: definition.visible_test_cases,
            hidden_test_cases: definition.hidden_test_cases,
            start_code: definition.start_code,
            reference_solutions: definition.reference_solutions,
            problem_creator: new_problem.problem_creator,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, problem_id: ProblemId) -> RepoResult<Option<ProblemRecord>> {
        Ok(self
            .records
            .lock()
            .expect("lock problems")
            .iter()
            .find(|record| record.id == problem_id)
            .cloned())
    }

    async fn list_summaries(&self) -> RepoResult<Vec<ProblemSummaryRecord>> {
        Ok(self
            .records
            .lock()
            .expect("lock problems")
            .iter()
            .map(Self::summary)
            .collect())
    }

    async fn list_solved_by_user(&self, user_id: UserId) -> RepoResult<Vec<ProblemSummaryRecord>> {
        let records = self.records.lock().expect("lock problems");
        let solved = self.solved.lock().expect("lock solved");
        Ok(solved
            .iter()
            .filter(|(solver, _)| *solver == user_id)
            .filter_map(|(_, problem_id)| records.iter().find(|record| record.id == *problem_id))
            .map(Self::summary)
            .collect())
    }

    async fn update(
        &self,
        problem_id: ProblemId,
        patch: ProblemPatch,
    ) -> RepoResult<Option<ProblemRecord>> {
        let mut records = self.records.lock().expect("lock problems");
        if let Some(title) = patch.title.as_deref() {
            Self::ensure_unique_title(&records, title, Some(problem_id))?;
        }
        let Some(record) = records.iter_mut().find(|record| record.id == problem_id) else {
            return Ok(None);
        };
        apply_patch(record, patch);
        Ok(Some(record.clone()))
    }

    async fn delete(&self, problem_id: ProblemId) -> RepoResult<bool> {
        let mut records = self.records.lock().expect("lock problems");
        let before = records.len();
        records.retain(|record| record.id != problem_id);
        Ok(records.len() != before)
    }
}

/// Overlays every field the patch carries.
fn apply_patch(record: &mut ProblemRecord, patch: ProblemPatch) {
    if let Some(title) = patch.title {
        record.title = title;
    }
    if let Some(description) = patch.description {
        record.description = description;
    }
    if let Some(difficulty) = patch.difficulty {
        record.difficulty = difficulty;
    }
    if let Some(tags) = patch.tags {
        record.tags = tags;
    }
    if let Some(cases) = patch.visible_test_cases {
        record.visible_test_cases = cases;
    }
    if let Some(cases) = patch.hidden_test_cases {
        record.hidden_test_cases = cases;
    }
    if let Some(codes) = patch.start_code {
        record.start_code = codes;
    }
    if let Some(solutions) = patch.reference_solutions {
        record.reference_solutions = solutions;
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    records: Mutex<Vec<UserRecord>>,
}

impl InMemoryUsers {
    pub fn with_user(first_name: &str) -> (Self, UserId) {
        let user = UserRecord {
            id: UserId::new(),
            first_name: first_name.to_string(),
            email: format!("{}@example.com", first_name.to_ascii_lowercase()),
        };
        let id = user.id;
        (
            Self {
                records: Mutex::new(vec![user]),
            },
            id,
        )
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, new_user: NewUser) -> RepoResult<UserRecord> {
        let record = UserRecord {
            id: UserId::new(),
            first_name: new_user.first_name,
            email: new_user.email,
        };
        self.records
            .lock()
            .expect("lock users")
            .push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, user_id: UserId) -> RepoResult<Option<UserRecord>> {
        Ok(self
            .records
            .lock()
            .expect("lock users")
            .iter()
            .find(|user| user.id == user_id)
            .cloned())
    }

    async fn record_solved(&self, _user_id: UserId, _problem_id: ProblemId) -> RepoResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryVideos {
    records: Mutex<HashMap<ProblemId, VideoRecord>>,
}

impl InMemoryVideos {
    pub fn attach(&self, problem_id: ProblemId, video: VideoRecord) {
        self.records
            .lock()
            .expect("lock videos")
            .insert(problem_id, video);
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideos {
    async fn find_by_problem_id(&self, problem_id: ProblemId) -> RepoResult<Option<VideoRecord>> {
        Ok(self
            .records
            .lock()
            .expect("lock videos")
            .get(&problem_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemorySubmissions {
    records: Mutex<Vec<SubmissionRecord>>,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissions {
    async fn create(&self, new_submission: NewSubmission) -> RepoResult<SubmissionRecord> {
        let record = SubmissionRecord {
            id: SubmissionId::new(),
            user_id: new_submission.user_id,
            problem_id: new_submission.problem_id,
            language: new_submission.language,
            status: new_submission.status,
            source_code: new_submission.source_code,
            test_cases_passed: new_submission.test_cases_passed,
            test_cases_total: new_submission.test_cases_total,
            runtime_ms: None,
            memory_kb: None,
            error_message: None,
            created_at: Utc::now().naive_utc(),
        };
        self.records
            .lock()
            .expect("lock submissions")
            .push(record.clone());
        Ok(record)
    }

    async fn list_by_user_and_problem(
        &self,
        user_id: UserId,
        problem_id: ProblemId,
    ) -> RepoResult<Vec<SubmissionRecord>> {
        Ok(self
            .records
            .lock()
            .expect("lock submissions")
            .iter()
            .filter(|record| record.user_id == user_id && record.problem_id == problem_id)
            .cloned()
            .collect())
    }
}

/// Answers every run with the same status and counts round-trips.
pub struct StubJudge {
    status_id: u16,
    outage: bool,
    submits: AtomicUsize,
    polls: AtomicUsize,
}

impl StubJudge {
    pub fn answering(status_id: u16) -> Self {
        Self {
            status_id,
            outage: false,
            submits: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
        }
    }

    /// Refuses every batch as if the judge were down.
    pub fn down() -> Self {
        Self {
            outage: true,
            ..Self::answering(3)
        }
    }

    pub fn calls(&self) -> usize {
        self.submits.load(Ordering::SeqCst) + self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JudgeClient for StubJudge {
    fn resolve_language_id(&self, language: &str) -> Result<u32, JudgeError> {
        Language::from_label(language)
            .map(judge0_language_id)
            .ok_or_else(|| JudgeError::UnsupportedLanguage(language.to_string()))
    }

    async fn submit_batch(
        &self,
        requests: &[SubmissionRequest],
    ) -> Result<Vec<SubmissionToken>, JudgeError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        if self.outage {
            return Err(JudgeError::Unavailable("down".to_string()));
        }
        Ok((0..requests.len())
            .map(|i| SubmissionToken {
                token: Some(format!("token-{i}")),
            })
            .collect())
    }

    async fn poll_results(&self, tokens: &[String]) -> Result<Vec<Verdict>, JudgeError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        Ok(tokens
            .iter()
            .map(|token| Verdict {
                token: token.clone(),
                status_id: self.status_id,
            })
            .collect())
    }
}
