use super::RepoResult;
use crate::entity::{problem, solved_problem};
use algoarena_core::domain::{
    Difficulty, HiddenTestCase, ProblemDefinition, ProblemId, ProblemPatch, ReferenceSolution,
    StartCode, Tags, UserId, VisibleTestCase,
};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRecord {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Tags,
    pub visible_test_cases: Vec<VisibleTestCase>,
    pub hidden_test_cases: Vec<HiddenTestCase>,
    pub start_code: Vec<StartCode>,
    pub reference_solutions: Vec<ReferenceSolution>,
    pub problem_creator: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSummaryRecord {
    pub id: ProblemId,
    pub title: String,
    pub difficulty: Difficulty,
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct NewProblem {
    pub definition: ProblemDefinition,
    pub problem_creator: UserId,
}

#[async_trait]
pub trait ProblemRepository: Send + Sync {
    async fn create(&self, new_problem: NewProblem) -> RepoResult<ProblemRecord>;
    async fn find_by_id(&self, problem_id: ProblemId) -> RepoResult<Option<ProblemRecord>>;
    async fn list_summaries(&self) -> RepoResult<Vec<ProblemSummaryRecord>>;
    async fn list_solved_by_user(&self, user_id: UserId) -> RepoResult<Vec<ProblemSummaryRecord>>;
    /// Writes the patch and returns the stored document, or `None` when the
    /// id does not exist.
    async fn update(
        &self,
        problem_id: ProblemId,
        patch: ProblemPatch,
    ) -> RepoResult<Option<ProblemRecord>>;
    async fn delete(&self, problem_id: ProblemId) -> RepoResult<bool>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredVisibleTestCase {
    input: String,
    output: String,
    explanation: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredHiddenTestCase {
    input: String,
    output: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStartCode {
    language: String,
    initial_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredReferenceSolution {
    language: String,
    complete_code: String,
}

#[derive(Clone)]
pub struct SeaOrmProblemRepository {
    db: DatabaseConnection,
}

type SummaryRow = (String, String, i16, String);

impl SeaOrmProblemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_difficulty(code: i16) -> anyhow::Result<Difficulty> {
        match code {
            0 => Ok(Difficulty::Easy),
            1 => Ok(Difficulty::Medium),
            2 => Ok(Difficulty::Hard),
            _ => Err(anyhow!("invalid problem.difficulty code from database: {code}")),
        }
    }

    fn map_difficulty_code(difficulty: Difficulty) -> i16 {
        match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    fn map_id(raw: &str) -> anyhow::Result<ProblemId> {
        ProblemId::from_str(raw)
            .map_err(|e| anyhow!("invalid problem.id '{raw}' from database: {e}"))
    }

    fn map_tags(raw: &str) -> anyhow::Result<Tags> {
        Tags::parse_delimited(raw)
            .map_err(|e| anyhow!("invalid problem.tags '{raw}' from database: {e}"))
    }

    fn encode<T: Serialize>(column: &str, value: &T) -> anyhow::Result<String> {
        serde_json::to_string(value).with_context(|| format!("failed to encode problem.{column}"))
    }

    fn decode<T: DeserializeOwned>(column: &str, raw: &str) -> anyhow::Result<T> {
        serde_json::from_str(raw)
            .with_context(|| format!("invalid problem.{column} document from database"))
    }

    fn encode_visible(cases: &[VisibleTestCase]) -> anyhow::Result<String> {
        let stored: Vec<StoredVisibleTestCase> = cases
            .iter()
            .map(|case| StoredVisibleTestCase {
                input: case.input.clone(),
                output: case.output.clone(),
                explanation: case.explanation.clone(),
            })
            .collect();
        Self::encode("visible_test_cases", &stored)
    }

    fn encode_hidden(cases: &[HiddenTestCase]) -> anyhow::Result<String> {
        let stored: Vec<StoredHiddenTestCase> = cases
            .iter()
            .map(|case| StoredHiddenTestCase {
                input: case.input.clone(),
                output: case.output.clone(),
            })
            .collect();
        Self::encode("hidden_test_cases", &stored)
    }

    fn encode_start_code(codes: &[StartCode]) -> anyhow::Result<String> {
        let stored: Vec<StoredStartCode> = codes
            .iter()
            .map(|code| StoredStartCode {
                language: code.language.clone(),
                initial_code: code.initial_code.clone(),
            })
            .collect();
        Self::encode("start_code", &stored)
    }

    fn encode_solutions(solutions: &[ReferenceSolution]) -> anyhow::Result<String> {
        let stored: Vec<StoredReferenceSolution> = solutions
            .iter()
            .map(|solution| StoredReferenceSolution {
                language: solution.language.clone(),
                complete_code: solution.complete_code.clone(),
            })
            .collect();
        Self::encode("reference_solution", &stored)
    }

    fn map_model(model: problem::Model) -> anyhow::Result<ProblemRecord> {
        let visible: Vec<StoredVisibleTestCase> =
            Self::decode("visible_test_cases", &model.visible_test_cases)?;
        let hidden: Vec<StoredHiddenTestCase> =
            Self::decode("hidden_test_cases", &model.hidden_test_cases)?;
        let start_code: Vec<StoredStartCode> = Self::decode("start_code", &model.start_code)?;
        let solutions: Vec<StoredReferenceSolution> =
            Self::decode("reference_solution", &model.reference_solution)?;
        let problem_creator = UserId::from_str(&model.problem_creator).map_err(|e| {
            anyhow!(
                "invalid problem.problem_creator '{}' from database: {e}",
                model.problem_creator
            )
        })?;

        Ok(ProblemRecord {
            id: Self::map_id(&model.id)?,
            title: model.title,
            description: model.description,
            difficulty: Self::map_difficulty(model.difficulty)?,
            tags: Self::map_tags(&model.tags)?,
            visible_test_cases: visible
                .into_iter()
                .map(|case| VisibleTestCase {
                    input: case.input,
                    output: case.output,
                    explanation: case.explanation,
                })
                .collect(),
            hidden_test_cases: hidden
                .into_iter()
                .map(|case| HiddenTestCase {
                    input: case.input,
                    output: case.output,
                })
                .collect(),
            start_code: start_code
                .into_iter()
                .map(|code| StartCode {
                    language: code.language,
                    initial_code: code.initial_code,
                })
                .collect(),
            reference_solutions: solutions
                .into_iter()
                .map(|solution| ReferenceSolution {
                    language: solution.language,
                    complete_code: solution.complete_code,
                })
                .collect(),
            problem_creator,
        })
    }

    fn map_summary(
        (id, title, difficulty, tags): SummaryRow,
    ) -> anyhow::Result<ProblemSummaryRecord> {
        Ok(ProblemSummaryRecord {
            id: Self::map_id(&id)?,
            title,
            difficulty: Self::map_difficulty(difficulty)?,
            tags: Self::map_tags(&tags)?,
        })
    }

    fn summary_columns() -> [problem::Column; 4] {
        [
            problem::Column::Id,
            problem::Column::Title,
            problem::Column::Difficulty,
            problem::Column::Tags,
        ]
    }
}

#[async_trait]
impl ProblemRepository for SeaOrmProblemRepository {
    async fn create(&self, new_problem: NewProblem) -> RepoResult<ProblemRecord> {
        let id = ProblemId::new();
        let now = Utc::now().naive_utc();
        let definition = new_problem.definition;

        let active_model = problem::ActiveModel {
            id: Set(id.to_string()),
            title: Set(definition.title.trim().to_string()),
            description: Set(definition.description.trim().to_string()),
            difficulty: Set(Self::map_difficulty_code(definition.difficulty)),
            tags: Set(definition.tags.to_canonical()),
            visible_test_cases: Set(Self::encode_visible(&definition.visible_test_cases)?),
            hidden_test_cases: Set(Self::encode_hidden(&definition.hidden_test_cases)?),
            start_code: Set(Self::encode_start_code(&definition.start_code)?),
            reference_solution: Set(Self::encode_solutions(&definition.reference_solutions)?),
            problem_creator: Set(new_problem.problem_creator.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Self::map_model(model)?)
    }

    async fn find_by_id(&self, problem_id: ProblemId) -> RepoResult<Option<ProblemRecord>> {
        let model = problem::Entity::find_by_id(problem_id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(Self::map_model).transpose()?)
    }

    async fn list_summaries(&self) -> RepoResult<Vec<ProblemSummaryRecord>> {
        let rows: Vec<SummaryRow> = problem::Entity::find()
            .select_only()
            .columns(Self::summary_columns())
            .order_by_asc(problem::Column::CreatedAt)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(Self::map_summary)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn list_solved_by_user(&self, user_id: UserId) -> RepoResult<Vec<ProblemSummaryRecord>> {
        let rows: Vec<SummaryRow> = problem::Entity::find()
            .select_only()
            .columns(Self::summary_columns())
            .join(JoinType::InnerJoin, problem::Relation::SolvedProblem.def())
            .filter(solved_problem::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(solved_problem::Column::SolvedAt)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(Self::map_summary)
            .collect::<anyhow::Result<Vec<_>>>()?)
    }

    async fn update(
        &self,
        problem_id: ProblemId,
        patch: ProblemPatch,
    ) -> RepoResult<Option<ProblemRecord>> {
        let Some(model) = problem::Entity::find_by_id(problem_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: problem::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(description) = patch.description {
            active_model.description = Set(description);
        }
        if let Some(difficulty) = patch.difficulty {
            active_model.difficulty = Set(Self::map_difficulty_code(difficulty));
        }
        if let Some(tags) = patch.tags {
            active_model.tags = Set(tags.to_canonical());
        }
        if let Some(cases) = patch.visible_test_cases {
            active_model.visible_test_cases = Set(Self::encode_visible(&cases)?);
        }
        if let Some(cases) = patch.hidden_test_cases {
            active_model.hidden_test_cases = Set(Self::encode_hidden(&cases)?);
        }
        if let Some(codes) = patch.start_code {
            active_model.start_code = Set(Self::encode_start_code(&codes)?);
        }
        if let Some(solutions) = patch.reference_solutions {
            active_model.reference_solution = Set(Self::encode_solutions(&solutions)?);
        }
        active_model.updated_at = Set(Utc::now().naive_utc());

        let updated = active_model.update(&self.db).await?;
        Ok(Self::map_model(updated).map(Some)?)
    }

    async fn delete(&self, problem_id: ProblemId) -> RepoResult<bool> {
        let result = problem::Entity::delete_by_id(problem_id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_and_migrate;
    use crate::repository::{
        NewSubmission, NewUser, RepositoryError, SeaOrmSubmissionRepository, SeaOrmUserRepository,
        SubmissionRepository, UserRepository,
    };
    use algoarena_core::domain::{Language, SubmissionStatus};

    async fn setup() -> (
        SeaOrmProblemRepository,
        SeaOrmUserRepository,
        UserId,
        DatabaseConnection,
    ) {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("in-memory database");
        let users = SeaOrmUserRepository::new(db.clone());
        let creator = users
            .create(NewUser {
                first_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .expect("create user")
            .id;
        (SeaOrmProblemRepository::new(db.clone()), users, creator, db)
    }

    fn definition(title: &str) -> ProblemDefinition {
        ProblemDefinition {
            title: title.to_string(),
            description: "Add two integers.".to_string(),
            difficulty: Difficulty::Medium,
            tags: Tags::parse_labels(["dp", "array"]).expect("valid tags"),
            visible_test_cases: vec![VisibleTestCase {
                input: "2 3".to_string(),
                output: "5".to_string(),
                explanation: "2 + 3".to_string(),
            }],
            hidden_test_cases: vec![HiddenTestCase {
                input: "10 20".to_string(),
                output: "30".to_string(),
            }],
            start_code: vec![StartCode {
                language: "cpp".to_string(),
                initial_code: "int main() {}".to_string(),
            }],
            reference_solutions: vec![ReferenceSolution {
                language: "cpp".to_string(),
                complete_code: "int main() { return 0; }".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn stores_and_reads_back_the_full_document() {
        let (repo, _, creator, _) = setup().await;

        let created = repo
            .create(NewProblem {
                definition: definition("Sum"),
                problem_creator: creator,
            })
            .await
            .expect("create problem");
        let found = repo
            .find_by_id(created.id)
            .await
            .expect("query")
            .expect("problem exists");

        assert_eq!(found, created);
        assert_eq!(found.problem_creator, creator);
        assert_eq!(found.tags.to_canonical(), "dp,array");
        assert_eq!(found.hidden_test_cases[0].output, "30");
        assert!(repo.find_by_id(ProblemId::new()).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn duplicate_title_names_the_field() {
        let (repo, _, creator, _) = setup().await;
        repo.create(NewProblem {
            definition: definition("Sum"),
            problem_creator: creator,
        })
        .await
        .expect("first create");

        let err = repo
            .create(NewProblem {
                definition: definition("Sum"),
                problem_creator: creator,
            })
            .await
            .expect_err("duplicate title");

        assert!(matches!(err, RepositoryError::Duplicate { ref field } if field == "title"));
    }

    #[tokio::test]
    async fn update_overlays_only_patched_fields() {
        let (repo, _, creator, _) = setup().await;
        let created = repo
            .create(NewProblem {
                definition: definition("Sum"),
                problem_creator: creator,
            })
            .await
            .expect("create");

        let updated = repo
            .update(
                created.id,
                ProblemPatch {
                    difficulty: Some(Difficulty::Hard),
                    hidden_test_cases: Some(Vec::new()),
                    ..ProblemPatch::default()
                },
            )
            .await
            .expect("update")
            .expect("problem exists");

        assert_eq!(updated.difficulty, Difficulty::Hard);
        assert!(updated.hidden_test_cases.is_empty());
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.reference_solutions, created.reference_solutions);

        let missing = repo
            .update(ProblemId::new(), ProblemPatch::default())
            .await
            .expect("update of missing id");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn summaries_and_solved_lists() {
        let (repo, users, creator, _) = setup().await;
        let first = repo
            .create(NewProblem {
                definition: definition("First"),
                problem_creator: creator,
            })
            .await
            .expect("create");
        repo.create(NewProblem {
            definition: definition("Second"),
            problem_creator: creator,
        })
        .await
        .expect("create");

        let summaries = repo.list_summaries().await.expect("summaries");
        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().any(|s| s.title == "Second"));

        assert!(repo.list_solved_by_user(creator).await.expect("solved").is_empty());
        users
            .record_solved(creator, first.id)
            .await
            .expect("record solve");
        users
            .record_solved(creator, first.id)
            .await
            .expect("second solve is a no-op");

        let solved = repo.list_solved_by_user(creator).await.expect("solved");
        assert_eq!(
            solved,
            vec![ProblemSummaryRecord {
                id: first.id,
                title: "First".to_string(),
                difficulty: Difficulty::Medium,
                tags: first.tags.clone(),
            }]
        );
    }

    #[tokio::test]
    async fn delete_removes_problem_and_its_submissions() {
        let (repo, _, creator, db) = setup().await;
        let submissions = SeaOrmSubmissionRepository::new(db);
        let created = repo
            .create(NewProblem {
                definition: definition("Sum"),
                problem_creator: creator,
            })
            .await
            .expect("create");
        submissions
            .create(NewSubmission {
                user_id: creator,
                problem_id: created.id,
                language: Language::Cpp,
                status: SubmissionStatus::WrongAnswer,
                source_code: "int main() {}".to_string(),
                test_cases_passed: 0,
                test_cases_total: 2,
            })
            .await
            .expect("create submission");

        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(!repo.delete(created.id).await.expect("second delete"));
        assert!(
            submissions
                .list_by_user_and_problem(creator, created.id)
                .await
                .expect("list")
                .is_empty()
        );
    }
}
