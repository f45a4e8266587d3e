use std::sync::Arc;

use algoarena_core::domain::{ProblemId, UserId};

use super::{ServiceError, ServiceResult};
use crate::repository::{
    ProblemRepository, ProblemSummaryRecord, SubmissionRecord, SubmissionRepository,
    UserRepository,
};

/// Read-side queries scoped to the calling user. An empty result is a
/// successful answer.
#[derive(Clone)]
pub struct SubmissionQueries {
    problems: Arc<dyn ProblemRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    users: Arc<dyn UserRepository>,
}

impl SubmissionQueries {
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            problems,
            submissions,
            users,
        }
    }

    pub async fn solved_problems(
        &self,
        user_id: UserId,
    ) -> ServiceResult<Vec<ProblemSummaryRecord>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::NotFound("user"));
        }
        Ok(self.problems.list_solved_by_user(user_id).await?)
    }

    pub async fn submissions_for_problem(
        &self,
        user_id: UserId,
        problem_id: ProblemId,
    ) -> ServiceResult<Vec<SubmissionRecord>> {
        Ok(self
            .submissions
            .list_by_user_and_problem(user_id, problem_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{NewProblem, NewSubmission};
    use crate::testing::{InMemoryProblems, InMemorySubmissions, InMemoryUsers};
    use algoarena_core::domain::{
        Difficulty, Language, ProblemDefinition, SubmissionStatus, Tags,
    };

    fn definition(title: &str) -> ProblemDefinition {
        ProblemDefinition {
            title: title.to_string(),
            description: "d".to_string(),
            difficulty: Difficulty::Medium,
            tags: Tags::parse_delimited("graph,dp").expect("valid tags"),
            visible_test_cases: Vec::new(),
            hidden_test_cases: Vec::new(),
            start_code: Vec::new(),
            reference_solutions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn solved_problems_for_unknown_user_is_not_found() {
        let queries = SubmissionQueries::new(
            Arc::new(InMemoryProblems::default()),
            Arc::new(InMemorySubmissions::default()),
            Arc::new(InMemoryUsers::default()),
        );

        assert!(matches!(
            queries.solved_problems(UserId::new()).await,
            Err(ServiceError::NotFound("user"))
        ));
    }

    #[tokio::test]
    async fn solved_problems_lists_only_the_callers() {
        let problems = Arc::new(InMemoryProblems::default());
        let (users, user_id) = InMemoryUsers::with_user("Grace");
        let queries = SubmissionQueries::new(
            problems.clone(),
            Arc::new(InMemorySubmissions::default()),
            Arc::new(users),
        );

        assert!(queries.solved_problems(user_id).await.expect("empty").is_empty());

        let solved = problems
            .create(NewProblem {
                definition: definition("Shortest path"),
                problem_creator: user_id,
            })
            .await
            .expect("create");
        problems
            .create(NewProblem {
                definition: definition("Knapsack"),
                problem_creator: user_id,
            })
            .await
            .expect("create");
        problems.mark_solved(user_id, solved.id);
        problems.mark_solved(UserId::new(), ProblemId::new());

        let listed = queries.solved_problems(user_id).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, solved.id);
        assert_eq!(listed[0].tags.to_canonical(), "graph,dp");
    }

    #[tokio::test]
    async fn submissions_are_scoped_to_user_and_problem() {
        let submissions = Arc::new(InMemorySubmissions::default());
        let queries = SubmissionQueries::new(
            Arc::new(InMemoryProblems::default()),
            submissions.clone(),
            Arc::new(InMemoryUsers::default()),
        );
        let user_id = UserId::new();
        let problem_id = ProblemId::new();

        assert!(
            queries
                .submissions_for_problem(user_id, problem_id)
                .await
                .expect("no submissions yet")
                .is_empty()
        );

        for (owner, problem) in [
            (user_id, problem_id),
            (user_id, ProblemId::new()),
            (UserId::new(), problem_id),
        ] {
            submissions
                .create(NewSubmission {
                    user_id: owner,
                    problem_id: problem,
                    language: Language::Python,
                    status: SubmissionStatus::Accepted,
                    source_code: "print(5)".to_string(),
                    test_cases_passed: 1,
                    test_cases_total: 1,
                })
                .await
                .expect("create submission");
        }

        let listed = queries
            .submissions_for_problem(user_id, problem_id)
            .await
            .expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, user_id);
        assert_eq!(listed[0].problem_id, problem_id);
    }
}
