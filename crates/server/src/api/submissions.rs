//! Read-side routes for the signed-in user.

use std::sync::Arc;

use algoarena_api_types::{ProblemSummary, SubmissionView};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use super::caller::Caller;
use super::convert::{parse_problem_id, problem_summary, submission_view};
use super::error::ApiError;
use super::state::AppState;

pub fn create_submission_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/me/solved-problems", get(solved_problems))
        .route(
            "/api/users/me/problems/{problem_id}/submissions",
            get(submissions_for_problem),
        )
}

async fn solved_problems(
    State(state): State<Arc<AppState>>,
    Caller(user_id): Caller,
) -> Result<Json<Vec<ProblemSummary>>, ApiError> {
    let solved = state.submissions.solved_problems(user_id).await?;
    Ok(Json(solved.into_iter().map(problem_summary).collect()))
}

async fn submissions_for_problem(
    State(state): State<Arc<AppState>>,
    Caller(user_id): Caller,
    Path(problem_id): Path<String>,
) -> Result<Json<Vec<SubmissionView>>, ApiError> {
    let problem_id = parse_problem_id(&problem_id)?;
    let submissions = state
        .submissions
        .submissions_for_problem(user_id, problem_id)
        .await?;
    Ok(Json(submissions.into_iter().map(submission_view).collect()))
}
