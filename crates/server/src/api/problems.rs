//! Problem authoring routes.

use std::sync::Arc;

use algoarena_api_types::{
    CreateProblemRequest, CreateProblemResponse, MessageResponse, ProblemDetail, ProblemSummary,
    UpdateProblemRequest, UpdateProblemResponse,
};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use super::caller::Caller;
use super::convert::{
    authoring_detail, definition_from_request, parse_problem_id, patch_from_request,
    problem_detail, problem_summary,
};
use super::error::ApiError;
use super::state::AppState;

pub fn create_problem_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/problems", get(list_problems).post(create_problem))
        .route(
            "/api/problems/{id}",
            get(get_problem).put(update_problem).delete(delete_problem),
        )
}

async fn create_problem(
    State(state): State<Arc<AppState>>,
    Caller(creator): Caller,
    payload: Result<Json<CreateProblemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateProblemResponse>), ApiError> {
    let Json(request) = payload?;
    let definition = definition_from_request(request)?;
    let record = state.problems.create_problem(definition, creator).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProblemResponse {
            id: record.id.to_string(),
            message: "Problem created successfully".to_string(),
        }),
    ))
}

async fn list_problems(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProblemSummary>>, ApiError> {
    let summaries = state.problems.list_problems().await?;
    Ok(Json(summaries.into_iter().map(problem_summary).collect()))
}

async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProblemDetail>, ApiError> {
    let problem_id = parse_problem_id(&id)?;
    let view = state.problems.get_problem(problem_id).await?;
    Ok(Json(problem_detail(view)))
}

async fn update_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProblemRequest>, JsonRejection>,
) -> Result<Json<UpdateProblemResponse>, ApiError> {
    let problem_id = parse_problem_id(&id)?;
    let Json(request) = payload?;
    state.problems.ensure_exists(problem_id).await?;
    let patch = patch_from_request(request)?;
    let record = state.problems.update_problem(problem_id, patch).await?;

    Ok(Json(UpdateProblemResponse {
        success: true,
        message: "Problem updated successfully".to_string(),
        data: authoring_detail(record),
    }))
}

async fn delete_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let problem_id = parse_problem_id(&id)?;
    state.problems.delete_problem(problem_id).await?;

    Ok(Json(MessageResponse {
        message: "Problem deleted successfully".to_string(),
    }))
}
