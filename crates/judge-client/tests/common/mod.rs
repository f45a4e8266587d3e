use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

/// What the fake judge does with incoming requests.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Every run reports `Processing` for `pending_polls` polls, then `final_status`.
    Finish { final_status: u16, pending_polls: u32 },
    /// Every run stays `In Queue` forever.
    NeverFinish,
    /// Submit answers 503.
    Unavailable,
    /// Submit answers 422, as Judge0 does for a request it refuses.
    Rejected,
    /// Submit answers 201 with an empty array.
    EmptyBatch,
    /// Submit answers 201 with a body that is not JSON.
    Garbage,
}

#[derive(Default)]
struct Recorded {
    batches: Vec<Value>,
    polls: u32,
    api_keys: Vec<String>,
}

#[derive(Clone)]
struct FakeState {
    behavior: Behavior,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct FakeJudge {
    pub base_url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeJudge {
    pub async fn start(behavior: Behavior) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = FakeState {
            behavior,
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/submissions/batch", post(submit_batch).get(batch_status))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake judge");
        let addr: SocketAddr = listener.local_addr().expect("fake judge address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake judge server");
        });

        Self {
            base_url: format!("http://{addr}"),
            recorded,
        }
    }

    pub fn batches(&self) -> Vec<Value> {
        self.recorded.lock().expect("lock recorded").batches.clone()
    }

    pub fn polls(&self) -> u32 {
        self.recorded.lock().expect("lock recorded").polls
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.recorded.lock().expect("lock recorded").api_keys.clone()
    }
}

async fn submit_batch(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let runs = body["submissions"].as_array().map(Vec::len).unwrap_or(0);
    {
        let mut recorded = state.recorded.lock().expect("lock recorded");
        if let Some(key) = headers.get("x-rapidapi-key").and_then(|v| v.to_str().ok()) {
            recorded.api_keys.push(key.to_string());
        }
        recorded.batches.push(body);
    }

    match state.behavior {
        Behavior::Unavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        Behavior::Rejected => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "language with id 0 doesn't exist" })),
        )
            .into_response(),
        Behavior::EmptyBatch => (StatusCode::CREATED, Json(json!([]))).into_response(),
        Behavior::Garbage => (StatusCode::CREATED, "<html>oops</html>").into_response(),
        Behavior::Finish { .. } | Behavior::NeverFinish => {
            let tokens: Vec<Value> = (0..runs)
                .map(|i| json!({ "token": format!("token-{i}") }))
                .collect();
            (StatusCode::CREATED, Json(Value::Array(tokens))).into_response()
        }
    }
}

async fn batch_status(
    State(state): State<FakeState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let polls = {
        let mut recorded = state.recorded.lock().expect("lock recorded");
        recorded.polls += 1;
        recorded.polls
    };

    let status_id = match state.behavior {
        Behavior::Finish {
            final_status,
            pending_polls,
        } if polls > pending_polls => final_status,
        Behavior::Finish { .. } => 2,
        _ => 1,
    };

    let submissions: Vec<Value> = query
        .get("tokens")
        .map(|tokens| tokens.split(',').collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .map(|token| json!({ "token": token, "status_id": status_id }))
        .collect();

    Json(json!({ "submissions": submissions })).into_response()
}
