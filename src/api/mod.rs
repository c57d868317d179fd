use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{PlannerError, TripPlan, TripPlanner};

#[derive(Debug, Deserialize)]
pub struct TripQuery {
    pub query: Option<String>,
}

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ApiErrorBody {
        error: message.into(),
        code: status.as_u16(),
    };
    (status, Json(body)).into_response()
}

pub fn router(planner: Arc<TripPlanner>) -> Router {
    Router::new()
        .route("/trip", get(plan_trip))
        .route("/health", get(health))
        .with_state(planner)
}

async fn plan_trip(
    State(planner): State<Arc<TripPlanner>>,
    Query(params): Query<TripQuery>,
) -> Response {
    let query = params.query.unwrap_or_default();

    match planner.plan_trip(&query).await {
        Ok(plan @ TripPlan::Located { .. }) => (StatusCode::OK, Json(plan)).into_response(),
        Ok(plan @ TripPlan::NotFound { .. }) => (StatusCode::NOT_FOUND, Json(plan)).into_response(),
        Err(e @ PlannerError::Validation { .. }) => {
            api_error(StatusCode::BAD_REQUEST, e.user_message())
        }
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.user_message()),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": crate::VERSION }))
}
