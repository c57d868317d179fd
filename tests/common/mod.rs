//! Local stand-in for the geocoding, weather and Overpass services

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tourism_planner::{GeocoderBackend, PlannerConfig};

/// How a stubbed service answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Ok,
    /// HTTP 500
    ServerError,
    /// Sleeps well past the client timeout
    Slow,
    /// 200 with a body lacking the expected field
    Incomplete,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    pub weather: Mode,
    pub overpass: Mode,
}

#[derive(Default)]
struct StubState {
    behavior: Behavior,
    requests: AtomicUsize,
    overpass_queries: Mutex<Vec<String>>,
    user_agents: Mutex<Vec<String>>,
    referers: Mutex<Vec<String>>,
}

pub struct Upstream {
    pub addr: SocketAddr,
    state: Arc<StubState>,
}

impl Upstream {
    pub async fn start(behavior: Behavior) -> Self {
        let state = Arc::new(StubState {
            behavior,
            ..StubState::default()
        });

        let app = Router::new()
            .route("/geo/search", get(open_meteo_search))
            .route("/nominatim/search", get(nominatim_search))
            .route("/forecast", get(forecast))
            .route("/interpreter", post(interpreter))
            .layer(axum::middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Planner configuration pointing every service at this stub
    pub fn config(&self, backend: GeocoderBackend) -> PlannerConfig {
        let base = format!("http://{}", self.addr);
        let mut config = PlannerConfig::default();
        config.geocoding.backend = backend;
        config.geocoding.open_meteo_url = format!("{base}/geo/search");
        config.geocoding.nominatim_url = format!("{base}/nominatim/search");
        config.weather.url = format!("{base}/forecast");
        config.attractions.url = format!("{base}/interpreter");
        config.weather.timeout_ms = 500;
        config.attractions.timeout_ms = 500;
        config
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn overpass_queries(&self) -> Vec<String> {
        self.state.overpass_queries.lock().unwrap().clone()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.state.user_agents.lock().unwrap().clone()
    }

    pub fn referers(&self) -> Vec<String> {
        self.state.referers.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<Arc<StubState>>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        if let Some(agent) = header("user-agent") {
            state.user_agents.lock().unwrap().push(agent);
        }
        if let Some(referer) = header("referer") {
            state.referers.lock().unwrap().push(referer);
        }
    }
    next.run(request).await
}

async fn open_meteo_search(Query(params): Query<HashMap<String, String>>) -> Response {
    let name = params.get("name").map(String::as_str).unwrap_or_default();
    match name {
        "Munnar" => Json(json!({
            "results": [
                { "name": "Munnar", "latitude": 61.2, "longitude": 24.9, "country": "Finland" },
                { "name": "Munnar", "latitude": 10.08893, "longitude": 77.05952, "country": "India", "admin1": "Kerala" }
            ]
        }))
        .into_response(),
        "Springfield" => Json(json!({
            "results": [
                { "name": "Springfield", "latitude": 39.80172, "longitude": -89.64371, "country": "United States" },
                { "name": "Springfield", "latitude": -33.0, "longitude": 151.0, "country": "Australia" }
            ]
        }))
        .into_response(),
        "Offworld" => Json(json!({
            "results": [ { "name": "Offworld", "latitude": 123.0, "longitude": 10.0, "country": "India" } ]
        }))
        .into_response(),
        "Broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "Garbled" => "<html>not json</html>".into_response(),
        _ => Json(json!({ "generationtime_ms": 0.4 })).into_response(),
    }
}

async fn nominatim_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").map(String::as_str).unwrap_or_default();
    match q {
        "Kochi" => Json(json!([
            {
                "lat": "9.9312",
                "lon": "76.2673",
                "display_name": "Kochi, Ernakulam, Kerala, India",
                "boundingbox": ["9.7912", "10.0712", "76.1273", "76.4073"],
                "address": { "city": "Kochi", "country": "India" }
            }
        ])),
        _ => Json(json!([])),
    }
}

async fn forecast(State(state): State<Arc<StubState>>) -> Response {
    match state.behavior.weather {
        Mode::Ok => Json(json!({
            "latitude": 10.1,
            "longitude": 77.06,
            "current_weather": {
                "temperature": 24.3,
                "windspeed": 7.2,
                "weathercode": 3,
                "time": "2026-10-19T14:00"
            }
        }))
        .into_response(),
        Mode::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Mode::Slow => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            StatusCode::OK.into_response()
        }
        Mode::Incomplete => Json(json!({ "latitude": 10.1, "longitude": 77.06 })).into_response(),
    }
}

async fn interpreter(
    State(state): State<Arc<StubState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    if let Some(data) = form.get("data") {
        state.overpass_queries.lock().unwrap().push(data.clone());
    }

    match state.behavior.overpass {
        Mode::Ok => Json(json!({
            "version": 0.6,
            "elements": [
                { "type": "node", "id": 1, "tags": { "name": "Hotel Grand View", "tourism": "museum" } },
                { "type": "node", "id": 2, "tags": { "name": "City Museum", "tourism": "museum" } },
                { "type": "way", "id": 3, "tags": { "historic": "ruins" } },
                { "type": "node", "id": 4, "tags": { "name": "City Museum", "tourism": "museum" } },
                { "type": "node", "id": 5, "tags": { "name": "Tea Museum", "tourism": "museum" } },
                { "type": "node", "id": 6, "tags": { "name": "Green Guest House", "tourism": "gallery" } },
                { "type": "node", "id": 7, "tags": { "name": "Mattupetty Dam Viewpoint" } },
                { "type": "node", "id": 8, "tags": { "name": "Eravikulam National Park" } },
                { "type": "node", "id": 9, "tags": { "name": "Attukad Waterfalls" } },
                { "type": "node", "id": 10, "tags": { "name": "Pothamedu" } }
            ]
        }))
        .into_response(),
        Mode::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Mode::Slow => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            StatusCode::OK.into_response()
        }
        Mode::Incomplete => "runtime error: out of memory".into_response(),
    }
}
