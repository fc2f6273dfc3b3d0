//! HTTP + WebSocket API for Sparq
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /profiles - Filtered catalog
//! - GET /users/{id}/model - Stored preference model
//! - POST /users/{id}/swipe - Record a swipe
//! - GET /users/{id}/predict/{profile_id} - Preference estimate
//! - GET /users/{id}/top-categories - Ranked categories
//! - GET /users/{id}/insights - Insights panel data
//! - GET /users/{id}/recommendations - Unswiped profiles, best first
//! - WS /ws/{id} - Live swipe updates

use axum::{
    extract::{ws::{Message, WebSocket}, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, warn};

use crate::core::catalog::{ProfileCatalog, ProfileFilter, RankedProfile};
use crate::core::insights::build_insights;
use crate::core::predictor::predict;
use crate::core::ranker::top_categories;
use crate::core::repository::{InMemoryRepository, PreferenceRepository};
use crate::core::updater::record_swipe_with_outcome;
use crate::types::{Category, PreferenceError, PreferenceInsights, PreferenceModel, Profile, SwipeOutcome};
use crate::DEFAULT_TOP_CATEGORIES;

/// App state
pub struct AppState {
    pub repository: Arc<dyn PreferenceRepository>,
    pub catalog: ProfileCatalog,
    /// Serializes load → update → save so concurrent swipes never interleave
    update_lock: Mutex<()>,
    update_channels: RwLock<HashMap<String, broadcast::Sender<SwipeOutcome>>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PreferenceRepository>, catalog: ProfileCatalog) -> Self {
        Self {
            repository,
            catalog,
            update_lock: Mutex::new(()),
            update_channels: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe to a user's swipe updates, opening the channel on first use
    async fn subscribe(&self, user_id: &str) -> broadcast::Receiver<SwipeOutcome> {
        let mut channels = self.update_channels.write().await;
        channels
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(100).0)
            .subscribe()
    }

    /// Push an update to open sockets. Users without a socket have no channel.
    async fn publish(&self, user_id: &str, outcome: &SwipeOutcome) {
        let delivered = match self.update_channels.read().await.get(user_id) {
            Some(tx) => tx.send(outcome.clone()).is_ok(),
            None => return,
        };
        if !delivered {
            self.release(user_id).await;
        }
    }

    /// Drop a user's channel once its last socket is gone
    async fn release(&self, user_id: &str) {
        let mut channels = self.update_channels.write().await;
        if channels.get(user_id).is_some_and(|tx| tx.receiver_count() == 0) {
            channels.remove(user_id);
        }
    }

    /// Users with at least one open socket
    pub async fn live_users(&self) -> usize {
        self.update_channels
            .read()
            .await
            .values()
            .filter(|tx| tx.receiver_count() > 0)
            .count()
    }
}

/// Swipe request. Either names a catalog profile or carries one inline.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub profile_id: Option<String>,
    pub profile: Option<Profile>,
    pub liked: bool,
}

/// Health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub profiles: usize,
    pub live_users: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub profile_id: String,
    pub score: f64,
    pub confidence: u8,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    error: String,
}

impl IntoResponse for PreferenceError {
    fn into_response(self) -> Response {
        let status = match self {
            PreferenceError::InvalidProfile(_) | PreferenceError::UnknownCategory(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PreferenceError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
            PreferenceError::Storage(_) | PreferenceError::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            warn!(code = self.code(), error = %self, "request failed");
        }
        let body = ErrorBody {
            code: self.code(),
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router over an in-memory repository and the bundled catalog
pub fn create_router() -> Router {
    create_router_with(Arc::new(InMemoryRepository::new()), ProfileCatalog::builtin())
}

/// Create the API router
pub fn create_router_with(repository: Arc<dyn PreferenceRepository>, catalog: ProfileCatalog) -> Router {
    let state = Arc::new(AppState::new(repository, catalog));

    Router::new()
        .route("/health", get(health))
        .route("/profiles", get(list_profiles))
        .route("/users/:user_id/model", get(get_model))
        .route("/users/:user_id/swipe", post(swipe))
        .route("/users/:user_id/predict/:profile_id", get(get_prediction))
        .route("/users/:user_id/top-categories", get(get_top_categories))
        .route("/users/:user_id/insights", get(get_insights))
        .route("/users/:user_id/recommendations", get(get_recommendations))
        .route("/ws/:user_id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        profiles: state.catalog.len(),
        live_users: state.live_users().await,
    })
}

async fn list_profiles(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ProfileFilter>,
) -> Json<Vec<Profile>> {
    Json(state.catalog.filtered(&filter).into_iter().cloned().collect())
}

async fn get_model(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<PreferenceModel>, PreferenceError> {
    Ok(Json(state.repository.load(&user_id)?))
}

/// Record a swipe: load, update, save, broadcast
async fn swipe(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SwipeRequest>,
) -> Result<Json<SwipeOutcome>, PreferenceError> {
    let profile = match (req.profile, req.profile_id) {
        (Some(profile), _) => profile,
        (None, Some(id)) => state
            .catalog
            .get(&id)
            .cloned()
            .ok_or(PreferenceError::ProfileNotFound(id))?,
        (None, None) => return Err(PreferenceError::InvalidProfile(String::new())),
    };

    let outcome = {
        let _guard = state.update_lock.lock().await;
        let model = state.repository.load(&user_id)?;
        let (model, outcome) = record_swipe_with_outcome(model, &profile, req.liked)?;
        state.repository.save(&model)?;
        outcome
    };

    info!(
        user_id = %user_id,
        profile_id = %outcome.profile_id,
        liked = outcome.liked,
        confidence = outcome.confidence,
        reason = outcome.reason().code(),
        "swipe"
    );

    state.publish(&user_id, &outcome).await;

    Ok(Json(outcome))
}

async fn get_prediction(
    State(state): State<Arc<AppState>>,
    Path((user_id, profile_id)): Path<(String, String)>,
) -> Result<Json<PredictResponse>, PreferenceError> {
    let profile = state
        .catalog
        .get(&profile_id)
        .ok_or_else(|| PreferenceError::ProfileNotFound(profile_id.clone()))?;
    let model = state.repository.load(&user_id)?;

    Ok(Json(PredictResponse {
        profile_id,
        score: predict(&model, profile),
        confidence: model.confidence(),
    }))
}

async fn get_top_categories(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<Category>>, PreferenceError> {
    let model = state.repository.load(&user_id)?;
    let n = query.n.unwrap_or(DEFAULT_TOP_CATEGORIES);
    Ok(Json(top_categories(&model, n)))
}

async fn get_insights(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<PreferenceInsights>, PreferenceError> {
    let model = state.repository.load(&user_id)?;
    Ok(Json(build_insights(&model)))
}

async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(filter): Query<ProfileFilter>,
) -> Result<Json<Vec<RankedProfile>>, PreferenceError> {
    let model = state.repository.load(&user_id)?;
    Ok(Json(state.catalog.rank_candidates(&model, &filter)))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.subscribe(&user_id).await;
    ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
        state.release(&user_id).await;
    })
}

/// Handle WebSocket connection
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<SwipeOutcome>) {
    // rx is dropped on return, before the caller releases the channel
    loop {
        match rx.recv().await {
            Ok(update) => {
                let json = serde_json::to_string(&update).unwrap_or_default();
                if socket.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    repository: Arc<dyn PreferenceRepository>,
    catalog: ProfileCatalog,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router_with(repository, catalog);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Sparq API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
