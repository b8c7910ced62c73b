use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{FixedOffset, Local};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use parley_client::{send_message, ThreadBubble, ThreadView};
use parley_shared::{
    ConversationAggregator, ConversationId, ConversationSummary, MessageDraft, MessageRecord,
};
use parley_store::{DocumentId, MessageStore};

use crate::config::{offset_from_minutes, ServerConfig};
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route("/aggregate", post(aggregate_records))
        .route("/conversations", get(list_conversations))
        .route("/conversations/{id}/messages", get(conversation_messages))
        .route("/messages", post(post_message))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    timezone_offset_minutes: Option<i32>,
}

#[derive(Serialize)]
struct PostMessageResponse {
    id: DocumentId,
}

/// Zone the caller wants times rendered in.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClockQuery {
    tz_offset_minutes: Option<i32>,
}

impl ClockQuery {
    /// The requested offset, else the configured one. `None` means render in
    /// the host's local zone at the time of the request.
    fn timezone(&self, config: &ServerConfig) -> Result<Option<FixedOffset>, ServerError> {
        match self.tz_offset_minutes {
            None => Ok(config.timezone()),
            Some(minutes) => offset_from_minutes(minutes).map(Some).ok_or_else(|| {
                ServerError::BadRequest(format!("tzOffsetMinutes out of range: {minutes}"))
            }),
        }
    }
}

fn summarize(records: &[MessageRecord], tz: Option<FixedOffset>) -> Vec<ConversationSummary> {
    match tz {
        Some(tz) => ConversationAggregator::with_timezone(tz).aggregate(records),
        None => ConversationAggregator::local().aggregate(records),
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        timezone_offset_minutes: state.config.tz_offset_minutes,
    })
}

/// Pure transform: records in, chat-list rows out. The store is not consulted.
async fn aggregate_records(
    State(state): State<AppState>,
    clock: Result<Query<ClockQuery>, QueryRejection>,
    records: Result<Json<Vec<MessageRecord>>, JsonRejection>,
) -> Result<Json<Vec<ConversationSummary>>, ServerError> {
    let Query(clock) = clock?;
    let Json(records) = records?;
    Ok(Json(summarize(&records, clock.timezone(&state.config)?)))
}

async fn list_conversations(
    State(state): State<AppState>,
    clock: Result<Query<ClockQuery>, QueryRejection>,
) -> Result<Json<Vec<ConversationSummary>>, ServerError> {
    let Query(clock) = clock?;
    let tz = clock.timezone(&state.config)?;
    let snapshot = state.store.snapshot()?;
    Ok(Json(summarize(&snapshot.records(), tz)))
}

async fn conversation_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    clock: Result<Query<ClockQuery>, QueryRejection>,
) -> Result<Json<Vec<ThreadBubble>>, ServerError> {
    let Query(clock) = clock?;
    let tz = clock.timezone(&state.config)?;
    let snapshot = state.store.snapshot()?;
    let conversation = ConversationId::new(id);

    let view = match tz {
        Some(tz) => ThreadView::from_snapshot(&snapshot, Some(&conversation), &tz),
        None => ThreadView::from_snapshot(&snapshot, Some(&conversation), &Local),
    };
    Ok(Json(view.into_bubbles()))
}

async fn post_message(
    State(state): State<AppState>,
    draft: Result<Json<MessageDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<PostMessageResponse>), ServerError> {
    let Json(draft) = draft?;
    let id = send_message(state.store.as_ref(), draft)?;
    Ok((StatusCode::CREATED, Json(PostMessageResponse { id })))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
