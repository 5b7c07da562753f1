//! Route handlers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mf_01_message_store::Message;
use tracing::{error, info, warn};

use super::decode::decode_command;
use crate::dispatcher::RequestDispatcher;
use crate::domain::{CommandResponse, DispatchError, ErrorBody, FeedQuery};

/// Shared state for all routes
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RequestDispatcher>,
    pub staging_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(dispatcher: Arc<RequestDispatcher>, staging_dir: PathBuf) -> Self {
        Self {
            dispatcher,
            staging_dir: Arc::new(staging_dir),
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::from(&self))).into_response()
    }
}

/// POST on any path: decode the body and run the named command
pub async fn handle_command(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<CommandResponse>), DispatchError> {
    let uri = req.uri().clone();

    let command = decode_command(req, &state.staging_dir)
        .await
        .inspect_err(|e| error!(url = %uri, error = %e, "Failed to decode request body"))?;

    let method = command.name().to_string();
    info!(url = %uri, method = %method, "Received POST request");

    match state.dispatcher.dispatch(command).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(e) => {
            if e.is_client_error() {
                warn!(method = %method, error = %e, "Command rejected");
            } else {
                error!(method = %method, error = %e, "Command failed");
            }
            Err(e)
        }
    }
}

/// GET on any path: newest-first feed page.
///
/// The query is read as raw pairs so a repeated key keeps its first value
/// instead of failing the whole extraction.
pub async fn handle_feed(
    State(state): State<AppState>,
    pairs: Option<Query<Vec<(String, String)>>>,
) -> Json<Vec<Message>> {
    let query = pairs
        .map(|Query(pairs)| FeedQuery::from_pairs(pairs))
        .unwrap_or_default();
    Json(state.dispatcher.feed(&query))
}

/// OPTIONS on any path
pub async fn handle_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
