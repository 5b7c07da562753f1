//! Message Gateway service - router construction and server lifecycle.

use std::future::Future;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, MethodRouter};
use axum::Router;
use mf_01_message_store::MessageStoreApi;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

use crate::dispatcher::RequestDispatcher;
use crate::domain::{GatewayConfig, GatewayError};
use crate::http::{handle_command, handle_feed, handle_preflight, AppState};
use crate::middleware::{
    create_cors_layer, panic_response, preflight_no_content, TimeoutLayer, TracingLayer,
};

/// Build the HTTP router.
///
/// Every path behaves the same: GET reads the feed, POST runs a command,
/// OPTIONS answers 204. Panics are turned into responses inside the CORS
/// layer so the 500 still carries CORS headers.
pub fn build_router(config: &GatewayConfig, dispatcher: Arc<RequestDispatcher>) -> Router {
    let state = AppState::new(dispatcher, config.uploads.staging_dir());

    let any_path: MethodRouter<AppState> = get(handle_feed)
        .post(handle_command)
        .options(handle_preflight);

    Router::new()
        .route("/", any_path.clone())
        .route("/*path", any_path)
        .layer(DefaultBodyLimit::max(config.limits.max_request_size))
        .layer(TimeoutLayer::new(config.timeouts.request))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(create_cors_layer(&config.cors))
        .layer(axum::middleware::from_fn(preflight_no_content))
        .layer(TracingLayer::new())
        .with_state(state)
}

/// Message Gateway service
pub struct MessageGatewayService {
    config: GatewayConfig,
    dispatcher: Arc<RequestDispatcher>,
}

impl MessageGatewayService {
    /// Create a service over `store`. Fails if the configuration is invalid.
    pub fn new(config: GatewayConfig, store: Arc<dyn MessageStoreApi>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let dispatcher =
            Arc::new(RequestDispatcher::new(store).with_feed_config(config.feed.clone()));

        Ok(Self { config, dispatcher })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The router this service serves
    pub fn router(&self) -> Router {
        build_router(&self.config, Arc::clone(&self.dispatcher))
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.serve_with_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_with_listener<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(addr = %local_addr, "Message gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("Message gateway stopped");
        Ok(())
    }
}
