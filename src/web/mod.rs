//! HTTP surface: router, shared state, error mapping and server loop.

pub mod handlers;
pub mod render;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::reference::ReferenceData;
use crate::store::LedgerStore;
use crate::utils::date::{Clock, SystemClock};
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Hidden form field carrying [`AppState::form_token`].
pub const FORM_TOKEN_FIELD: &str = "csrf_token";

#[derive(Clone)]
pub struct AppState {
    pub store: LedgerStore,
    pub refs: Arc<ReferenceData>,
    pub clock: Arc<dyn Clock>,
    /// Random per process. Every rendered form embeds it and every POST must
    /// echo it back, so a page on another origin cannot submit records.
    pub form_token: Arc<str>,
}

impl AppState {
    pub fn new(store: LedgerStore, refs: ReferenceData, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            refs: Arc::new(refs),
            clock,
            form_token: Uuid::new_v4().simple().to_string().into(),
        }
    }

    pub fn with_form_token(mut self, token: impl Into<Arc<str>>) -> Self {
        self.form_token = token.into();
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/add/{operator}",
            get(handlers::add_form).post(handlers::add_submit),
        )
        .route("/machine/{operator}", get(handlers::list_records))
        .route(
            "/edit/{operator}/{index}",
            get(handlers::edit_form).post(handlers::edit_submit),
        )
        .route("/delete/{operator}/{index}", get(handlers::delete_record))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Ledger problems are user-visible plain text; anything else is a 500.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NoData(_) | AppError::InvalidIndex { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidOperator(_) => StatusCode::BAD_REQUEST,
            AppError::FormToken => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            return (status, "Internal Server Error").into_response();
        }

        tracing::debug!(error = %self, status = status.as_u16(), "request refused");
        (status, self.to_string()).into_response()
    }
}

/// Bind and serve until Ctrl-C.
pub async fn serve(cfg: &Config, refs: ReferenceData) -> AppResult<()> {
    let store = LedgerStore::new(cfg.data_path());
    tracing::info!(root = %store.root().display(), "ledger root");

    let app = build_router(AppState::new(store, refs, Arc::new(SystemClock)));

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
