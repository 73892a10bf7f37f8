pub mod reconcile;
pub mod session;
pub mod web;

pub use reconcile::*;
pub use session::*;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::error;

use crate::config::Settings;
use crate::error::Error;
use crate::session::UploadSession;

/// Shared service state: settings plus the pending upload session
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub session: Arc<Mutex<UploadSession>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            session: Arc::new(Mutex::new(UploadSession::default())),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, label) = match &self {
            Error::MissingColumns { .. }
            | Error::Csv(_)
            | Error::Spreadsheet(_)
            | Error::EmptyWorkbook
            | Error::InvalidUpload(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity"),
            Error::MissingUpload(_) => (StatusCode::CONFLICT, "Conflict"),
            Error::Workbook(_) | Error::Io(_) | Error::Task(_) => {
                error!("run failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (
            status,
            Json(json!({
                "error": label,
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
