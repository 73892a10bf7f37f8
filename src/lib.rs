pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod tables;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::Settings;
pub use error::{Error, Result};
pub use handlers::AppState;
pub use models::{
    FacultyIdentity, Flag, Highlight, OutputRow, PublicationRecord, ReconciledRow, RosterEntry,
};
pub use pipeline::{reconcile, reconcile_publication, RosterIndex, RunContext, RunReport};
pub use utils::{AuthorToken, ParseSkip};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::reconcile::reconcile_json, handlers::reconcile::health),
    components(schemas(
        handlers::reconcile::ReconcileRequest,
        handlers::reconcile::ReconcileResponse,
        RosterEntry,
        PublicationRecord,
        ReconciledRow,
        OutputRow,
        Flag,
        pipeline::AliasCollision,
    )),
    tags((name = "reconcile", description = "Author reconciliation"))
)]
pub struct ApiDoc;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::web::home))
        .route("/info", get(handlers::toggle_info))
        .route("/faculty_file", post(handlers::faculty_file))
        .route("/scopus_file", post(handlers::scopus_file))
        .route("/output_file", post(handlers::output_file))
        .route("/submit", get(handlers::submit))
        .route("/api/reconcile", post(handlers::reconcile_json))
        .route("/health", get(handlers::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
