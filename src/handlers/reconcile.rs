use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AppState;
use crate::models::{PublicationRecord, ReconciledRow, RosterEntry};
use crate::pipeline::{reconcile, AliasCollision, RosterIndex, RunContext};

/// Request body for a one-shot reconciliation
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReconcileRequest {
    /// Cleaned roster entries
    pub roster: Vec<RosterEntry>,
    /// Publication rows keyed by export column name
    pub publications: Vec<PublicationRecord>,
    /// Overrides the configured institution marker when not blank
    #[serde(default)]
    pub institution: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReconcileResponse {
    pub rows: Vec<ReconciledRow>,
    pub skipped_publications: usize,
    pub alias_collisions: Vec<AliasCollision>,
}

#[utoipa::path(
    post,
    path = "/api/reconcile",
    tag = "reconcile",
    request_body = ReconcileRequest,
    responses(
        (status = 200, description = "One row per publication with department-affiliated authors", body = ReconcileResponse),
        (status = 422, description = "Malformed request body")
    )
)]
pub async fn reconcile_json(
    State(state): State<AppState>,
    Json(payload): Json<ReconcileRequest>,
) -> Json<ReconcileResponse> {
    let institution = payload
        .institution
        .as_deref()
        .map(str::trim)
        .filter(|institution| !institution.is_empty())
        .unwrap_or(&state.settings.institution);

    let index = RosterIndex::build(&payload.roster);
    let ctx = RunContext::new(&index, institution);
    let report = reconcile(&ctx, &payload.publications);

    Json(ReconcileResponse {
        rows: report.rows,
        skipped_publications: report.skipped_publications,
        alias_collisions: index.collisions().to_vec(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "reconcile",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> &'static str {
    "ok"
}
