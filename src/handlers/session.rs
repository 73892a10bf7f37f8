use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;
use tracing::{info, warn};

use super::AppState;
use crate::error::{Error, Result};
use crate::pipeline::{reconcile, RosterIndex, RunContext};
use crate::tables::{download_name, read_publications, read_roster, OutputTemplate, TrackingWorkbook};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Multipart field names used by the upload forms
pub const ROSTER_FIELD: &str = "faculty_roaster";
pub const PUBLICATIONS_FIELD: &str = "scopus";
pub const TEMPLATE_FIELD: &str = "tracking_excel";

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

async fn read_upload(mut multipart: Multipart, field_name: &str) -> Result<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidUpload(e.to_string()))?;
        if bytes.is_empty() {
            return Err(Error::InvalidUpload(format!("{} is empty", field_name)));
        }

        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(Error::InvalidUpload(format!("missing form field {}", field_name)))
}

/// POST /faculty_file
pub async fn faculty_file(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let upload = read_upload(multipart, ROSTER_FIELD).await?;
    let roster = read_roster(&upload.file_name, &upload.bytes).map_err(|e| {
        warn!(file = %upload.file_name, "roster rejected: {}", e);
        e
    })?;

    info!(file = %upload.file_name, entries = roster.len(), "roster uploaded");
    state.session.lock().await.roster = Some(roster);
    Ok(Redirect::to("/"))
}

/// POST /scopus_file
pub async fn scopus_file(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let upload = read_upload(multipart, PUBLICATIONS_FIELD).await?;
    let publications = read_publications(upload.bytes.as_slice()).map_err(|e| {
        warn!(file = %upload.file_name, "publication export rejected: {}", e);
        e
    })?;

    info!(file = %upload.file_name, publications = publications.len(), "publication export uploaded");
    state.session.lock().await.publications = Some(publications);
    Ok(Redirect::to("/"))
}

/// POST /output_file
pub async fn output_file(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let upload = read_upload(multipart, TEMPLATE_FIELD).await?;
    // Fail at upload time rather than at submit.
    TrackingWorkbook::from_template(&upload.bytes)?;

    let file_name = if upload.file_name.is_empty() {
        "tracking.xlsx".to_string()
    } else {
        upload.file_name
    };
    info!(file = %file_name, "output template uploaded");
    state.session.lock().await.template = Some(OutputTemplate {
        file_name,
        bytes: upload.bytes,
    });
    Ok(Redirect::to("/"))
}

/// GET /submit
///
/// Runs the pipeline over the uploaded artifacts and returns the filled
/// workbook. The session is emptied once the inputs are taken.
pub async fn submit(State(state): State<AppState>) -> Result<Response> {
    let inputs = state.session.lock().await.take_inputs()?;
    let settings = state.settings.clone();
    let template_name = inputs.template.file_name.clone();

    let (bytes, rows) = tokio::task::spawn_blocking(move || -> Result<(Vec<u8>, usize)> {
        let index = RosterIndex::build(&inputs.roster);
        let ctx = RunContext::new(&index, &settings.institution);
        let report = reconcile(&ctx, &inputs.publications);

        let mut workbook = TrackingWorkbook::from_template(&inputs.template.bytes)?;
        for row in &report.rows {
            workbook.append_reconciled(row);
        }
        Ok((workbook.to_xlsx()?, report.rows.len()))
    })
    .await??;

    let name = download_name(&template_name, Local::now().date_naive());
    info!(file = %name, rows, "tracking workbook ready");

    let disposition = format!("attachment; filename=\"{}\"", name.replace('"', ""));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// GET /info
pub async fn toggle_info(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.lock().await;
    session.show_info = !session.show_info;
    Redirect::to("/")
}
