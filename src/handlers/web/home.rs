use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::handlers::AppState;
use crate::handlers::session::{PUBLICATIONS_FIELD, ROSTER_FIELD, TEMPLATE_FIELD};

#[derive(Template)]
#[template(path = "tracking.html")]
struct TrackingTemplate {
    institution: String,
    all_valid: bool,
    roster_loaded: bool,
    publications_loaded: bool,
    template_loaded: bool,
    roster_field: &'static str,
    publications_field: &'static str,
    template_field: &'static str,
}

#[derive(Template)]
#[template(path = "info.html")]
struct InfoTemplate {
    institution: String,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let (status, show_info) = {
        let session = state.session.lock().await;
        (session.status(), session.show_info)
    };
    let institution = state.settings.institution.clone();

    let rendered = if show_info {
        InfoTemplate { institution }.render()
    } else {
        TrackingTemplate {
            institution,
            all_valid: status.all_loaded(),
            roster_loaded: status.roster,
            publications_loaded: status.publications,
            template_loaded: status.template,
            roster_field: ROSTER_FIELD,
            publications_field: PUBLICATIONS_FIELD,
            template_field: TEMPLATE_FIELD,
        }
        .render()
    };

    match rendered {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            error!("Template error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
