use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
};
use tracing::{error, warn};

use bbs_types::api::{ListingQuery, PostForm};

use crate::intake::{self, IntakeError, Outcome};
use crate::render::{self, FormDefaults};
use crate::state::AppState;

/// GET / — every post, newest first. A storage failure renders an empty board.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let db = state.clone();
    let messages = match tokio::task::spawn_blocking(move || db.store.list_recent()).await {
        Ok(Ok(messages)) => messages,
        Ok(Err(e)) => {
            warn!("Listing query failed, rendering empty board: {:#}", e);
            vec![]
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            vec![]
        }
    };

    let form = FormDefaults {
        name: &query.last_name,
        seed: &query.last_seed,
    };
    Html(render::listing_page(&state.board, &messages, &form, query.notice()))
}

/// POST /post — always answers with a redirect back to the listing.
pub async fn post_message(
    State(state): State<AppState>,
    Form(form): Form<PostForm>,
) -> Redirect {
    let command = intake::is_command(&form);
    let db = state.clone();
    let submitted = form.clone();
    let outcome = tokio::task::spawn_blocking(move || intake::submit(db.store.as_ref(), &submitted))
        .await
        .unwrap_or_else(|source| {
            let err = IntakeError::Aborted { command, source };
            error!("{}", err);
            Outcome::Failed(err)
        });

    Redirect::to(&listing_location(&form, &outcome))
}

/// GET /bbs/how
pub async fn how_to_use() -> Html<&'static str> {
    Html(render::how_to_use_page())
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Listing URL to send the poster back to. Commands return to the bare
/// listing; everything else carries the name and raw seed for the form.
fn listing_location(form: &PostForm, outcome: &Outcome) -> String {
    let mut params: Vec<String> = Vec::new();

    if !outcome.is_command() {
        params.push(format!("last_name={}", urlencoding::encode(&form.name)));
        params.push(format!("last_seed={}", urlencoding::encode(&form.seed)));
    }
    if let Outcome::Failed(err) = outcome {
        params.push(format!("notice={}", err.notice().as_str()));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}
