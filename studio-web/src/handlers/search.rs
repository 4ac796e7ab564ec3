use crate::handlers::panels;
use crate::models::{Mode, SearchOutcome};
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub result: Option<SearchOutcome>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchForm {
    pub query: String,
}

pub async fn search_page(session: Session) -> impl IntoResponse {
    panels::enter_mode(&session, Mode::Search).await;
    SearchTemplate {
        result: panels::search_result(&session).await,
        error: panels::take_flash(&session).await,
    }
}

pub async fn run_search(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SearchForm>,
) -> Redirect {
    let query = form.query.trim().to_string();
    if query.is_empty() {
        return Redirect::to("/search");
    }

    match state.api.search(&query).await {
        Ok(outcome) => panels::save_search_result(&session, &outcome).await,
        Err(e) => {
            tracing::error!(error = %e, "Search request failed");
            panels::set_flash(&session, e.to_string()).await;
        }
    }

    Redirect::to("/search")
}
