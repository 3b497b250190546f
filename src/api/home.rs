//! Site root

use axum::{extract::State, response::Html};
use minijinja::context;

use crate::{error::AppResult, AppState};

/// `GET /`
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render("index.html", context! {})
}
