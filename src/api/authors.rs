//! Author pages: list, create, show, edit, update, delete
//!
//! Persistence failures never reach the browser as an error page: each
//! handler either renders a view or redirects somewhere safe.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use minijinja::context;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, AuthorQuery},
    services::authors::DeleteOutcome,
    AppState,
};

const CREATE_ERROR: &str = "Error creating Author";
const UPDATE_ERROR: &str = "Error updating Author";

/// Routes mounted under `/authors`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route("/new", get(new_author))
        .route(
            "/:id",
            get(show_author).put(update_author).delete(delete_author),
        )
        .route("/:id/edit", get(edit_author))
}

/// Ids that are not UUIDs cannot name an author
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Author {} not found", raw)))
}

fn author_location(id: Uuid) -> String {
    format!("/authors/{}", id)
}

fn redirect(location: &str) -> AppResult<Response> {
    Ok(Redirect::to(location).into_response())
}

/// `GET /authors?name=`
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Response> {
    let authors = match state.services.authors.list(&query).await {
        Ok(authors) => authors,
        Err(e) => {
            tracing::warn!("Error listing authors: {}", e);
            return redirect("/");
        }
    };

    let html = state.views.render(
        "authors/index.html",
        context! { authors => authors, search_options => query },
    )?;
    Ok(html.into_response())
}

/// `GET /authors/new`
pub async fn new_author(State(state): State<AppState>) -> AppResult<Response> {
    let html = state
        .views
        .render("authors/new.html", context! { author => Author::default() })?;
    Ok(html.into_response())
}

/// `POST /authors`
pub async fn create_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let author = Author::new(&form.name);

    match state.services.authors.save(&author).await {
        Ok(Author { id: Some(id), .. }) => redirect(&author_location(id)),
        Ok(_) => Err(AppError::Internal("Store returned an author without id".into())),
        Err(e) => {
            tracing::warn!("Error creating author: {}", e);
            let html = state.views.render(
                "authors/new.html",
                context! { author => author, error_message => CREATE_ERROR },
            )?;
            Ok(html.into_response())
        }
    }
}

/// `GET /authors/:id`
pub async fn show_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let found = match parse_id(&id) {
        Ok(id) => state.services.authors.get_with_books(id).await,
        Err(e) => Err(e),
    };
    let (author, books) = match found {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!("Cannot show author {}: {}", id, e);
            return redirect("/");
        }
    };

    let html = state.views.render(
        "authors/show.html",
        context! { author => author, books_by_author => books },
    )?;
    Ok(html.into_response())
}

/// `GET /authors/:id/edit`
pub async fn edit_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let found = match parse_id(&id) {
        Ok(id) => state.services.authors.get(id).await,
        Err(e) => Err(e),
    };
    let author = match found {
        Ok(author) => author,
        Err(e) => {
            tracing::debug!("Cannot edit author {}: {}", id, e);
            return redirect("/authors");
        }
    };

    let html = state
        .views
        .render("authors/edit.html", context! { author => author })?;
    Ok(html.into_response())
}

/// `PUT /authors/:id`
///
/// The redirect is only sent once the write has been confirmed.
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let found = match parse_id(&id) {
        Ok(id) => state.services.authors.get(id).await,
        Err(e) => Err(e),
    };
    let mut author = match found {
        Ok(author) => author,
        Err(e) => {
            tracing::debug!("Cannot update author {}: {}", id, e);
            return redirect("/");
        }
    };

    author.name = form.name;

    match state.services.authors.save(&author).await {
        Ok(Author { id: Some(id), .. }) => redirect(&author_location(id)),
        Ok(_) => Err(AppError::Internal("Store returned an author without id".into())),
        Err(e) => {
            tracing::warn!("Error updating author {}: {}", id, e);
            let html = state.views.render(
                "authors/edit.html",
                context! { author => author, error_message => UPDATE_ERROR },
            )?;
            Ok(html.into_response())
        }
    }
}

/// `DELETE /authors/:id`
///
/// Refused while books reference the author; the redirect back to the
/// author's page is the only signal.
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = parse_id(&id) else {
        return redirect("/");
    };

    match state.services.authors.delete(id).await {
        Ok(DeleteOutcome::Deleted) => redirect("/authors"),
        Ok(DeleteOutcome::HasBooks) => redirect(&author_location(id)),
        Err(e) if e.is_not_found() => redirect("/"),
        Err(e) => {
            tracing::error!("Error deleting author {}: {}", id, e);
            redirect(&author_location(id))
        }
    }
}
