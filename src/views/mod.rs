//! Server-rendered HTML views
//!
//! Templates live in `templates/` and are compiled into the binary.
//! Names ending in `.html` are auto-escaped.

use std::sync::Arc;

use axum::response::Html;
use minijinja::{Environment, Value};

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    (
        "authors/_form_fields.html",
        include_str!("../../templates/authors/_form_fields.html"),
    ),
    ("authors/index.html", include_str!("../../templates/authors/index.html")),
    ("authors/new.html", include_str!("../../templates/authors/new.html")),
    ("authors/edit.html", include_str!("../../templates/authors/edit.html")),
    ("authors/show.html", include_str!("../../templates/authors/show.html")),
];

/// Template renderer shared by all handlers
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(*name, *source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    /// Render `name` with the given context
    pub fn render(&self, name: &str, ctx: Value) -> AppResult<Html<String>> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }
}
