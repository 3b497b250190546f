//! HTML forms can only send GET and POST. A POST carrying `_method=PUT`
//! (or DELETE / PATCH) in its query string is rewritten before routing.

use axum::{
    extract::{Query, Request},
    http::Method,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct MethodOverride {
    #[serde(rename = "_method")]
    method: Option<String>,
}

pub fn method_override(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }

    let requested = Query::<MethodOverride>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(params)| params.method);

    let method = match requested.as_deref().map(str::to_ascii_uppercase).as_deref() {
        Some("PUT") => Method::PUT,
        Some("DELETE") => Method::DELETE,
        Some("PATCH") => Method::PATCH,
        _ => return req,
    };

    tracing::trace!("Method override: POST -> {} {}", method, req.uri().path());
    *req.method_mut() = method;
    req
}
