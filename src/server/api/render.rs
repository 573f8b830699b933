//! Turning handler contexts into HTTP responses.
use actix_web::{http::header, HttpResponse, HttpResponseBuilder};
use serde::Serialize;

use super::messages::Messages;

/// Render a page context.
pub fn render<T: Serialize>(context: &T) -> HttpResponse {
    HttpResponse::Ok().json(context)
}

/// Render a page context that displays the queued messages, clearing them.
pub fn render_with_messages<T: Serialize>(context: &T, messages: &Messages) -> HttpResponse {
    let mut response = render(context);
    messages.consume(&mut response);
    response
}

/// Start a `302 Found` redirect to `location`.
pub fn redirect(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    builder
}
