//! Errors surfaced to HTTP clients.
use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::{Display, Error};
use serde_json::json;

use crate::db::is_row_not_found;

/// Safe, user-facing HTTP errors.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum HTTPError {
    /// 404
    #[display(fmt = "404 Not Found")]
    NotFound,
    /// 500
    #[display(fmt = "500 Internal Server Error")]
    InternalServerError,
}

impl error::ResponseError for HTTPError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(json!({ "error": self.to_string() }).to_string())
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for HTTPError {
    /// A centralised place to match potentially unsafe internal errors to safe user-facing errors.
    fn from(error: anyhow::Error) -> Self {
        if is_row_not_found(&error) {
            tracing::debug!("{error}");
            return Self::NotFound;
        }
        tracing::error!("{error:?}");
        Self::InternalServerError
    }
}
