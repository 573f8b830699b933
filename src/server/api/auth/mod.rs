//! Authentication of catalog editors.
//!
//! Handlers that mutate data take an [`AuthenticatedUser`] argument. Extracting
//! it fails for requests without a valid session, and the failure renders as a
//! redirect to the login page carrying the original path in `next`.
use std::{future::Future, pin::Pin};

use actix_web::{
    dev::Payload, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, ResponseError,
};
use chrono::Utc;
use derive_more::Display;

use crate::db::models::{session, user::User};
use crate::server::errors::HTTPError;

use super::render::redirect;
use super::state::{App as AppState, Global as _};

pub mod login;
/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionid";

/// Path of the login page.
pub const LOGIN_URL: &str = "/accounts/login/";

/// The user owning the session of the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Rejection of an unauthenticated request.
#[derive(Debug, Display)]
#[display(fmt = "Login required for {}", next)]
pub struct LoginRequired {
    /// Path and query of the rejected request.
    pub next: String,
}

impl LoginRequired {
    /// Login URL that returns to the rejected request.
    #[must_use]
    pub fn login_url(&self) -> String {
        let next: String = url::form_urlencoded::byte_serialize(self.next.as_bytes()).collect();
        format!("{LOGIN_URL}?next={next}")
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        redirect(&self.login_url()).finish()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        let token = req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_owned());
        let state = req.app_data::<web::Data<AppState>>().cloned();
        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("Application state is not registered");
                return Err(HTTPError::InternalServerError.into());
            };
            let Some(token) = token else {
                tracing::debug!("No session cookie, redirecting to login");
                return Err(LoginRequired { next }.into());
            };
            let not_before =
                session::expiry_cutoff(Utc::now(), state.config().auth.session_max_age_secs);
            match session::Manager::find_user_by_token(state.db(), &token, &not_before).await {
                Ok(Some(user)) => {
                    tracing::Span::current().record("user", user.username.as_str());
                    Ok(Self(user))
                }
                Ok(None) => {
                    tracing::debug!("Unknown or expired session, redirecting to login");
                    Err(LoginRequired { next }.into())
                }
                Err(err) => Err(HTTPError::from(err).into()),
            }
        })
    }
}

/// Whether `next` is a path on this site, so that redirecting to it cannot leave the site.
#[must_use]
pub fn is_local_path(next: &str) -> bool {
    // Browsers drop tabs and newlines from URLs, turning `/\t/host` into `//host`.
    if next.chars().any(|ch| ch.is_control() || ch.is_whitespace()) {
        return false;
    }
    next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')
}
