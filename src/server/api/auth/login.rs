//! Login and logout handlers.
use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    web, HttpRequest, HttpResponse,
};
use chrono::Utc;
use serde::Serialize;

use crate::db::models::{session, user};
use crate::db::Tx as _;
use crate::server::errors::HTTPError;
use crate::utils::password::check_password;

use super::super::render::{redirect, render};
use super::super::state::{App as AppState, Global as _};
use super::{is_local_path, request, SESSION_COOKIE};

/// Error shown for unknown users and wrong passwords alike.
const INVALID_LOGIN: &str = "Please enter a correct username and password.";

/// Context of the login page.
#[derive(Serialize, Debug)]
pub struct LoginPage {
    /// Names of the form fields.
    pub fields: [&'static str; 2],
    /// Username submitted previously, if any.
    pub username: String,
    /// Where to go after logging in.
    pub next: String,
    /// Form errors.
    pub errors: Vec<&'static str>,
}

impl LoginPage {
    /// Login page context.
    fn new(username: String, next: String, errors: Vec<&'static str>) -> Self {
        Self {
            fields: ["username", "password"],
            username,
            next,
            errors,
        }
    }
}

/// Show the login form.
pub async fn login_form(query: web::Query<request::Next>) -> HttpResponse {
    let next = query.into_inner().next.unwrap_or_default();
    render(&LoginPage::new(String::new(), next, vec![]))
}

/// Check the credentials, open a session and return to `next`.
#[tracing::instrument(skip(data, form), fields(username = %form.username))]
pub async fn login(
    data: web::Data<AppState>,
    form: web::Form<request::Login>,
) -> Result<HttpResponse, HTTPError> {
    let form = form.into_inner();
    let db = data.db();
    let found = user::Manager::find_by_username(db, form.username.trim()).await?;
    let Some(account) = found.filter(|acc| check_password(&form.password, &acc.password_hash))
    else {
        tracing::info!("Rejected login");
        return Ok(render(&LoginPage::new(
            form.username,
            form.next,
            vec![INVALID_LOGIN],
        )));
    };

    let max_age = data.config().auth.session_max_age_secs;
    let now = Utc::now();
    let token = uuid::Uuid::new_v4().to_string();
    let cutoff = session::expiry_cutoff(now, max_age);
    let mut tx = db.begin().await?;
    let purged = session::TxManager::delete_expired(&mut tx, &cutoff).await?;
    session::TxManager::create(&mut tx, &token, account.id, &session::timestamp(now)).await?;
    tx.commit().await?;
    tracing::info!(purged, "Logged in");

    let location = if is_local_path(&form.next) {
        form.next.as_str()
    } else {
        "/"
    };
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age));
    Ok(redirect(location).cookie(cookie).finish())
}

/// Close the session of the request, if any, and return to the landing page.
pub async fn logout(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> Result<HttpResponse, HTTPError> {
    let mut response = redirect("/").finish();
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let mut tx = data.db().begin().await?;
        session::TxManager::delete(&mut tx, cookie.value()).await?;
        tx.commit().await?;

        let mut removal = Cookie::new(SESSION_COOKIE, "");
        removal.set_path("/");
        removal.make_removal();
        if let Err(err) = response.add_cookie(&removal) {
            tracing::warn!("Unable to clear session cookie: {err}");
        }
    }
    Ok(response)
}
