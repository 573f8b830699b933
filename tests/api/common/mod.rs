use actix_http::{body::MessageBody, Request};
use actix_service::Service;
use actix_web::{
    cookie::Cookie,
    dev::ServiceResponse,
    test::{self},
    Error,
};
use std::path::PathBuf;
use tempfile::TempDir;

use bookstore::db::{self, fixtures::Fixture, models::user, DatabaseConnection, Db as _, Tx as _};
use bookstore::server::{api::state::App as AppState, app::init_app};
use bookstore::utils::{config::Config, password};

pub const USERNAME: &str = "editor";
pub const PASSWORD: &str = "correct horse";

/// Application state over a fresh, migrated and loaded SQLite database.
/// The database lives in the returned directory, which must outlive the state.
pub async fn initialize_state() -> (TempDir, AppState) {
    let (dir, state) = initialize_empty_state().await;
    db::fixtures::load(&state.db, Fixture::from_path(&fixture_path()).unwrap())
        .await
        .unwrap();
    (dir, state)
}

/// Application state over a migrated database holding only the test user.
pub async fn initialize_empty_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.sqlite3").display());
    let conn = DatabaseConnection::connect(&url).await.unwrap();
    db::init::migrate(&conn).await.unwrap();

    let password_hash = password::make_password(PASSWORD).unwrap();
    let mut tx = conn.begin().await.unwrap();
    user::TxManager::upsert(&mut tx, USERNAME, &password_hash)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let config = Config::default();
    (dir, AppState { db: conn, config })
}

pub fn fixture_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures/bookstore.json");
    path
}

pub async fn initialize_app(
    state: &AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(init_app(state)).await
}

/// Log in as the test user and return the session cookie.
pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
) -> Cookie<'static> {
    let req = test::TestRequest::post()
        .uri("/accounts/login/")
        .set_form([("username", USERNAME), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 302);
    response_cookie(&resp, "sessionid").unwrap()
}

/// Cookie named `name` set by a response.
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(Cookie::into_owned)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned()
}
