use crate::common;
use actix_web::{
    cookie::{Cookie, SameSite},
    test,
};
use bookstore::db::{
    models::{session, user},
    Tx as _,
};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_login_form_expect_next_echoed() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get()
        .uri("/accounts/login/?next=%2Fauthors%2Fcreate_author")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["next"], "/authors/create_author");
    assert_eq!(body["errors"], json!([]));
}

#[actix_web::test]
async fn test_login_when_wrong_password_expect_form_error_and_no_session() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/accounts/login/")
        .set_form([("username", common::USERNAME), ("password", "nope")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert!(common::response_cookie(&resp, "sessionid").is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"],
        json!(["Please enter a correct username and password."])
    );
    assert_eq!(body["username"], common::USERNAME);
}

#[actix_web::test]
async fn test_login_when_unknown_user_expect_form_error() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/accounts/login/")
        .set_form([("username", "ghost"), ("password", common::PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_login_expect_redirect_to_local_next() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/accounts/login/")
        .set_form([
            ("username", common::USERNAME),
            ("password", common::PASSWORD),
            ("next", "/authors/2/update/"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(common::location(&resp), "/authors/2/update/");
    let session = common::response_cookie(&resp, "sessionid").unwrap();
    assert!(session.http_only().unwrap_or(false));
    assert_eq!(session.path(), Some("/"));
    assert_eq!(session.same_site(), Some(SameSite::Lax));
    assert_eq!(
        session.max_age().map(|age| age.whole_seconds()),
        Some(state.config.auth.session_max_age_secs)
    );
}

#[actix_web::test]
async fn test_login_when_next_external_expect_redirect_home() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/accounts/login/")
        .set_form([
            ("username", common::USERNAME),
            ("password", common::PASSWORD),
            ("next", "https://evil.example/"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(common::location(&resp), "/");
}

#[actix_web::test]
async fn test_login_when_next_hides_host_behind_whitespace_expect_redirect_home() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    for next in ["/\t/evil.example/", "/\n/evil.example/", "/\r/evil.example/"] {
        let req = test::TestRequest::post()
            .uri("/accounts/login/")
            .set_form([
                ("username", common::USERNAME),
                ("password", common::PASSWORD),
                ("next", next),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 302);
        assert_eq!(common::location(&resp), "/", "{next:?}");
    }
}

#[actix_web::test]
async fn test_logout_expect_session_rejected_afterwards() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::get()
        .uri("/authors/create_author")
        .cookie(session.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::post()
        .uri("/accounts/logout/")
        .cookie(session.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(common::location(&resp), "/");
    let cleared = common::response_cookie(&resp, "sessionid").unwrap();
    assert_eq!(cleared.value(), "");

    let req = test::TestRequest::get()
        .uri("/authors/create_author")
        .cookie(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
}

#[actix_web::test]
async fn test_session_when_expired_expect_redirect_to_login() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let editor = user::Manager::find_by_username(&state.db, common::USERNAME)
        .await
        .unwrap()
        .unwrap();
    let mut tx = state.db.begin().await.unwrap();
    session::TxManager::create(&mut tx, "stale-token", editor.id, "2000-01-01T00:00:00Z")
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let req = test::TestRequest::get()
        .uri("/authors/create_author")
        .cookie(Cookie::new("sessionid", "stale-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(
        common::location(&resp),
        "/accounts/login/?next=%2Fauthors%2Fcreate_author"
    );
}

#[actix_web::test]
async fn test_login_expect_expired_sessions_purged() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let editor = user::Manager::find_by_username(&state.db, common::USERNAME)
        .await
        .unwrap()
        .unwrap();
    let mut tx = state.db.begin().await.unwrap();
    session::TxManager::create(&mut tx, "stale-token", editor.id, "2000-01-01T00:00:00Z")
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let fresh = common::login(&app).await;

    let mut tx = state.db.begin().await.unwrap();
    let removed = session::TxManager::delete(&mut tx, "stale-token")
        .await
        .unwrap();
    let kept = session::TxManager::delete(&mut tx, fresh.value())
        .await
        .unwrap();
    tx.rollback().await.unwrap();
    assert_eq!(removed, 0);
    assert_eq!(kept, 1);
}
