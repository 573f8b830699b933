use crate::common;
use actix_web::{cookie::Cookie, test};
use serde_json::{json, Value};

const NEW_AUTHOR: [(&str, &str); 3] = [
    ("name", "Octavia"),
    ("surname", "Butler"),
    ("country", "USA"),
];

#[actix_web::test]
async fn test_create_form_when_anonymous_expect_redirect_to_login() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get()
        .uri("/authors/create_author")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(
        common::location(&resp),
        "/accounts/login/?next=%2Fauthors%2Fcreate_author"
    );
}

#[actix_web::test]
async fn test_mutations_when_anonymous_expect_redirect_without_changes() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;

    let posts = [
        "/authors/create_author",
        "/authors/1/update/",
        "/authors/1/delete/",
    ];
    for uri in posts {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_form(NEW_AUTHOR)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 302, "{uri}");
        assert!(common::location(&resp).starts_with("/accounts/login/?next="));
    }

    let req = test::TestRequest::get().uri("/authors/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authors"].as_array().unwrap().len(), 5);
    assert_eq!(body["authors"][0]["name"], "George");
}

#[actix_web::test]
async fn test_mutations_when_session_unknown_expect_redirect() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/authors/1/delete/")
        .cookie(Cookie::new("sessionid", "not-a-session"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);

    let req = test::TestRequest::get().uri("/authors/1/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_create_expect_redirect_and_author_listed_once() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::post()
        .uri("/authors/create_author")
        .cookie(session)
        .set_form(NEW_AUTHOR)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(common::location(&resp), "/authors/");

    let req = test::TestRequest::get().uri("/authors/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let matching: Vec<&Value> = body["authors"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|author| author["surname"] == "Butler")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["name"], "Octavia");
    assert_eq!(matching[0]["count"], 0);
}

#[actix_web::test]
async fn test_create_when_invalid_expect_form_errors_and_no_author() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let long_country = "x".repeat(101);
    let req = test::TestRequest::post()
        .uri("/authors/create_author")
        .cookie(session)
        .set_form([
            ("name", "   "),
            ("surname", "Butler"),
            ("country", long_country.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["name"], json!(["This field is required."]));
    assert_eq!(
        body["errors"]["country"],
        json!(["Ensure this value has at most 100 characters (it has 101)."])
    );
    assert_eq!(body["form"]["surname"], "Butler");
    assert_eq!(body["object"], Value::Null);

    let req = test::TestRequest::get().uri("/authors/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["authors"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_create_expect_message_shown_once() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::post()
        .uri("/authors/create_author")
        .cookie(session)
        .set_form(NEW_AUTHOR)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let queued = common::response_cookie(&resp, "messages").unwrap();
    assert_eq!(queued.value(), "author_created");

    let req = test::TestRequest::get()
        .uri("/authors/")
        .cookie(queued)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cleared = common::response_cookie(&resp, "messages").unwrap();
    assert_eq!(cleared.value(), "");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["messages"],
        json!(["New author was created successfully!"])
    );

    // The browser honours the removal, so the next page carries no cookie.
    let req = test::TestRequest::get().uri("/authors/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(common::response_cookie(&resp, "messages").is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["messages"], json!([]));
}

#[actix_web::test]
async fn test_update_form_expect_current_values() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::get()
        .uri("/authors/3/update/")
        .cookie(session)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["form"],
        json!({"name": "Terry", "surname": "Pratchett", "country": "UK"})
    );
    assert_eq!(body["object"]["id"], 3);
}

#[actix_web::test]
async fn test_update_expect_new_values_and_message() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::post()
        .uri("/authors/2/update/")
        .cookie(session)
        .set_form([
            ("name", "Ursula K."),
            ("surname", "Le Guin"),
            ("country", "United States"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(common::location(&resp), "/authors/");
    let queued = common::response_cookie(&resp, "messages").unwrap();
    assert_eq!(queued.value(), "author_updated");

    let req = test::TestRequest::get().uri("/authors/2/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Ursula K.");
    assert_eq!(body["country"], "United States");
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_update_when_missing_expect_not_found() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::post()
        .uri("/authors/77/update/")
        .cookie(session)
        .set_form(NEW_AUTHOR)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_form_expect_author_to_confirm() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::get()
        .uri("/authors/4/delete/")
        .cookie(session.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["object"]["surname"], "Banks");

    let req = test::TestRequest::get()
        .uri("/authors/40/delete/")
        .cookie(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_expect_author_and_books_gone() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let session = common::login(&app).await;

    let req = test::TestRequest::post()
        .uri("/authors/1/delete/")
        .cookie(session.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(common::location(&resp), "/authors/");
    let queued = common::response_cookie(&resp, "messages").unwrap();
    assert_eq!(queued.value(), "author_deleted");

    for uri in ["/authors/1/", "/authors/pagination/1/detail/", "/books/1/", "/books/2/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404, "{uri}");
    }

    let req = test::TestRequest::get().uri("/authors/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["authors"]
        .as_array()
        .unwrap()
        .iter()
        .all(|author| author["id"] != 1));

    let req = test::TestRequest::post()
        .uri("/authors/1/delete/")
        .cookie(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
