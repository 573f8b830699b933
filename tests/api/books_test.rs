use crate::common;
use actix_web::test;
use serde_json::{json, Value};

#[actix_web::test]
async fn test_books_list_expect_books_with_author_surname() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/books/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 5);
    assert_eq!(books[0], json!({"id": 1, "title": "1984", "author": "Orwell"}));
    assert_eq!(books[2]["author"], "Le Guin");
}

#[actix_web::test]
async fn test_books_list_expect_aggregate_info() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/books/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let info = &body["info"];
    assert!((info["price__avg"].as_f64().unwrap() - 9.6).abs() < 1e-9);
    assert_eq!(info["price__max"].as_f64(), Some(12.0));
    assert_eq!(info["price__min"].as_f64(), Some(7.0));
    assert_eq!(info["title__count"], 5);
    assert_eq!(info["pages__max"], 471);
    assert_eq!(info["pages__min"], 112);
}

#[actix_web::test]
async fn test_book_info_expect_flattened_detail() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/books/3/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["title"], "The Dispossessed");
    assert_eq!(body["pages"], 387);
    assert_eq!(body["pubdate"], "1974-05-01");
    assert_eq!(body["author"], "Le Guin");
    assert_eq!(body["author_id"], 2);
    assert_eq!(body["publisher_id"], "Tor");
    assert_eq!(
        body["publisher"],
        json!([{"id": 2, "name": "Tor", "year": 1980}])
    );
}

#[actix_web::test]
async fn test_book_info_when_missing_expect_not_found() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/books/99/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_book_info_when_id_not_integer_expect_not_found() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/books/abc/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_books_list_when_empty_expect_null_aggregates() {
    let (_dir, state) = common::initialize_empty_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/books/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["books"], json!([]));
    assert_eq!(
        body["info"],
        json!({
            "price__avg": null,
            "price__max": null,
            "price__min": null,
            "title__count": 0,
            "pages__max": null,
            "pages__min": null
        })
    );
}
