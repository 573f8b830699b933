use crate::common;
use actix_web::test;
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn ids(body: &Value) -> Vec<i64> {
    body["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|author| author["id"].as_i64().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_author_list_when_no_page_expect_first_three_by_id() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get()
        .uri("/authors/pagination/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(body["is_paginated"], true);
    assert_eq!(
        body["page_obj"],
        json!({
            "number": 1,
            "num_pages": 2,
            "count": 5,
            "has_next": true,
            "has_previous": false,
            "next_page_number": 2,
            "previous_page_number": null
        })
    );
}

#[actix_web::test]
async fn test_author_list_when_second_page_expect_remainder() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get()
        .uri("/authors/pagination/?page=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![4, 5]);
    assert_eq!(body["page_obj"]["has_next"], false);
    assert_eq!(body["page_obj"]["previous_page_number"], 1);
}

#[actix_web::test]
async fn test_author_list_when_last_expect_final_page() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get()
        .uri("/authors/pagination/?page=last")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page_obj"]["number"], 2);
    assert_eq!(ids(&body), vec![4, 5]);
}

#[actix_web::test]
async fn test_author_list_pages_cover_all_authors_once() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;

    let mut seen = Vec::new();
    let mut page = 1;
    loop {
        let req = test::TestRequest::get()
            .uri(&format!("/authors/pagination/?page={page}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let page_ids = ids(&body);
        assert!(page_ids.len() <= 3);
        seen.extend(page_ids);
        if body["page_obj"]["has_next"] != true {
            break;
        }
        page += 1;
    }

    let unique: BTreeSet<i64> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len());
    assert_eq!(unique, BTreeSet::from([1, 2, 3, 4, 5]));
}

#[actix_web::test]
async fn test_author_list_when_page_invalid_expect_not_found() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    for query in ["page=3", "page=0", "page=-1", "page=abc"] {
        let req = test::TestRequest::get()
            .uri(&format!("/authors/pagination/?{query}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404, "{query}");
    }
}

#[actix_web::test]
async fn test_author_detail_expect_author() {
    let (_dir, state) = common::initialize_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get()
        .uri("/authors/pagination/4/detail/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["author"],
        json!({"id": 4, "name": "Iain", "surname": "Banks", "country": "UK"})
    );

    let req = test::TestRequest::get()
        .uri("/authors/pagination/40/detail/")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_author_list_when_empty_expect_single_empty_page() {
    let (_dir, state) = common::initialize_empty_state().await;
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get()
        .uri("/authors/pagination/")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["author_list"], json!([]));
    assert_eq!(body["is_paginated"], false);
    assert_eq!(body["page_obj"]["number"], 1);
    assert_eq!(body["page_obj"]["num_pages"], 1);
    assert_eq!(body["page_obj"]["count"], 0);

    let req = test::TestRequest::get()
        .uri("/authors/pagination/?page=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
