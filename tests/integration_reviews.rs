mod common;

use axum::http::StatusCode;
use common::{LISTING, TEACHER, get, post_json, send, setup_test_app, token_for};
use serde_json::{Value, json};

fn review_body(learner: &str, text: &str) -> Value {
    json!({
        "learnerID": learner,
        "teacherID": TEACHER,
        "listingID": LISTING,
        "reviewText": text,
        "rating": 4
    })
}

#[tokio::test]
async fn test_create_review_trims_text() {
    let app = setup_test_app();
    let token = token_for("learner-1");

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/reviews/create",
            Some(&token),
            &review_body("learner-1", "   Explained recursion brilliantly   "),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Review submitted successfully");
    assert_eq!(
        body["review"]["reviewText"],
        "Explained recursion brilliantly"
    );
    assert_eq!(body["review"]["rating"], 4);
}

#[tokio::test]
async fn test_review_text_length_rules() {
    let app = setup_test_app();
    let token = token_for("learner-1");

    let cases = [
        ("    nine char    ".to_string(), "Review must be at least 10 characters long"),
        ("a".repeat(501), "Review must be at most 500 characters long"),
    ];
    for (text, message) in cases {
        let (status, body) = send(
            &app,
            post_json(
                "/api/v1/reviews/create",
                Some(&token),
                &review_body("learner-1", &text),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn test_duplicate_review_is_conflict() {
    let app = setup_test_app();
    let token = token_for("learner-1");
    let body = review_body("learner-1", "Explained recursion brilliantly");

    let (status, _) = send(
        &app,
        post_json("/api/v1/reviews/create", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        post_json("/api/v1/reviews/create", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_REVIEWED");
}

#[tokio::test]
async fn test_review_for_someone_else_is_forbidden() {
    let app = setup_test_app();
    let token = token_for("learner-1");

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/reviews/create",
            Some(&token),
            &review_body("learner-2", "Explained recursion brilliantly"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_list_reviews_for_listing() {
    let app = setup_test_app();
    let token = token_for("learner-1");
    send(
        &app,
        post_json(
            "/api/v1/reviews/create",
            Some(&token),
            &review_body("learner-1", "Explained recursion brilliantly"),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        get(&format!("/api/v1/reviews/listing/{}", LISTING), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["reviews"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["reviews"][0]["learnerID"], "learner-1");
}
