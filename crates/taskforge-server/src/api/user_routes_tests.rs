//! Tests for the user endpoints.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use axum::http::StatusCode;

use super::test_helpers::{create_admin, json_body, register_user, request, send, test_app};

#[tokio::test]
async fn me_returns_own_record() {
    let (app, _state) = test_app().await;
    let (cookies, user_id) = register_user(&app, "alice").await;

    let response = send(&app, request("GET", "/api/v1/users/me", Some(&cookies), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["id"].as_i64(), Some(user_id));
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn get_user_allows_self_only() {
    let (app, state) = test_app().await;
    let (alice_cookies, alice_id) = register_user(&app, "alice").await;
    let (bob_cookies, _) = register_user(&app, "bob").await;
    let (_, admin_cookies) = create_admin(&state).await;

    let uri = format!("/api/v1/users/{alice_id}");

    let own = send(&app, request("GET", &uri, Some(&alice_cookies), None)).await;
    assert_eq!(own.status(), StatusCode::OK);

    let stranger = send(&app, request("GET", &uri, Some(&bob_cookies), None)).await;
    assert_eq!(stranger.status(), StatusCode::FORBIDDEN);

    let admin = send(&app, request("GET", &uri, Some(&admin_cookies), None)).await;
    assert_eq!(admin.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_user_rejects_guests() {
    let (app, _state) = test_app().await;
    let (_, alice_id) = register_user(&app, "alice").await;

    let response = send(
        &app,
        request("GET", &format!("/api/v1/users/{alice_id}"), None, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn all_users_is_admin_only() {
    let (app, state) = test_app().await;
    let (alice_cookies, _) = register_user(&app, "alice").await;
    register_user(&app, "bob").await;
    let (_, admin_cookies) = create_admin(&state).await;

    let guest = send(&app, request("GET", "/api/v1/users/all", None, None)).await;
    assert_eq!(guest.status(), StatusCode::FORBIDDEN);

    let user = send(
        &app,
        request("GET", "/api/v1/users/all", Some(&alice_cookies), None),
    )
    .await;
    assert_eq!(user.status(), StatusCode::FORBIDDEN);

    let admin = send(
        &app,
        request("GET", "/api/v1/users/all", Some(&admin_cookies), None),
    )
    .await;
    assert_eq!(admin.status(), StatusCode::OK);

    let body = json_body(admin).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn all_users_respects_filters() {
    let (app, state) = test_app().await;
    register_user(&app, "alice").await;
    register_user(&app, "bob").await;
    let (_, admin_cookies) = create_admin(&state).await;

    let response = send(
        &app,
        request(
            "GET",
            "/api/v1/users/all?role=user&sort-by=-username",
            Some(&admin_cookies),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["bob", "alice"]);
}

#[tokio::test]
async fn all_users_rejects_unknown_sort_key() {
    let (app, state) = test_app().await;
    let (_, admin_cookies) = create_admin(&state).await;

    let response = send(
        &app,
        request(
            "GET",
            "/api/v1/users/all?sort-by=password_hash",
            Some(&admin_cookies),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_user_removes_own_account() {
    let (app, _state) = test_app().await;
    let (cookies, user_id) = register_user(&app, "alice").await;

    let response = send(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/users/{user_id}"),
            Some(&cookies),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["message"], "User has been removed successfully.");
    assert_eq!(body["user"]["id"].as_i64(), Some(user_id));
}

#[tokio::test]
async fn delete_user_rejects_stranger() {
    let (app, _state) = test_app().await;
    let (_, alice_id) = register_user(&app, "alice").await;
    let (bob_cookies, _) = register_user(&app, "bob").await;

    let response = send(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/users/{alice_id}"),
            Some(&bob_cookies),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_may_delete_any_user() {
    let (app, state) = test_app().await;
    let (_, alice_id) = register_user(&app, "alice").await;
    let (_, admin_cookies) = create_admin(&state).await;

    let response = send(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/users/{alice_id}"),
            Some(&admin_cookies),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(state.db.get_user(alice_id).await.is_err());
}
