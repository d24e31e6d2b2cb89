// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{body_json, create_test_app, json_request, request};
use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn account_crud() {
    let app = create_test_app().await;
    let cookie = app.login().await;

    // Create
    let response = app
        .send(json_request(
            "POST",
            "/admin/accounts",
            Some(&cookie),
            json!({
                "bakeryName": "Morning Loaf",
                "instagramId": "@morning_loaf",
                "category": "bakery",
                "shoppingMallUrl": "https://shop.morningloaf.kr"
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["instagramId"], "morning_loaf");
    assert_eq!(created["status"], "active");
    let id = created["id"].as_str().unwrap().to_string();

    // List
    let response = app.get("/admin/accounts", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let accounts = body_json(response).await;
    assert_eq!(accounts.as_array().unwrap().len(), 1);

    // Update
    let response = app
        .send(json_request(
            "PUT",
            &format!("/admin/accounts/{}", id),
            Some(&cookie),
            json!({
                "bakeryName": "Evening Loaf",
                "instagramId": "evening_loaf",
                "shoppingMallUrl": "",
                "status": "paused"
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["bakeryName"], "Evening Loaf");
    assert_eq!(updated["status"], "paused");
    assert!(updated["shoppingMallUrl"].is_null());
    assert_eq!(updated["category"], "bakery");

    // Delete
    let uri = format!("/admin/accounts/{}", id);
    let response = app.send(request("DELETE", &uri, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = app.send(request("DELETE", &uri, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_handle_is_conflict() {
    let app = create_test_app().await;
    let cookie = app.login().await;
    let body = json!({ "bakeryName": "Crumb", "instagramId": "crumb" });

    let response = app
        .send(json_request("POST", "/admin/accounts", Some(&cookie), body.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .send(json_request(
            "POST",
            "/admin/accounts",
            Some(&cookie),
            json!({ "bakeryName": "Crumb Again", "instagramId": "@crumb" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({ "success": false, "error": "This Instagram account is already registered." })
    );
}

#[tokio::test]
async fn invalid_account_input_is_rejected() {
    let app = create_test_app().await;
    let cookie = app.login().await;

    for body in [
        json!({ "bakeryName": "", "instagramId": "crumb" }),
        json!({ "bakeryName": "Crumb", "instagramId": "@" }),
        json!({ "bakeryName": "Crumb", "instagramId": "crumb", "shoppingMallUrl": "not a url" }),
    ] {
        let response = app
            .send(json_request("POST", "/admin/accounts", Some(&cookie), body))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let accounts = body_json(app.get("/admin/accounts", Some(&cookie)).await).await;
    assert!(accounts.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_missing_account_is_not_found() {
    let app = create_test_app().await;
    let cookie = app.login().await;

    let response = app
        .send(json_request(
            "PUT",
            &format!("/admin/accounts/{}", Uuid::new_v4()),
            Some(&cookie),
            json!({ "bakeryName": "Ghost", "instagramId": "ghost" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_account_removes_its_summaries() {
    use dappang::infrastructure::database::entities::sea_orm_active_enums::SeaAccountStatus;

    let app = create_test_app().await;
    let cookie = app.login().await;
    let id = app.insert_account("gone", SeaAccountStatus::Active, None).await;
    app.insert_summary(id, json!({ "excerpt": "bye" }), "success", Utc::now())
        .await;

    let feed = body_json(app.get("/feed", None).await).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);

    let response = app
        .send(request("DELETE", &format!("/admin/accounts/{}", id), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let feed = body_json(app.get("/feed", None).await).await;
    assert!(feed.as_array().unwrap().is_empty());
}
