// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{body_json, create_test_app};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use dappang::infrastructure::database::entities::sea_orm_active_enums::SeaAccountStatus;
use serde_json::json;

#[tokio::test]
async fn feed_lists_summaries_newest_first() {
    let app = create_test_app().await;
    let base = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
    let scraped = base + Duration::hours(6);

    let fresh = app.insert_account("fresh", SeaAccountStatus::Active, Some(scraped)).await;
    let quiet = app.insert_account("quiet", SeaAccountStatus::Active, None).await;

    app.insert_summary(
        quiet,
        json!("Closed for the holidays"),
        "success",
        base,
    )
    .await;
    app.insert_summary(
        fresh,
        json!({
            "excerpt": "Chestnut bread is back",
            "blocks": [{ "type": "news", "title": "Menu", "items": ["Chestnut loaf"] }]
        }),
        "success",
        base + Duration::hours(1),
    )
    .await;

    let response = app.get("/feed", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let feed = body_json(response).await;
    let items = feed.as_array().unwrap();
    assert_eq!(items.len(), 2);

    assert_eq!(items[0]["bakeryName"], "fresh bakery");
    assert_eq!(items[0]["instagramId"], "fresh");
    assert_eq!(items[0]["excerpt"], "Chestnut bread is back");
    assert_eq!(items[0]["blocks"][0]["type"], "news");
    let updated: chrono::DateTime<Utc> =
        serde_json::from_value(items[0]["updatedAt"].clone()).unwrap();
    assert_eq!(updated, scraped);

    // Plain text summaries render as a single info block
    assert_eq!(items[1]["excerpt"], "");
    assert_eq!(items[1]["blocks"][0]["type"], "info");
    assert_eq!(items[1]["blocks"][0]["text"], "Closed for the holidays");
}

#[tokio::test]
async fn widget_returns_recent_successes_only() {
    let app = create_test_app().await;
    let account = app.insert_account("widgety", SeaAccountStatus::Active, None).await;
    let base = Utc::now() - Duration::days(1);

    for i in 0..12 {
        app.insert_summary(
            account,
            json!({ "excerpt": format!("post {}", i), "blocks": [{ "type": "sale", "title": "Deals", "items": [] }] }),
            "success",
            base + Duration::minutes(i),
        )
        .await;
    }
    app.insert_summary(account, json!({ "excerpt": "broken" }), "failed", Utc::now())
        .await;

    let response = app.get("/widget", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let widget = body_json(response).await;
    let items = widget.as_array().unwrap();

    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["excerpt"], "post 11");
    assert_eq!(items[0]["bakery_name"], "widgety bakery");
    assert_eq!(items[0]["type"], "sale");
    assert_eq!(items[0]["category"], "Deals");
    assert!(items[0].get("updated_at").is_some());
    assert!(items.iter().all(|item| item["excerpt"] != "broken"));
}

#[tokio::test]
async fn widget_allows_any_origin() {
    let app = create_test_app().await;

    let response = app
        .send(
            Request::builder()
                .uri("/widget")
                .header(header::ORIGIN, "https://bakery.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let response = app
        .send(
            Request::builder()
                .method("OPTIONS")
                .uri("/widget")
                .header(header::ORIGIN, "https://bakery.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn dashboard_combines_accounts_summaries_and_status() {
    let app = create_test_app().await;
    let account = app.insert_account("dash", SeaAccountStatus::Active, None).await;
    app.insert_summary(account, json!({ "excerpt": "hi" }), "success", Utc::now())
        .await;
    let cookie = app.login().await;

    let response = app.get("/admin", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["accounts"].as_array().unwrap().len(), 1);
    assert_eq!(body["summaries"].as_array().unwrap().len(), 1);
    assert_eq!(body["crawl"]["isCrawling"], false);
}
