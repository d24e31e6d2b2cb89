// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    body_json, create_test_app, create_test_app_with, request, TestOptions, DISPATCH_PATH,
    GITHUB_TOKEN,
};
use axum::http::{header, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use dappang::infrastructure::database::entities::{sea_orm_active_enums::SeaAccountStatus, system_status};
use sea_orm::EntityTrait;
use serde_json::json;
use wiremock::matchers::{body_json as wm_body_json, header as wm_header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_dispatch(app: &super::helpers::TestApp, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(DISPATCH_PATH))
        .and(wm_header("authorization", format!("Bearer {}", GITHUB_TOKEN).as_str()))
        .and(wm_body_json(json!({ "ref": "main" })))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(&app.github)
        .await;
}

/// 未登录的触发请求返回 401，且不修改标记、不派发
#[tokio::test]
async fn trigger_without_session_is_rejected() {
    let app = create_test_app().await;
    mount_dispatch(&app, 204, 0).await;

    let response = app.post("/crawl/trigger", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    let response = app.post("/crawl/trigger", Some("admin_session=forged")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(!app.is_crawling().await);
}

/// 浏览器请求被重定向到登录页
#[tokio::test]
async fn browser_without_session_is_redirected() {
    let app = create_test_app().await;

    let mut req = request("GET", "/admin", None);
    req.headers_mut()
        .insert(header::ACCEPT, "text/html".parse().unwrap());
    let response = app.send(req).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

/// 空闲时触发返回 202，随后的触发返回 409 且不再派发
#[tokio::test]
async fn trigger_then_conflict() {
    let app = create_test_app().await;
    mount_dispatch(&app, 204, 1).await;
    let cookie = app.login().await;

    let response = app.post("/crawl/trigger", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(response).await, json!({ "started": true }));
    assert!(app.is_crawling().await);

    let response = app.post("/crawl/trigger", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({ "started": false, "reason": "already_running" })
    );

    let response = app.get("/crawl/status", Some(&cookie)).await;
    assert_eq!(body_json(response).await["isCrawling"], true);
}

/// 并发触发只有一个成功
#[tokio::test]
async fn concurrent_triggers_dispatch_once() {
    let app = std::sync::Arc::new(create_test_app().await);
    mount_dispatch(&app, 204, 1).await;
    let cookie = app.login().await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let app = app.clone();
        let cookie = cookie.clone();
        handles.push(tokio::spawn(async move {
            app.post("/crawl/trigger", Some(&cookie)).await.status()
        }));
    }

    let mut accepted = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::ACCEPTED => accepted += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(conflicts, 4);
}

/// 派发失败返回 502 并释放标记
#[tokio::test]
async fn dispatch_failure_releases_flag() {
    let app = create_test_app().await;
    mount_dispatch(&app, 401, 1).await;
    let cookie = app.login().await;

    let response = app.post("/crawl/trigger", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert!(!body.to_string().contains(GITHUB_TOKEN));

    assert!(!app.is_crawling().await);
}

/// 派发超时同样释放标记
#[tokio::test]
async fn dispatch_timeout_releases_flag() {
    let app = create_test_app().await;
    Mock::given(method("POST"))
        .and(path(DISPATCH_PATH))
        .respond_with(ResponseTemplate::new(204).set_delay(std::time::Duration::from_secs(3)))
        .mount(&app.github)
        .await;
    let cookie = app.login().await;

    let response = app.post("/crawl/trigger", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(!app.is_crawling().await);
}

/// 未配置令牌时返回 500，标记不变
#[tokio::test]
async fn trigger_without_token_is_misconfigured() {
    let app = create_test_app_with(TestOptions {
        github_token: None,
        ..TestOptions::default()
    })
    .await;
    mount_dispatch(&app, 204, 0).await;
    let cookie = app.login().await;

    let response = app.post("/crawl/trigger", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!app.is_crawling().await);
}

/// 新库：空闲且没有抓取时间
#[tokio::test]
async fn status_defaults_on_fresh_store() {
    let app = create_test_app().await;
    let cookie = app.login().await;

    let response = app.get("/crawl/status", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "isCrawling": false, "lastScrapedAt": null })
    );
}

/// 抓取时间取所有账号中的最大值
#[tokio::test]
async fn status_reports_latest_scrape() {
    let app = create_test_app().await;
    let latest = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
    app.insert_account("older", SeaAccountStatus::Active, Some(latest - Duration::days(1)))
        .await;
    app.insert_account("newest", SeaAccountStatus::Active, Some(latest))
        .await;
    app.insert_account("never", SeaAccountStatus::Active, None).await;
    let cookie = app.login().await;

    let body = body_json(app.get("/crawl/status", Some(&cookie)).await).await;
    let reported: chrono::DateTime<Utc> =
        serde_json::from_value(body["lastScrapedAt"].clone()).unwrap();
    assert_eq!(reported, latest);
}

/// 状态记录缺失时视为空闲，触发会重建记录
#[tokio::test]
async fn missing_status_row_is_idle_and_recreated() {
    let app = create_test_app().await;
    mount_dispatch(&app, 204, 1).await;
    system_status::Entity::delete_many()
        .exec(app.db.as_ref())
        .await
        .unwrap();
    let cookie = app.login().await;

    let body = body_json(app.get("/crawl/status", Some(&cookie)).await).await;
    assert_eq!(body["isCrawling"], false);

    let response = app.post("/crawl/trigger", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(app.is_crawling().await);

    let response = app.post("/crawl/trigger", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// 手动重置释放标记并恢复同步中的账号
#[tokio::test]
async fn reset_releases_flag_and_syncing_accounts() {
    let app = create_test_app().await;
    mount_dispatch(&app, 204, 2).await;
    app.insert_account("stuck", SeaAccountStatus::Syncing, None).await;
    app.insert_account("paused", SeaAccountStatus::Paused, None).await;
    let cookie = app.login().await;

    assert_eq!(
        app.post("/crawl/trigger", Some(&cookie)).await.status(),
        StatusCode::ACCEPTED
    );

    let response = app.post("/crawl/reset", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "released": true, "accountsReset": 1 })
    );
    assert!(!app.is_crawling().await);

    // Idle again, so a new trigger dispatches
    assert_eq!(
        app.post("/crawl/trigger", Some(&cookie)).await.status(),
        StatusCode::ACCEPTED
    );
}
