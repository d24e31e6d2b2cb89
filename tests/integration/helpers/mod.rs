// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use dappang::config::settings::Settings;
use dappang::infrastructure::database::connection;
use dappang::infrastructure::database::entities::{
    ai_summary, sea_orm_active_enums::SeaAccountStatus, target_account,
};
use dappang::infrastructure::repositories::crawl_status_repo_impl::CrawlStatusRepositoryImpl;
use dappang::infrastructure::repositories::summary_repo_impl::SummaryRepositoryImpl;
use dappang::infrastructure::repositories::target_account_repo_impl::TargetAccountRepositoryImpl;
use dappang::infrastructure::services::github_dispatcher::GithubWorkflowDispatcher;
use dappang::infrastructure::session_store::SessionStore;
use dappang::presentation::routes::{self, AppDependencies};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;
use wiremock::MockServer;

pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const GITHUB_TOKEN: &str = "ghp_integration";
pub const DISPATCH_PATH: &str = "/repos/junghongseo/dappang/actions/workflows/crawl.yml/dispatches";

/// 测试应用选项
pub struct TestOptions {
    pub admin_password: Option<&'static str>,
    pub github_token: Option<&'static str>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            admin_password: Some(ADMIN_PASSWORD),
            github_token: Some(GITHUB_TOKEN),
        }
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub db: Arc<DatabaseConnection>,
    pub github: MockServer,
    pub status_repo: Arc<CrawlStatusRepositoryImpl>,
    pub sessions: Arc<SessionStore>,
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(TestOptions::default()).await
}

pub async fn create_test_app_with(options: TestOptions) -> TestApp {
    let github = MockServer::start().await;

    let mut builder = Settings::builder()
        .unwrap()
        .set_override("database.url", "sqlite::memory:")
        .unwrap()
        .set_override("dispatch.api_base", github.uri())
        .unwrap()
        .set_override("dispatch.timeout_secs", 1)
        .unwrap();
    if let Some(password) = options.admin_password {
        builder = builder.set_override("admin.password", password).unwrap();
    }
    if let Some(token) = options.github_token {
        builder = builder.set_override("dispatch.github_token", token).unwrap();
    }
    let settings: Arc<Settings> = Arc::new(builder.build().unwrap().try_deserialize().unwrap());

    let db = Arc::new(connection::create_pool(&settings.database).await.unwrap());
    Migrator::up(db.as_ref(), None).await.unwrap();

    let status_repo = Arc::new(CrawlStatusRepositoryImpl::new(db.clone()));
    let sessions = Arc::new(SessionStore::new(settings.admin.session_ttl()));

    let router = routes::routes(AppDependencies {
        settings: settings.clone(),
        sessions: sessions.clone(),
        status_repo: status_repo.clone(),
        account_repo: Arc::new(TargetAccountRepositoryImpl::new(db.clone())),
        summary_repo: Arc::new(SummaryRepositoryImpl::new(db.clone())),
        dispatcher: Arc::new(GithubWorkflowDispatcher::new(&settings.dispatch).unwrap()),
    });

    TestApp {
        router,
        db,
        github,
        status_repo,
        sessions,
    }
}

#[allow(dead_code)]
impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// 登录并返回可直接放入 `Cookie` 头的会话值
    pub async fn login(&self) -> String {
        let response = self
            .send(json_request("POST", "/auth/login", None, json!({ "password": ADMIN_PASSWORD })))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request("GET", uri, cookie)).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request("POST", uri, cookie)).await
    }

    pub async fn is_crawling(&self) -> bool {
        use dappang::domain::repositories::crawl_status_repository::CrawlStatusRepository;
        self.status_repo
            .current()
            .await
            .unwrap()
            .map(|flag| flag.is_crawling)
            .unwrap_or(false)
    }

    pub async fn insert_account(
        &self,
        handle: &str,
        status: SeaAccountStatus,
        last_scraped_at: Option<DateTime<Utc>>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        target_account::ActiveModel {
            id: Set(id),
            bakery_name: Set(format!("{} bakery", handle)),
            instagram_id: Set(handle.to_string()),
            category: Set(None),
            shopping_mall_url: Set(None),
            status: Set(status),
            last_scraped_at: Set(last_scraped_at.map(Into::into)),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.db.as_ref())
        .await
        .unwrap();
        id
    }

    pub async fn insert_summary(
        &self,
        account_id: Uuid,
        summary: Value,
        status: &str,
        created_at: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        ai_summary::ActiveModel {
            id: Set(id),
            target_account_id: Set(account_id),
            summary: Set(Some(summary)),
            status: Set(status.to_string()),
            created_at: Set(created_at.into()),
        }
        .insert(self.db.as_ref())
        .await
        .unwrap();
        id
    }
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
