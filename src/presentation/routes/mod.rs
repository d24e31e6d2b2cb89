// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::infrastructure::repositories::crawl_status_repo_impl::CrawlStatusRepositoryImpl;
use crate::infrastructure::repositories::summary_repo_impl::SummaryRepositoryImpl;
use crate::infrastructure::repositories::target_account_repo_impl::TargetAccountRepositoryImpl;
use crate::infrastructure::services::github_dispatcher::GithubWorkflowDispatcher;
use crate::infrastructure::session_store::SessionStore;
use crate::presentation::handlers::{account_handler, auth_handler, crawl_handler, feed_handler};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    http::{header, Method},
    routing::{get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type StatusRepo = CrawlStatusRepositoryImpl;
type AccountRepo = TargetAccountRepositoryImpl;
type SummaryRepo = SummaryRepositoryImpl;
type Dispatcher = GithubWorkflowDispatcher;

/// 路由依赖
pub struct AppDependencies {
    pub settings: Arc<Settings>,
    pub sessions: Arc<SessionStore>,
    pub status_repo: Arc<StatusRepo>,
    pub account_repo: Arc<AccountRepo>,
    pub summary_repo: Arc<SummaryRepo>,
    pub dispatcher: Arc<Dispatcher>,
}

/// 创建应用路由
///
/// `/admin*` 与 `/crawl*` 需要管理员会话；`/widget` 允许任意来源跨域读取
pub fn routes(deps: AppDependencies) -> Router {
    let auth_state = AuthState {
        sessions: deps.sessions.clone(),
    };

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/feed", get(feed_handler::feed::<SummaryRepo>))
        .route("/login", get(auth_handler::login_page))
        .route("/auth/login", post(auth_handler::login))
        .route("/auth/logout", post(auth_handler::logout));

    let widget_routes = Router::new()
        .route("/widget", get(feed_handler::widget::<SummaryRepo>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        );

    let protected_routes = Router::new()
        .route(
            "/admin",
            get(feed_handler::dashboard::<StatusRepo, AccountRepo, SummaryRepo, Dispatcher>),
        )
        .route(
            "/admin/accounts",
            get(account_handler::list_accounts::<AccountRepo>)
                .post(account_handler::create_account::<AccountRepo>),
        )
        .route(
            "/admin/accounts/{id}",
            put(account_handler::update_account::<AccountRepo>)
                .delete(account_handler::delete_account::<AccountRepo>),
        )
        .route(
            "/crawl/trigger",
            post(crawl_handler::trigger_crawl::<StatusRepo, AccountRepo, Dispatcher>),
        )
        .route(
            "/crawl/status",
            get(crawl_handler::crawl_status::<StatusRepo, AccountRepo, Dispatcher>),
        )
        .route(
            "/crawl/reset",
            post(crawl_handler::reset_crawl::<StatusRepo, AccountRepo, Dispatcher>),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(widget_routes)
        .merge(protected_routes)
        .layer(Extension(deps.status_repo))
        .layer(Extension(deps.account_repo))
        .layer(Extension(deps.summary_repo))
        .layer(Extension(deps.dispatcher))
        .layer(Extension(deps.sessions))
        .layer(Extension(deps.settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
