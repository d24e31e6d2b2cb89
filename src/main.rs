// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use dappang::config::settings::Settings;
use dappang::domain::services::job_dispatcher::JobDispatcher;
use dappang::infrastructure::database::connection;
use dappang::infrastructure::repositories::crawl_status_repo_impl::CrawlStatusRepositoryImpl;
use dappang::infrastructure::repositories::summary_repo_impl::SummaryRepositoryImpl;
use dappang::infrastructure::repositories::target_account_repo_impl::TargetAccountRepositoryImpl;
use dappang::infrastructure::services::github_dispatcher::GithubWorkflowDispatcher;
use dappang::infrastructure::session_store::SessionStore;
use dappang::presentation::routes::{self, AppDependencies};
use dappang::utils::telemetry;
use dappang::workers::StaleCrawlWorker;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry(telemetry::DEFAULT_FILTER);
    info!("Starting dappang...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded: {:?}", settings);

    dappang::infrastructure::metrics::init_metrics(&settings.metrics);

    if settings.admin.password.as_deref().map_or(true, str::is_empty) {
        warn!("Admin password is not configured; admin login is disabled");
    }

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize Components
    let status_repo = Arc::new(CrawlStatusRepositoryImpl::new(db.clone()));
    let account_repo = Arc::new(TargetAccountRepositoryImpl::new(db.clone()));
    let summary_repo = Arc::new(SummaryRepositoryImpl::new(db.clone()));
    let dispatcher = Arc::new(GithubWorkflowDispatcher::new(&settings.dispatch)?);
    if !dispatcher.is_configured() {
        warn!("GitHub token is not configured; crawl triggers will fail");
    }
    let sessions = Arc::new(SessionStore::new(settings.admin.session_ttl()));

    // 5. Start background workers
    let _stale_worker = StaleCrawlWorker::new(
        status_repo.clone(),
        Duration::from_secs(settings.crawl.stale_check_interval_secs),
        Duration::from_secs(settings.crawl.max_duration_secs),
    )
    .with_sessions(sessions.clone())
    .start();

    // 6. Serve
    let app = routes::routes(AppDependencies {
        settings: settings.clone(),
        sessions,
        status_repo,
        account_repo,
        summary_repo,
        dispatcher,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
