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

use crate::domain::{
    models::crawl_status::CrawlStatusSnapshot,
    repositories::{
        crawl_status_repository::CrawlStatusRepository,
        target_account_repository::TargetAccountRepository, RepositoryError,
    },
    services::job_dispatcher::{DispatchError, JobDispatcher},
};
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum CrawlUseCaseError {
    #[error("A crawl is already running")]
    AlreadyRunning,
    #[error("Job runner is not configured")]
    NotConfigured,
    #[error("Dispatch failed: {0}")]
    Dispatch(DispatchError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 爬取触发与状态查询用例
pub struct CrawlUseCase<SR, AR, D> {
    status_repo: Arc<SR>,
    account_repo: Arc<AR>,
    dispatcher: Arc<D>,
}

impl<SR, AR, D> CrawlUseCase<SR, AR, D>
where
    SR: CrawlStatusRepository + 'static,
    AR: TargetAccountRepository + 'static,
    D: JobDispatcher + 'static,
{
    pub fn new(status_repo: Arc<SR>, account_repo: Arc<AR>, dispatcher: Arc<D>) -> Self {
        Self {
            status_repo,
            account_repo,
            dispatcher,
        }
    }

    /// 触发一次爬取
    ///
    /// 获取全局标记后派发外部任务；派发失败时释放标记，避免系统一直处于忙碌状态。
    pub async fn trigger(&self) -> Result<(), CrawlUseCaseError> {
        // 1. Credentials are checked before the flag is touched
        if !self.dispatcher.is_configured() {
            error!("Crawl trigger requested but the job runner token is not configured");
            return Err(CrawlUseCaseError::NotConfigured);
        }

        // 2. Single flight
        if !self.status_repo.try_acquire().await? {
            counter!("crawl_trigger_total", "outcome" => "conflict").increment(1);
            info!("Crawl trigger rejected: a crawl is already running");
            return Err(CrawlUseCaseError::AlreadyRunning);
        }

        // 3. Fire and forget
        match self.dispatcher.dispatch().await {
            Ok(()) => {
                counter!("crawl_trigger_total", "outcome" => "accepted").increment(1);
                info!("Crawl workflow dispatched");
                Ok(())
            }
            Err(e) => {
                counter!("crawl_trigger_total", "outcome" => "dispatch_failed").increment(1);
                error!("Crawl dispatch failed, releasing crawl flag: {}", e);
                if let Err(release_err) = self.status_repo.release().await {
                    error!(
                        "Failed to release crawl flag after dispatch failure: {}",
                        release_err
                    );
                }
                Err(CrawlUseCaseError::Dispatch(e))
            }
        }
    }

    /// 查询当前爬取状态
    ///
    /// 状态记录缺失时视为空闲
    pub async fn status(&self) -> Result<CrawlStatusSnapshot, CrawlUseCaseError> {
        let (flag, last_scraped_at) = tokio::try_join!(
            self.status_repo.current(),
            self.account_repo.latest_scraped_at()
        )?;

        Ok(CrawlStatusSnapshot::new(flag, last_scraped_at))
    }

    /// 手动重置：释放标记并将 `syncing` 账号恢复为 `active`
    pub async fn reset(&self) -> Result<u64, CrawlUseCaseError> {
        self.status_repo.release().await?;
        let reset = self.account_repo.reset_syncing().await?;
        warn!("Crawl state reset manually, {} accounts restored to active", reset);
        Ok(reset)
    }
}
