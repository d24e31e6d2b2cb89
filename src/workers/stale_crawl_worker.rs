// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::crawl_status_repository::CrawlStatusRepository;
use crate::infrastructure::session_store::SessionStore;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// 失效爬取标记清理工作器
///
/// 外部任务异常退出时不会回写标记；超过最长爬取时长的标记由这里释放。
/// 同时顺带清理过期的管理员会话。
pub struct StaleCrawlWorker<R>
where
    R: CrawlStatusRepository + 'static,
{
    repository: Arc<R>,
    sessions: Option<Arc<SessionStore>>,
    interval: Duration,
    max_age: Duration,
}

impl<R> StaleCrawlWorker<R>
where
    R: CrawlStatusRepository + 'static,
{
    pub fn new(repository: Arc<R>, interval: Duration, max_age: Duration) -> Self {
        Self {
            repository,
            sessions: None,
            // tokio intervals panic on a zero period
            interval: interval.max(Duration::from_millis(1)),
            max_age,
        }
    }

    pub fn with_sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!(
            "Stale crawl worker started (interval {:?}, max age {:?})",
            self.interval, self.max_age
        );

        let mut interval = tokio::time::interval(self.interval);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 执行一次检查，返回是否释放了失效标记
    pub async fn tick(&self) -> bool {
        if let Some(sessions) = &self.sessions {
            let purged = sessions.purge_expired();
            if purged > 0 {
                debug!("Purged {} expired admin sessions", purged);
            }
        }

        let max_age = match chrono::Duration::from_std(self.max_age) {
            Ok(max_age) => max_age,
            Err(e) => {
                error!("Invalid maximum crawl duration {:?}: {}", self.max_age, e);
                return false;
            }
        };

        match self.repository.release_if_stale(max_age).await {
            Ok(true) => {
                counter!("crawl_flag_stale_released_total").increment(1);
                warn!(
                    "Released crawl flag held longer than {:?}; the job runner likely died",
                    self.max_age
                );
                true
            }
            Ok(false) => false,
            Err(e) => {
                error!("Failed to check for a stale crawl flag: {}", e);
                false
            }
        }
    }
}
