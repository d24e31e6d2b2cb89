// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::crawl_api::{ClientError, CrawlApi, TriggerOutcome};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// 默认轮询周期
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// 轮询周期下限，零周期会让定时器 panic
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// 轮询器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    /// 触发请求已发出，尚未得到结果
    Triggering,
    Polling,
}

/// 爬取完成后的数据刷新
#[async_trait]
pub trait DataRefresher: Send + Sync {
    async fn refresh(&self);
}

#[derive(Error, Debug)]
pub enum PollerError {
    #[error("Poller is busy ({0:?})")]
    Busy(PollerState),
    #[error("A crawl is already running")]
    AlreadyRunning,
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// 爬取状态轮询器
///
/// 显式状态机 `Idle -> Triggering -> Polling -> Idle`。状态通过 `watch` 通道发布，
/// 轮询定时器由轮询器独占持有，`stop` 或析构时取消。
pub struct CrawlPoller<A, R>
where
    A: CrawlApi + 'static,
    R: DataRefresher + 'static,
{
    api: Arc<A>,
    refresher: Arc<R>,
    interval: Duration,
    state: Arc<watch::Sender<PollerState>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<A, R> CrawlPoller<A, R>
where
    A: CrawlApi + 'static,
    R: DataRefresher + 'static,
{
    pub fn new(api: Arc<A>, refresher: Arc<R>) -> Self {
        Self::with_interval(api, refresher, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(api: Arc<A>, refresher: Arc<R>, interval: Duration) -> Self {
        let (state, _) = watch::channel(PollerState::Idle);
        Self {
            api,
            refresher,
            interval: interval.max(MIN_POLL_INTERVAL),
            state: Arc::new(state),
            timer: Mutex::new(None),
        }
    }

    pub fn state(&self) -> PollerState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollerState> {
        self.state.subscribe()
    }

    /// 触发一次爬取并开始轮询
    ///
    /// 非 `Idle` 状态下拒绝；触发失败时回到 `Idle` 并返回错误
    pub async fn trigger(&self) -> Result<(), PollerError> {
        let mut refused = None;
        self.state.send_if_modified(|state| {
            if *state == PollerState::Idle {
                *state = PollerState::Triggering;
                true
            } else {
                refused = Some(*state);
                false
            }
        });
        if let Some(state) = refused {
            return Err(PollerError::Busy(state));
        }

        match self.api.trigger().await {
            Ok(TriggerOutcome::Started) => {
                if !self.start_polling() {
                    debug!("Poller stopped while the trigger was in flight, not polling");
                }
                Ok(())
            }
            Ok(TriggerOutcome::AlreadyRunning) => {
                self.state.send_replace(PollerState::Idle);
                Err(PollerError::AlreadyRunning)
            }
            Err(e) => {
                self.state.send_replace(PollerState::Idle);
                Err(e.into())
            }
        }
    }

    /// 取消轮询并回到 `Idle`
    pub fn stop(&self) {
        let mut timer = self.timer.lock();
        if let Some(handle) = timer.take() {
            handle.abort();
            debug!("Crawl status polling cancelled");
        }
        self.state.send_replace(PollerState::Idle);
    }

    /// `Triggering -> Polling`，期间若已被 `stop` 则不启动定时器
    fn start_polling(&self) -> bool {
        // Held across the transition so a concurrent stop() cannot interleave
        let mut timer = self.timer.lock();
        let started = self.state.send_if_modified(|state| {
            if *state == PollerState::Triggering {
                *state = PollerState::Polling;
                true
            } else {
                false
            }
        });
        if !started {
            return false;
        }

        let api = self.api.clone();
        let refresher = self.refresher.clone();
        let state = self.state.clone();
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // The trigger just succeeded, so the crawl is assumed to be running
            let mut previous = true;
            loop {
                ticker.tick().await;
                let current = match api.status().await {
                    Ok(view) => view.is_crawling,
                    Err(e) => {
                        warn!("Crawl status poll failed, retrying next tick: {}", e);
                        continue;
                    }
                };

                if previous && !current {
                    info!("Crawl finished, refreshing data");
                    refresher.refresh().await;
                    state.send_replace(PollerState::Idle);
                    return;
                }
                previous = current;
            }
        });

        if let Some(stale) = timer.replace(handle) {
            stale.abort();
        }
        true
    }
}

impl<A, R> Drop for CrawlPoller<A, R>
where
    A: CrawlApi + 'static,
    R: DataRefresher + 'static,
{
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}
