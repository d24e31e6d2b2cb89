// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::auth_request::AuthResponseDto;
use crate::domain::models::crawl_status::CrawlStatusSnapshot;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::poller::DataRefresher;

/// 客户端观察到的爬取状态
pub type CrawlStatusView = CrawlStatusSnapshot;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Login rejected: {0}")]
    LoginRejected(String),
    #[error("Unexpected response {status}: {body}")]
    Unexpected { status: u16, body: String },
}

/// 触发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// 服务端已派发任务
    Started,
    /// 已有任务在执行，未派发
    AlreadyRunning,
}

/// 爬取接口
#[async_trait]
pub trait CrawlApi: Send + Sync {
    async fn trigger(&self) -> Result<TriggerOutcome, ClientError>;
    async fn status(&self) -> Result<CrawlStatusView, ClientError>;
}

/// 基于 reqwest 的爬取接口客户端
///
/// 开启 Cookie 存储，`login` 成功后的请求自动携带会话
pub struct HttpCrawlApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpCrawlApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    /// 使用管理员密码登录
    pub async fn login(&self, password: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint("/auth/login")?)
            .json(&json!({ "password": password }))
            .send()
            .await?;

        if response.status() == StatusCode::OK {
            info!("Logged in to {}", self.base);
            return Ok(());
        }

        let status = response.status();
        let reason = response
            .json::<AuthResponseDto>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| status.to_string());
        Err(ClientError::LoginRejected(reason))
    }

    /// 读取公开信息流
    pub async fn fetch_feed(&self) -> Result<Vec<Value>, ClientError> {
        let response = self.client.get(self.endpoint("/feed")?).send().await?;
        let response = expect_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CrawlApi for HttpCrawlApi {
    async fn trigger(&self) -> Result<TriggerOutcome, ClientError> {
        let response = self
            .client
            .post(self.endpoint("/crawl/trigger")?)
            .send()
            .await?;

        match response.status() {
            StatusCode::ACCEPTED => Ok(TriggerOutcome::Started),
            StatusCode::CONFLICT => Ok(TriggerOutcome::AlreadyRunning),
            _ => Err(unexpected(response).await),
        }
    }

    async fn status(&self) -> Result<CrawlStatusView, ClientError> {
        let response = self
            .client
            .get(self.endpoint("/crawl/status")?)
            .send()
            .await?;
        let response = expect_success(response).await?;
        let view: CrawlStatusView = response.json().await?;
        debug!("Observed isCrawling={}", view.is_crawling);
        Ok(view)
    }
}

/// 刷新信息流的 `DataRefresher`
pub struct FeedRefresher {
    api: std::sync::Arc<HttpCrawlApi>,
}

impl FeedRefresher {
    pub fn new(api: std::sync::Arc<HttpCrawlApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataRefresher for FeedRefresher {
    async fn refresh(&self) {
        match self.api.fetch_feed().await {
            Ok(items) => info!("Feed refreshed: {} summaries", items.len()),
            Err(e) => tracing::warn!("Feed refresh failed: {}", e),
        }
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(unexpected(response).await)
    }
}

async fn unexpected(response: reqwest::Response) -> ClientError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or(text);
    ClientError::Unexpected { status, body }
}
