// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DispatchSettings;
use crate::domain::services::job_dispatcher::{DispatchError, JobDispatcher};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

/// 错误响应体保留的最大字符数
const MAX_ERROR_BODY_CHARS: usize = 512;

/// GitHub Actions `workflow_dispatch` 派发器
pub struct GithubWorkflowDispatcher {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 完整的 dispatches 接口地址
    endpoint: String,
    git_ref: String,
    token: Option<String>,
}

impl GithubWorkflowDispatcher {
    /// 根据派发配置创建派发器
    ///
    /// 令牌缺失时仍可创建，`is_configured` 返回 `false`
    pub fn new(settings: &DispatchSettings) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!("dappang/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let endpoint = format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            settings.api_base.trim_end_matches('/'),
            settings.owner,
            settings.repo,
            settings.workflow
        );

        Ok(Self {
            client,
            endpoint,
            git_ref: settings.git_ref.clone(),
            token: settings
                .github_token
                .clone()
                .filter(|t| !t.trim().is_empty()),
        })
    }
}

#[async_trait]
impl JobDispatcher for GithubWorkflowDispatcher {
    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn dispatch(&self) -> Result<(), DispatchError> {
        let token = self.token.as_deref().ok_or(DispatchError::NotConfigured)?;

        debug!("Dispatching workflow via {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&json!({ "ref": self.git_ref }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout
                } else {
                    DispatchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        warn!("Workflow dispatch rejected with {}: {}", status, body);

        Err(DispatchError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
