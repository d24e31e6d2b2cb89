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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、数据库、管理员认证、任务派发、爬取状态和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 管理员认证配置
    pub admin: AdminSettings,
    /// 外部任务派发配置
    pub dispatch: DispatchSettings,
    /// 爬取状态配置
    pub crawl: CrawlSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 会话 Cookie 是否带 Secure 标记（生产环境开启）
    pub secure_cookies: bool,
}

/// 数据库配置设置
#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &redact_url(&self.url))
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

/// 管理员认证配置
#[derive(Clone, Deserialize)]
pub struct AdminSettings {
    /// 管理员密码，请求时校验是否已配置
    pub password: Option<String>,
    /// 会话有效期（秒）
    pub session_ttl_secs: u64,
}

impl fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSettings")
            .field("password", &redact(&self.password))
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

impl AdminSettings {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// 外部任务派发配置（GitHub Actions workflow_dispatch）
#[derive(Clone, Deserialize)]
pub struct DispatchSettings {
    /// API 根地址
    pub api_base: String,
    /// 仓库所有者
    pub owner: String,
    /// 仓库名称
    pub repo: String,
    /// 工作流文件名
    pub workflow: String,
    /// 触发的分支
    pub git_ref: String,
    /// 访问令牌，请求时校验是否已配置
    pub github_token: Option<String>,
    /// 派发请求超时时间（秒）
    pub timeout_secs: u64,
}

impl fmt::Debug for DispatchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchSettings")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("workflow", &self.workflow)
            .field("git_ref", &self.git_ref)
            .field("github_token", &redact(&self.github_token))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DispatchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 爬取状态配置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 爬取标记的最长持有时间（秒），超过后视为失效
    pub max_duration_secs: u64,
    /// 失效标记检查间隔（秒）
    pub stale_check_interval_secs: u64,
}

/// 指标导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

fn redact(secret: &Option<String>) -> &'static str {
    if secret.as_deref().is_some_and(|s| !s.is_empty()) {
        "[SET]"
    } else {
        "[NOT SET]"
    }
}

/// 隐藏连接串中的密码；无法解析时整体隐藏
fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() && parsed.set_password(Some("***")).is_err() {
                return "[REDACTED]".to_string();
            }
            parsed.to_string()
        }
        Err(_) => "[REDACTED]".to_string(),
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `DAPPANG__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DAPPANG").separator("__"))
            .build()?
            .try_deserialize::<Self>()
            .and_then(Self::validated)
    }

    /// 拒绝会导致后台任务无法运行的取值
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.crawl.stale_check_interval_secs == 0 {
            return Err(ConfigError::Message(
                "crawl.stale_check_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }

    /// 仅包含内置默认值的配置构建器
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.secure_cookies", false)?
            // Database
            .set_default("database.url", "postgres://localhost/dappang")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Admin session lasts 7 days
            .set_default("admin.session_ttl_secs", 60 * 60 * 24 * 7)?
            // Dispatch
            .set_default("dispatch.api_base", "https://api.github.com")?
            .set_default("dispatch.owner", "junghongseo")?
            .set_default("dispatch.repo", "dappang")?
            .set_default("dispatch.workflow", "crawl.yml")?
            .set_default("dispatch.git_ref", "main")?
            .set_default("dispatch.timeout_secs", 10)?
            // Crawl flag
            .set_default("crawl.max_duration_secs", 2 * 60 * 60)?
            .set_default("crawl.stale_check_interval_secs", 300)?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}
