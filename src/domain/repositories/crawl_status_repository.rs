// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::crawl_status::CrawlFlag;
use async_trait::async_trait;

/// 爬取状态仓库特质
///
/// 全局爬取标记的窄接口。获取操作必须在存储层以条件更新原子完成，
/// 两个并发的触发请求不能同时获取成功。
#[async_trait]
pub trait CrawlStatusRepository: Send + Sync {
    /// 读取当前标记
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(CrawlFlag))` - 状态记录存在
    /// * `Ok(None)` - 状态记录不存在
    /// * `Err(RepositoryError)` - 查询失败
    async fn current(&self) -> Result<Option<CrawlFlag>, RepositoryError>;

    /// 尝试将标记从 `false` 置为 `true`
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 本次调用获取了标记
    /// * `Ok(false)` - 标记已被占用
    /// * `Err(RepositoryError)` - 更新失败
    async fn try_acquire(&self) -> Result<bool, RepositoryError>;

    /// 将标记置回 `false`，可重复调用
    async fn release(&self) -> Result<(), RepositoryError>;

    /// 标记被占用且超过 `max_age` 未变更时释放
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 释放了失效标记
    /// * `Ok(false)` - 标记空闲或尚未失效
    async fn release_if_stale(&self, max_age: chrono::Duration) -> Result<bool, RepositoryError>;
}
