// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::target_account::TargetAccount;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 账号仓库特质
#[async_trait]
pub trait TargetAccountRepository: Send + Sync {
    /// 按创建时间倒序列出全部账号
    async fn list(&self) -> Result<Vec<TargetAccount>, RepositoryError>;
    /// 根据ID查找账号
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TargetAccount>, RepositoryError>;
    /// 创建账号，句柄重复时返回 `AlreadyExists`
    async fn create(&self, account: &TargetAccount) -> Result<TargetAccount, RepositoryError>;
    /// 更新账号名称、句柄、商店地址和状态
    async fn update(&self, account: &TargetAccount) -> Result<TargetAccount, RepositoryError>;
    /// 删除账号，不存在时返回 `NotFound`
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 所有账号中最近的抓取时间
    async fn latest_scraped_at(&self) -> Result<Option<DateTime<Utc>>, RepositoryError>;
    /// 将 `syncing` 状态的账号重置为 `active`，返回受影响行数
    async fn reset_syncing(&self) -> Result<u64, RepositoryError>;
}
