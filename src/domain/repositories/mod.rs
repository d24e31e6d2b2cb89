// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// 仓库接口模块
///
/// 定义领域层的仓库接口，具体实现由基础设施层提供：
/// - 爬取状态仓库（crawl_status_repository）：全局爬取标记的获取与释放
/// - 账号仓库（target_account_repository）：被跟踪账号的增删改查
/// - 摘要仓库（summary_repository）：AI 摘要的只读查询
pub mod crawl_status_repository;
pub mod summary_repository;
pub mod target_account_repository;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 唯一约束冲突
    #[error("Record already exists")]
    AlreadyExists,
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::AlreadyExists,
            _ => RepositoryError::Database(err),
        }
    }
}
