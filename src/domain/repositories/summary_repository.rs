// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::summary::SummaryRecord;
use async_trait::async_trait;

/// 摘要查询参数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryQuery {
    /// 仅返回生成成功的摘要
    pub only_success: bool,
    /// 最大返回条数
    pub limit: Option<u64>,
}

/// 摘要仓库特质
///
/// 摘要由外部任务生成，这里只提供读取
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// 按创建时间倒序查询摘要，并带出关联账号
    async fn list_recent(&self, query: SummaryQuery) -> Result<Vec<SummaryRecord>, RepositoryError>;
}
