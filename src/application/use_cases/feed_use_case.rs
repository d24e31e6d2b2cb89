// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    application::dto::feed_response::{FeedItemDto, WidgetItemDto},
    domain::repositories::{
        summary_repository::{SummaryQuery, SummaryRepository},
        RepositoryError,
    },
};
use std::sync::Arc;
use thiserror::Error;

/// 小组件最多展示的条数
pub const WIDGET_LIMIT: u64 = 10;

#[derive(Error, Debug)]
pub enum FeedUseCaseError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 摘要信息流用例
pub struct FeedUseCase<SR> {
    summary_repo: Arc<SR>,
}

impl<SR> FeedUseCase<SR>
where
    SR: SummaryRepository + 'static,
{
    pub fn new(summary_repo: Arc<SR>) -> Self {
        Self { summary_repo }
    }

    /// 全部摘要，最新在前
    pub async fn feed(&self) -> Result<Vec<FeedItemDto>, FeedUseCaseError> {
        let records = self.summary_repo.list_recent(SummaryQuery::default()).await?;
        Ok(records.iter().map(FeedItemDto::from).collect())
    }

    /// 小组件数据：最近的成功摘要
    pub async fn widget(&self) -> Result<Vec<WidgetItemDto>, FeedUseCaseError> {
        let records = self
            .summary_repo
            .list_recent(SummaryQuery {
                only_success: true,
                limit: Some(WIDGET_LIMIT),
            })
            .await?;
        Ok(records.iter().map(WidgetItemDto::from).collect())
    }
}
