// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::summary::{SummaryContent, SummaryRecord, SUMMARY_STATUS_SUCCESS};
use crate::domain::repositories::summary_repository::{SummaryQuery, SummaryRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{ai_summary, target_account};
use async_trait::async_trait;
use sea_orm::*;
use serde_json::Value;
use std::sync::Arc;

/// 摘要仓库实现
pub struct SummaryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SummaryRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SummaryRepository for SummaryRepositoryImpl {
    async fn list_recent(&self, query: SummaryQuery) -> Result<Vec<SummaryRecord>, RepositoryError> {
        let mut select = ai_summary::Entity::find()
            .find_also_related(target_account::Entity)
            .order_by_desc(ai_summary::Column::CreatedAt);

        if query.only_success {
            select = select.filter(ai_summary::Column::Status.eq(SUMMARY_STATUS_SUCCESS));
        }
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let rows = select.all(self.db.as_ref()).await?;

        Ok(rows
            .into_iter()
            .map(|(summary, account)| SummaryRecord {
                id: summary.id,
                target_account_id: summary.target_account_id,
                content: SummaryContent::decode(summary.summary.as_ref().unwrap_or(&Value::Null)),
                status: summary.status,
                created_at: summary.created_at.into(),
                account: account.map(Into::into),
            })
            .collect())
    }
}
