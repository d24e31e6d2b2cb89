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

use crate::domain::models::crawl_status::{CrawlFlag, GLOBAL_STATUS_ID};
use crate::domain::repositories::crawl_status_repository::CrawlStatusRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::system_status;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    *,
};
use std::sync::Arc;
use tracing::debug;

/// 爬取状态仓库实现
///
/// 所有写操作都以带条件的单条 SQL 完成，不做先读后写
pub struct CrawlStatusRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CrawlStatusRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CrawlStatusRepository for CrawlStatusRepositoryImpl {
    async fn current(&self) -> Result<Option<CrawlFlag>, RepositoryError> {
        let model = system_status::Entity::find_by_id(GLOBAL_STATUS_ID.to_string())
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(|m| CrawlFlag {
            is_crawling: m.is_crawling,
            updated_at: m.updated_at.into(),
        }))
    }

    async fn try_acquire(&self) -> Result<bool, RepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = system_status::Entity::update_many()
            .col_expr(system_status::Column::IsCrawling, Expr::value(true))
            .col_expr(system_status::Column::UpdatedAt, Expr::value(now))
            .filter(system_status::Column::Id.eq(GLOBAL_STATUS_ID))
            .filter(system_status::Column::IsCrawling.eq(false))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 1 {
            return Ok(true);
        }

        // Either held, or the row was never seeded. Inserting a held row only
        // succeeds in the second case.
        let seed = system_status::ActiveModel {
            id: Set(GLOBAL_STATUS_ID.to_string()),
            is_crawling: Set(true),
            updated_at: Set(now),
        };
        let inserted = system_status::Entity::insert(seed)
            .on_conflict(
                OnConflict::column(system_status::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        if inserted == 1 {
            debug!("Crawl status row was missing, created it as held");
        }
        Ok(inserted == 1)
    }

    async fn release(&self) -> Result<(), RepositoryError> {
        system_status::Entity::update_many()
            .col_expr(system_status::Column::IsCrawling, Expr::value(false))
            .col_expr(
                system_status::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(system_status::Column::Id.eq(GLOBAL_STATUS_ID))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn release_if_stale(&self, max_age: chrono::Duration) -> Result<bool, RepositoryError> {
        let now = Utc::now();
        let cutoff: DateTimeWithTimeZone = (now - max_age).into();

        let result = system_status::Entity::update_many()
            .col_expr(system_status::Column::IsCrawling, Expr::value(false))
            .col_expr(
                system_status::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(now)),
            )
            .filter(system_status::Column::Id.eq(GLOBAL_STATUS_ID))
            .filter(system_status::Column::IsCrawling.eq(true))
            .filter(system_status::Column::UpdatedAt.lte(cutoff))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }
}
