// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::target_account::TargetAccount;
use crate::domain::repositories::target_account_repository::TargetAccountRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::sea_orm_active_enums::SeaAccountStatus;
use crate::infrastructure::database::entities::target_account;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

impl From<target_account::Model> for TargetAccount {
    fn from(m: target_account::Model) -> Self {
        Self {
            id: m.id,
            bakery_name: m.bakery_name,
            instagram_id: m.instagram_id,
            category: m.category,
            shopping_mall_url: m.shopping_mall_url,
            status: m.status.into(),
            last_scraped_at: m.last_scraped_at.map(Into::into),
            created_at: m.created_at.into(),
        }
    }
}

/// 账号仓库实现
pub struct TargetAccountRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TargetAccountRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TargetAccountRepository for TargetAccountRepositoryImpl {
    async fn list(&self) -> Result<Vec<TargetAccount>, RepositoryError> {
        let models = target_account::Entity::find()
            .order_by_desc(target_account::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TargetAccount>, RepositoryError> {
        let model = target_account::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, account: &TargetAccount) -> Result<TargetAccount, RepositoryError> {
        let model = target_account::ActiveModel {
            id: Set(account.id),
            bakery_name: Set(account.bakery_name.clone()),
            instagram_id: Set(account.instagram_id.clone()),
            category: Set(account.category.clone()),
            shopping_mall_url: Set(account.shopping_mall_url.clone()),
            status: Set(account.status.into()),
            last_scraped_at: Set(account.last_scraped_at.map(Into::into)),
            created_at: Set(account.created_at.into()),
        };

        target_account::Entity::insert(model)
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(account.clone())
    }

    async fn update(&self, account: &TargetAccount) -> Result<TargetAccount, RepositoryError> {
        let mut model: target_account::ActiveModel = target_account::Entity::find_by_id(account.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        model.bakery_name = Set(account.bakery_name.clone());
        model.instagram_id = Set(account.instagram_id.clone());
        model.shopping_mall_url = Set(account.shopping_mall_url.clone());
        model.status = Set(account.status.into());

        let updated = model.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = target_account::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn latest_scraped_at(&self) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        let latest = target_account::Entity::find()
            .filter(target_account::Column::LastScrapedAt.is_not_null())
            .order_by_desc(target_account::Column::LastScrapedAt)
            .one(self.db.as_ref())
            .await?;

        Ok(latest.and_then(|m| m.last_scraped_at).map(Into::into))
    }

    async fn reset_syncing(&self) -> Result<u64, RepositoryError> {
        let result = target_account::Entity::update_many()
            .col_expr(
                target_account::Column::Status,
                Expr::value(SeaAccountStatus::Active),
            )
            .filter(target_account::Column::Status.eq(SeaAccountStatus::Syncing))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}
