// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    application::dto::account_request::{RegisterAccountDto, UpdateAccountDto},
    domain::{
        models::target_account::{AccountStatus, TargetAccount},
        repositories::{target_account_repository::TargetAccountRepository, RepositoryError},
    },
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Error, Debug)]
pub enum AccountUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("This Instagram account is already registered.")]
    AlreadyRegistered,
    #[error("Account not found")]
    NotFound,
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AccountUseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists => AccountUseCaseError::AlreadyRegistered,
            RepositoryError::NotFound => AccountUseCaseError::NotFound,
            other => AccountUseCaseError::Repository(other),
        }
    }
}

/// 账号管理用例
pub struct AccountUseCase<AR> {
    account_repo: Arc<AR>,
}

impl<AR> AccountUseCase<AR>
where
    AR: TargetAccountRepository + 'static,
{
    pub fn new(account_repo: Arc<AR>) -> Self {
        Self { account_repo }
    }

    pub async fn list(&self) -> Result<Vec<TargetAccount>, AccountUseCaseError> {
        Ok(self.account_repo.list().await?)
    }

    /// 注册新账号
    ///
    /// 句柄去掉前导 `@` 后必须非空；重复句柄返回 `AlreadyRegistered`
    pub async fn register(
        &self,
        dto: RegisterAccountDto,
    ) -> Result<TargetAccount, AccountUseCaseError> {
        let dto = dto.normalized();
        dto.validate()
            .map_err(|e| AccountUseCaseError::ValidationError(e.to_string()))?;

        let account = TargetAccount {
            id: Uuid::new_v4(),
            bakery_name: required(&dto.bakery_name, "bakeryName")?,
            instagram_id: required(&TargetAccount::normalize_handle(&dto.instagram_id), "instagramId")?,
            category: optional(dto.category),
            shopping_mall_url: optional(dto.shopping_mall_url),
            status: AccountStatus::Active,
            last_scraped_at: None,
            created_at: Utc::now(),
        };

        let created = self.account_repo.create(&account).await?;
        info!("Registered account @{} ({})", created.instagram_id, created.id);
        Ok(created)
    }

    /// 编辑账号
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateAccountDto,
    ) -> Result<TargetAccount, AccountUseCaseError> {
        let dto = dto.normalized();
        dto.validate()
            .map_err(|e| AccountUseCaseError::ValidationError(e.to_string()))?;

        let mut account = self
            .account_repo
            .find_by_id(id)
            .await?
            .ok_or(AccountUseCaseError::NotFound)?;

        account.bakery_name = required(&dto.bakery_name, "bakeryName")?;
        account.instagram_id =
            required(&TargetAccount::normalize_handle(&dto.instagram_id), "instagramId")?;
        account.shopping_mall_url = optional(dto.shopping_mall_url);
        if let Some(status) = dto.status {
            account.status = status;
        }

        Ok(self.account_repo.update(&account).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AccountUseCaseError> {
        self.account_repo.delete(id).await?;
        info!("Deleted account {}", id);
        Ok(())
    }
}

fn required(value: &str, field: &str) -> Result<String, AccountUseCaseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccountUseCaseError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
