// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::account_request::{RegisterAccountDto, UpdateAccountDto},
        use_cases::account_use_case::AccountUseCase,
    },
    domain::repositories::target_account_repository::TargetAccountRepository,
    presentation::errors::AppError,
};

/// 列出全部账号
pub async fn list_accounts<AR>(
    Extension(account_repo): Extension<Arc<AR>>,
) -> Result<impl IntoResponse, AppError>
where
    AR: TargetAccountRepository + 'static,
{
    let use_case = AccountUseCase::new(account_repo);
    Ok(Json(use_case.list().await?))
}

/// 注册新账号
pub async fn create_account<AR>(
    Extension(account_repo): Extension<Arc<AR>>,
    Json(payload): Json<RegisterAccountDto>,
) -> Result<impl IntoResponse, AppError>
where
    AR: TargetAccountRepository + 'static,
{
    let use_case = AccountUseCase::new(account_repo);
    let account = use_case.register(payload).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// 编辑账号
pub async fn update_account<AR>(
    Extension(account_repo): Extension<Arc<AR>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAccountDto>,
) -> Result<impl IntoResponse, AppError>
where
    AR: TargetAccountRepository + 'static,
{
    let use_case = AccountUseCase::new(account_repo);
    Ok(Json(use_case.update(id, payload).await?))
}

/// 删除账号，关联摘要随之级联删除
pub async fn delete_account<AR>(
    Extension(account_repo): Extension<Arc<AR>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    AR: TargetAccountRepository + 'static,
{
    let use_case = AccountUseCase::new(account_repo);
    use_case.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
