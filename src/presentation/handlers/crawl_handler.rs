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

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    application::{
        dto::crawl_response::{ResetResponseDto, TriggerResponseDto},
        use_cases::crawl_use_case::CrawlUseCase,
    },
    domain::{
        repositories::{
            crawl_status_repository::CrawlStatusRepository,
            target_account_repository::TargetAccountRepository,
        },
        services::job_dispatcher::JobDispatcher,
    },
    presentation::errors::AppError,
};

/// 触发一次爬取
///
/// 成功派发返回 202；已有任务运行时返回 409 且不派发
pub async fn trigger_crawl<SR, AR, D>(
    Extension(status_repo): Extension<Arc<SR>>,
    Extension(account_repo): Extension<Arc<AR>>,
    Extension(dispatcher): Extension<Arc<D>>,
) -> Result<impl IntoResponse, AppError>
where
    SR: CrawlStatusRepository + 'static,
    AR: TargetAccountRepository + 'static,
    D: JobDispatcher + 'static,
{
    let use_case = CrawlUseCase::new(status_repo, account_repo, dispatcher);
    use_case.trigger().await?;
    Ok((StatusCode::ACCEPTED, Json(TriggerResponseDto::started())))
}

/// 查询爬取状态
pub async fn crawl_status<SR, AR, D>(
    Extension(status_repo): Extension<Arc<SR>>,
    Extension(account_repo): Extension<Arc<AR>>,
    Extension(dispatcher): Extension<Arc<D>>,
) -> Result<impl IntoResponse, AppError>
where
    SR: CrawlStatusRepository + 'static,
    AR: TargetAccountRepository + 'static,
    D: JobDispatcher + 'static,
{
    let use_case = CrawlUseCase::new(status_repo, account_repo, dispatcher);
    Ok(Json(use_case.status().await?))
}

/// 手动重置爬取状态
pub async fn reset_crawl<SR, AR, D>(
    Extension(status_repo): Extension<Arc<SR>>,
    Extension(account_repo): Extension<Arc<AR>>,
    Extension(dispatcher): Extension<Arc<D>>,
) -> Result<impl IntoResponse, AppError>
where
    SR: CrawlStatusRepository + 'static,
    AR: TargetAccountRepository + 'static,
    D: JobDispatcher + 'static,
{
    let use_case = CrawlUseCase::new(status_repo, account_repo, dispatcher);
    let accounts_reset = use_case.reset().await?;
    Ok(Json(ResetResponseDto {
        released: true,
        accounts_reset,
    }))
}
