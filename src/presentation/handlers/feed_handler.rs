// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    application::{
        dto::feed_response::DashboardDto,
        use_cases::{
            account_use_case::AccountUseCase, crawl_use_case::CrawlUseCase,
            feed_use_case::FeedUseCase,
        },
    },
    domain::{
        repositories::{
            crawl_status_repository::CrawlStatusRepository,
            summary_repository::SummaryRepository,
            target_account_repository::TargetAccountRepository,
        },
        services::job_dispatcher::JobDispatcher,
    },
    presentation::errors::AppError,
};

/// 公开信息流
pub async fn feed<SR>(
    Extension(summary_repo): Extension<Arc<SR>>,
) -> Result<impl IntoResponse, AppError>
where
    SR: SummaryRepository + 'static,
{
    let use_case = FeedUseCase::new(summary_repo);
    Ok(Json(use_case.feed().await?))
}

/// 嵌入式小组件数据
pub async fn widget<SR>(
    Extension(summary_repo): Extension<Arc<SR>>,
) -> Result<impl IntoResponse, AppError>
where
    SR: SummaryRepository + 'static,
{
    let use_case = FeedUseCase::new(summary_repo);
    Ok(Json(use_case.widget().await?))
}

/// 管理后台首页：账号、摘要与爬取状态
pub async fn dashboard<CS, AR, SR, D>(
    Extension(status_repo): Extension<Arc<CS>>,
    Extension(account_repo): Extension<Arc<AR>>,
    Extension(summary_repo): Extension<Arc<SR>>,
    Extension(dispatcher): Extension<Arc<D>>,
) -> Result<impl IntoResponse, AppError>
where
    CS: CrawlStatusRepository + 'static,
    AR: TargetAccountRepository + 'static,
    SR: SummaryRepository + 'static,
    D: JobDispatcher + 'static,
{
    let accounts = AccountUseCase::new(account_repo.clone()).list().await?;
    let summaries = FeedUseCase::new(summary_repo).feed().await?;
    let crawl = CrawlUseCase::new(status_repo, account_repo, dispatcher)
        .status()
        .await?;

    Ok(Json(DashboardDto {
        accounts,
        summaries,
        crawl,
    }))
}
