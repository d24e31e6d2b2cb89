// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::application::dto::{auth_request::AuthResponseDto, crawl_response::TriggerResponseDto};
use crate::application::use_cases::{
    account_use_case::AccountUseCaseError, crawl_use_case::CrawlUseCaseError,
    feed_use_case::FeedUseCaseError,
};

/// 应用错误类型
///
/// 所有对外错误的统一出口。存储层和上游的细节只写日志，不返回给调用方。
#[derive(Error, Debug)]
pub enum AppError {
    /// 缺少有效会话
    #[error("Authentication required")]
    AuthRequired,
    /// 登录凭据错误
    #[error("{0}")]
    AuthInvalid(String),
    /// 已有爬取任务在执行
    #[error("A crawl is already running")]
    AlreadyRunning,
    /// 任务运行器派发失败
    #[error("Failed to dispatch the crawl job")]
    UpstreamDispatchFailed,
    /// 存储不可用
    #[error("Storage is temporarily unavailable")]
    StoreUnavailable,
    #[error("{0}")]
    NotFound(String),
    /// 参数校验失败；重复注册同样属于校验失败，但以 409 返回
    #[error("{message}")]
    ValidationFailed { status: StatusCode, message: String },
    /// 服务端配置缺失
    #[error("{0}")]
    Misconfigured(String),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::ValidationFailed {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        AppError::ValidationFailed {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthRequired | AppError::AuthInvalid(_) => StatusCode::UNAUTHORIZED,
            AppError::AlreadyRunning => StatusCode::CONFLICT,
            AppError::UpstreamDispatchFailed => StatusCode::BAD_GATEWAY,
            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationFailed { status, .. } => *status,
            AppError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::AlreadyRunning => {
                (status, Json(TriggerResponseDto::already_running())).into_response()
            }
            other => (status, Json(AuthResponseDto::failure(other.to_string()))).into_response(),
        }
    }
}

impl From<CrawlUseCaseError> for AppError {
    fn from(err: CrawlUseCaseError) -> Self {
        match err {
            CrawlUseCaseError::AlreadyRunning => AppError::AlreadyRunning,
            CrawlUseCaseError::NotConfigured => {
                AppError::Misconfigured("Job runner token is not configured".to_string())
            }
            CrawlUseCaseError::Dispatch(e) => {
                error!("Crawl dispatch failed: {}", e);
                AppError::UpstreamDispatchFailed
            }
            CrawlUseCaseError::Repository(e) => {
                error!("Crawl status store error: {}", e);
                AppError::StoreUnavailable
            }
        }
    }
}

impl From<AccountUseCaseError> for AppError {
    fn from(err: AccountUseCaseError) -> Self {
        match err {
            AccountUseCaseError::ValidationError(msg) => AppError::invalid(msg),
            AccountUseCaseError::AlreadyRegistered => {
                AppError::duplicate(AccountUseCaseError::AlreadyRegistered.to_string())
            }
            AccountUseCaseError::NotFound => AppError::NotFound("Account not found".to_string()),
            AccountUseCaseError::Repository(e) => {
                error!("Account store error: {}", e);
                AppError::StoreUnavailable
            }
        }
    }
}

impl From<FeedUseCaseError> for AppError {
    fn from(err: FeedUseCaseError) -> Self {
        match err {
            FeedUseCaseError::Repository(e) => {
                error!("Summary store error: {}", e);
                AppError::StoreUnavailable
            }
        }
    }
}
