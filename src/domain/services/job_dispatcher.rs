// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 任务派发错误
#[derive(Error, Debug)]
pub enum DispatchError {
    /// 未配置任务运行器凭据
    #[error("Job runner credentials are not configured")]
    NotConfigured,
    /// 派发请求超时
    #[error("Job dispatch timed out")]
    Timeout,
    /// 任务运行器拒绝了派发请求
    #[error("Job runner responded with {status}")]
    Rejected { status: u16, body: String },
    /// 网络错误
    #[error("Job dispatch transport error: {0}")]
    Transport(String),
}

/// 外部任务派发特质
///
/// 只负责发出派发请求，不等待任务完成
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    /// 是否已配置派发所需的凭据
    fn is_configured(&self) -> bool;

    /// 派发一次爬取任务
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 任务运行器已接受派发
    /// * `Err(DispatchError)` - 派发失败或超时
    async fn dispatch(&self) -> Result<(), DispatchError>;
}
