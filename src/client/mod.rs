// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 客户端模块
///
/// - 爬取接口客户端（crawl_api）：登录、触发、状态查询
/// - 轮询器（poller）：触发后轮询状态，完成时刷新数据
pub mod crawl_api;
pub mod poller;

pub use crawl_api::{ClientError, CrawlApi, HttpCrawlApi, TriggerOutcome};
pub use poller::{CrawlPoller, DataRefresher, PollerError, PollerState};
