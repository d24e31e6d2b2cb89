// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 后台周期任务
pub mod stale_crawl_worker;

pub use stale_crawl_worker::StaleCrawlWorker;
