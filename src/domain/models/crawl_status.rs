// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 全局爬取状态记录的固定主键
pub const GLOBAL_STATUS_ID: &str = "global";

/// 全局爬取标记
///
/// 单行记录，作为触发端点与外部任务之间的粗粒度互斥信号。
/// 由触发端点置为 `true`，由外部任务、重置操作或失效检查置回 `false`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlFlag {
    /// 是否有爬取任务正在执行
    pub is_crawling: bool,
    /// 标记最后一次变更的时间
    pub updated_at: DateTime<Utc>,
}

/// 状态查询结果
///
/// 缺失的状态记录视为空闲，缺失的抓取时间为 `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStatusSnapshot {
    pub is_crawling: bool,
    pub last_scraped_at: Option<DateTime<Utc>>,
}

impl CrawlStatusSnapshot {
    pub fn new(flag: Option<CrawlFlag>, last_scraped_at: Option<DateTime<Utc>>) -> Self {
        Self {
            is_crawling: flag.map(|f| f.is_crawling).unwrap_or(false),
            last_scraped_at,
        }
    }
}
