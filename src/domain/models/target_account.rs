// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 被跟踪的社交媒体账号
///
/// 每个面包店对应一行。`last_scraped_at` 由外部抓取任务更新，本服务只读。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAccount {
    pub id: Uuid,
    /// 面包店显示名称
    pub bakery_name: String,
    /// Instagram 账号（不含 `@`）
    pub instagram_id: String,
    pub category: Option<String>,
    /// 线上商店地址
    pub shopping_mall_url: Option<String>,
    pub status: AccountStatus,
    /// 最近一次成功抓取的时间
    pub last_scraped_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TargetAccount {
    /// 规范化账号句柄，去掉前导 `@` 和首尾空白
    pub fn normalize_handle(raw: &str) -> String {
        raw.trim().trim_start_matches('@').trim().to_string()
    }
}

/// 账号状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// 正常跟踪
    #[default]
    Active,
    /// 抓取进行中
    Syncing,
    /// 已暂停
    Paused,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Syncing => write!(f, "syncing"),
            AccountStatus::Paused => write!(f, "paused"),
        }
    }
}

impl FromStr for AccountStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "syncing" => Ok(AccountStatus::Syncing),
            "paused" => Ok(AccountStatus::Paused),
            _ => Err(()),
        }
    }
}
