// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_status::CrawlStatusSnapshot;
use crate::domain::models::summary::{Block, BlockKind, SummaryRecord};
use crate::domain::models::target_account::TargetAccount;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

const UNKNOWN_BAKERY: &str = "Unknown Bakery";
const WIDGET_BAKERY: &str = "Bakery";
const WIDGET_DEFAULT_EXCERPT: &str = "Check the latest posts.";
const WIDGET_DEFAULT_CATEGORY: &str = "News";

/// 公开信息流中的单条摘要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItemDto {
    pub id: Uuid,
    pub bakery_name: String,
    pub instagram_id: String,
    pub shopping_mall_url: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub excerpt: String,
    pub blocks: Vec<Block>,
}

impl From<&SummaryRecord> for FeedItemDto {
    fn from(record: &SummaryRecord) -> Self {
        let account = record.account.as_ref();
        Self {
            id: record.id,
            bakery_name: account
                .map(|a| a.bakery_name.clone())
                .unwrap_or_else(|| UNKNOWN_BAKERY.to_string()),
            instagram_id: account.map(|a| a.instagram_id.clone()).unwrap_or_default(),
            shopping_mall_url: account.and_then(|a| a.shopping_mall_url.clone()),
            updated_at: record.updated_at(),
            excerpt: record.content.excerpt().to_string(),
            blocks: record.content.blocks(),
        }
    }
}

/// 嵌入式小组件条目
///
/// 字段名保持 snake_case，供第三方页面直接读取
#[derive(Debug, Clone, Serialize)]
pub struct WidgetItemDto {
    pub id: Uuid,
    pub bakery_name: String,
    pub excerpt: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub category: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&SummaryRecord> for WidgetItemDto {
    fn from(record: &SummaryRecord) -> Self {
        // The first block doubles as the widget category
        let (kind, category) = match record.content.first_block() {
            Some(block) => (block.kind, block.title),
            None => (BlockKind::Info, WIDGET_DEFAULT_CATEGORY.to_string()),
        };
        let excerpt = match record.content.excerpt() {
            "" => WIDGET_DEFAULT_EXCERPT.to_string(),
            text => text.to_string(),
        };

        Self {
            id: record.id,
            bakery_name: record
                .account
                .as_ref()
                .map(|a| a.bakery_name.clone())
                .unwrap_or_else(|| WIDGET_BAKERY.to_string()),
            excerpt,
            kind: kind.as_str(),
            category,
            updated_at: record.updated_at(),
        }
    }
}

/// 管理后台首页数据
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub accounts: Vec<TargetAccount>,
    pub summaries: Vec<FeedItemDto>,
    pub crawl: CrawlStatusSnapshot,
}
