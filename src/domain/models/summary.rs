// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::target_account::TargetAccount;

/// 摘要成功状态值
pub const SUMMARY_STATUS_SUCCESS: &str = "success";

/// 无法解析的摘要回退块的标题
pub const FALLBACK_BLOCK_TITLE: &str = "AI summary";

/// AI 摘要记录
///
/// 由外部摘要任务写入，本服务只读。`account` 为关联的账号（账号被删除前总是存在）。
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    pub id: Uuid,
    pub target_account_id: Uuid,
    pub content: SummaryContent,
    /// 生成状态，成功时为 `success`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub account: Option<TargetAccount>,
}

impl SummaryRecord {
    pub fn is_success(&self) -> bool {
        self.status == SUMMARY_STATUS_SUCCESS
    }

    /// 展示用的更新时间：优先账号的最近抓取时间，否则为摘要创建时间
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.account
            .as_ref()
            .and_then(|a| a.last_scraped_at)
            .unwrap_or(self.created_at)
    }
}

/// 摘要内容
///
/// 存储层中的摘要可能是 JSON 对象、包含 JSON 的字符串，或者任意文本。
/// 解码为带显式回退分支的标签联合。
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryContent {
    /// 结构化摘要
    Structured(StructuredSummary),
    /// 无法解析的原始文本
    Unparsed(String),
}

/// 结构化摘要
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StructuredSummary {
    pub excerpt: String,
    pub blocks: Vec<Block>,
}

#[derive(Deserialize)]
struct RawSummary {
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    blocks: Option<Vec<Block>>,
}

impl From<RawSummary> for StructuredSummary {
    fn from(raw: RawSummary) -> Self {
        Self {
            excerpt: raw.excerpt.unwrap_or_default(),
            blocks: raw.blocks.unwrap_or_default(),
        }
    }
}

impl SummaryContent {
    /// 解码存储层中的摘要值
    pub fn decode(raw: &Value) -> Self {
        match raw {
            Value::Null => SummaryContent::Structured(StructuredSummary::default()),
            Value::Object(_) => match serde_json::from_value::<RawSummary>(raw.clone()) {
                Ok(parsed) => SummaryContent::Structured(parsed.into()),
                Err(_) => SummaryContent::Unparsed(raw.to_string()),
            },
            Value::String(text) => match serde_json::from_str::<RawSummary>(text) {
                Ok(parsed) => SummaryContent::Structured(parsed.into()),
                Err(_) => SummaryContent::Unparsed(text.clone()),
            },
            other => SummaryContent::Unparsed(other.to_string()),
        }
    }

    pub fn excerpt(&self) -> &str {
        match self {
            SummaryContent::Structured(s) => &s.excerpt,
            SummaryContent::Unparsed(_) => "",
        }
    }

    /// 展示用的内容块，原始文本渲染为单个 `info` 块
    pub fn blocks(&self) -> Vec<Block> {
        match self {
            SummaryContent::Structured(s) => s.blocks.clone(),
            SummaryContent::Unparsed(text) => vec![Block {
                kind: BlockKind::Info,
                title: FALLBACK_BLOCK_TITLE.to_string(),
                body: BlockBody::Text(text.clone()),
            }],
        }
    }

    pub fn first_block(&self) -> Option<Block> {
        self.blocks().into_iter().next()
    }
}

/// 内容块类别
///
/// 未知类别按 `info` 处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    News,
    Event,
    Sale,
    Holiday,
    #[default]
    #[serde(other)]
    Info,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::News => "news",
            BlockKind::Event => "event",
            BlockKind::Sale => "sale",
            BlockKind::Holiday => "holiday",
            BlockKind::Info => "info",
        }
    }
}

/// 内容块：列表项或自由文本
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Items(Vec<String>),
    Text(String),
}

/// 分类后的摘要内容块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub kind: BlockKind,
    pub title: String,
    pub body: BlockBody,
}

#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    kind: BlockKind,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let body = match (raw.items, raw.text) {
            (Some(items), _) if !items.is_empty() => BlockBody::Items(items),
            (_, Some(text)) => BlockBody::Text(text),
            (items, None) => BlockBody::Items(items.unwrap_or_default()),
        };
        Self {
            kind: raw.kind,
            title: raw.title.unwrap_or_default(),
            body,
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let (items, text) = match block.body {
            BlockBody::Items(items) => (Some(items), None),
            BlockBody::Text(text) => (None, Some(text)),
        };
        Self {
            kind: block.kind,
            title: Some(block.title),
            items,
            text,
        }
    }
}
