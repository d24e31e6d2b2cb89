// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

/// 爬取触发响应
#[derive(Debug, Clone, Serialize)]
pub struct TriggerResponseDto {
    pub started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl TriggerResponseDto {
    pub fn started() -> Self {
        Self {
            started: true,
            reason: None,
        }
    }

    pub fn already_running() -> Self {
        Self {
            started: false,
            reason: Some("already_running"),
        }
    }
}

/// 爬取状态重置响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponseDto {
    pub released: bool,
    pub accounts_reset: u64,
}
