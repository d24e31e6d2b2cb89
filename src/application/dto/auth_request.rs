// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 管理员登录请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequestDto {
    pub password: Option<String>,
}

/// 登录/登出响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResponseDto {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
