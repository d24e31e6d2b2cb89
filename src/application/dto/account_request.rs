// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::target_account::AccountStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 注册账号请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountDto {
    #[validate(length(min = 1, max = 100, message = "bakeryName is required"))]
    pub bakery_name: String,
    #[validate(length(min = 1, max = 64, message = "instagramId is required"))]
    pub instagram_id: String,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(url(message = "shoppingMallUrl must be a valid URL"))]
    pub shopping_mall_url: Option<String>,
}

/// 编辑账号请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountDto {
    #[validate(length(min = 1, max = 100, message = "bakeryName is required"))]
    pub bakery_name: String,
    #[validate(length(min = 1, max = 64, message = "instagramId is required"))]
    pub instagram_id: String,
    #[validate(url(message = "shoppingMallUrl must be a valid URL"))]
    pub shopping_mall_url: Option<String>,
    pub status: Option<AccountStatus>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RegisterAccountDto {
    /// 表单中的空字符串视为未填写
    pub fn normalized(self) -> Self {
        Self {
            category: blank_to_none(self.category),
            shopping_mall_url: blank_to_none(self.shopping_mall_url),
            ..self
        }
    }
}

impl UpdateAccountDto {
    pub fn normalized(self) -> Self {
        Self {
            shopping_mall_url: blank_to_none(self.shopping_mall_url),
            ..self
        }
    }
}
