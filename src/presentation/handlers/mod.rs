// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器构造对应的用例并把用例错误映射为 `AppError`
pub mod account_handler;
pub mod auth_handler;
pub mod crawl_handler;
pub mod feed_handler;
