// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 爬取状态（crawl_status）：全局互斥标记与状态快照
/// - 账号（target_account）：被跟踪的面包店账号
/// - 摘要（summary）：AI 摘要及其内容块
pub mod crawl_status;
pub mod summary;
pub mod target_account;
