// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于 SeaORM 的领域仓库接口实现
pub mod crawl_status_repo_impl;
pub mod summary_repo_impl;
pub mod target_account_repo_impl;
