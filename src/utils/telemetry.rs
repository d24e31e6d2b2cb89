// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 服务端默认日志过滤
pub const DEFAULT_FILTER: &str = "info,dappang=debug,tower_http=debug";

/// 初始化日志订阅器
///
/// `RUST_LOG` 优先；未设置时使用 `default_filter`。重复初始化时静默忽略。
pub fn init_telemetry(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
