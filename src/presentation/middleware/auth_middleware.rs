// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::session_store::SessionStore;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "admin_session";

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 会话存储
    pub sessions: Arc<SessionStore>,
}

/// 认证中间件
///
/// 校验 `admin_session` Cookie 对应的会话。未认证时浏览器请求重定向到登录页，
/// 其余请求返回 401，处理器不会被调用。
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
pub async fn auth_middleware(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let authenticated = session_token(req.headers())
        .map(|token| state.sessions.validate(token))
        .unwrap_or(false);

    if authenticated {
        return next.run(req).await;
    }

    debug!("Rejected unauthenticated request to {}", req.uri().path());
    if wants_html(req.headers()) {
        Redirect::to("/login").into_response()
    } else {
        AppError::AuthRequired.into_response()
    }
}

/// 从 `Cookie` 头中取出会话令牌
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}
