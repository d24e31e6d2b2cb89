// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    application::dto::auth_request::{AuthResponseDto, LoginRequestDto},
    config::settings::Settings,
    infrastructure::session_store::{password_matches, SessionStore},
    presentation::{
        errors::AppError,
        middleware::auth_middleware::{session_token, SESSION_COOKIE},
    },
};

/// 管理员登录
///
/// 密码正确时创建会话并下发 `admin_session` Cookie
pub async fn login(
    Extension(sessions): Extension<Arc<SessionStore>>,
    Extension(settings): Extension<Arc<Settings>>,
    payload: Result<Json<LoginRequestDto>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Malformed login request: {}", rejection);
        AppError::invalid("Password is required")
    })?;
    let password = payload.password.unwrap_or_default();
    if password.is_empty() {
        return Err(AppError::invalid("Password is required"));
    }

    let expected = match settings.admin.password.as_deref() {
        Some(expected) if !expected.is_empty() => expected,
        _ => {
            error!("Admin login attempted but no admin password is configured");
            return Err(AppError::Misconfigured(
                "Admin password is not configured".to_string(),
            ));
        }
    };

    if !password_matches(&password, expected) {
        counter!("admin_login_total", "outcome" => "rejected").increment(1);
        warn!("Admin login rejected: wrong password");
        return Err(AppError::AuthInvalid("Invalid password".to_string()));
    }

    let token = sessions.create();
    counter!("admin_login_total", "outcome" => "accepted").increment(1);
    info!("Admin session created");

    let cookie = session_cookie(
        &token,
        sessions.ttl().as_secs(),
        settings.server.secure_cookies,
    );
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponseDto::ok()),
    )
        .into_response())
}

/// 管理员登出，清除会话与 Cookie
pub async fn logout(
    Extension(sessions): Extension<Arc<SessionStore>>,
    Extension(settings): Extension<Arc<Settings>>,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = session_token(&headers) {
        sessions.remove(token);
    }

    let cookie = session_cookie("", 0, settings.server.secure_cookies);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponseDto::ok()),
    )
        .into_response()
}

/// 登录入口：已登录时跳转到管理后台
pub async fn login_page(
    Extension(sessions): Extension<Arc<SessionStore>>,
    headers: HeaderMap,
) -> Response {
    let authenticated = session_token(&headers)
        .map(|token| sessions.validate(token))
        .unwrap_or(false);

    if authenticated {
        Redirect::to("/admin").into_response()
    } else {
        Json(json!({ "login": "POST /auth/login" })).into_response()
    }
}

/// 构造会话 Cookie，`max_age` 为 0 时用于清除
fn session_cookie(token: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
