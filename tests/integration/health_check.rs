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

use super::helpers::create_test_app;
use axum::http::StatusCode;

/// 健康检查测试
///
/// 健康检查与版本端点无需认证
#[tokio::test]
async fn health_check_works() {
    let app = create_test_app().await;

    assert_eq!(app.get("/health", None).await.status(), StatusCode::OK);
    assert_eq!(app.get("/version", None).await.status(), StatusCode::OK);
}

/// 未知路径返回 404 而不是 401
#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = create_test_app().await;
    assert_eq!(
        app.get("/does-not-exist", None).await.status(),
        StatusCode::NOT_FOUND
    );
}
