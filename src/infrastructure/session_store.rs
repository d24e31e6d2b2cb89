// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::Duration;
use uuid::Uuid;

/// 会话令牌
pub type SessionToken = String;

/// 管理员会话
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// 内存会话存储
///
/// 会话在 `ttl` 后失效；进程重启后所有会话丢失，需要重新登录
pub struct SessionStore {
    sessions: DashMap<SessionToken, AdminSession>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 创建会话并返回令牌
    pub fn create(&self) -> SessionToken {
        let token = Uuid::new_v4().simple().to_string();
        let created_at = Utc::now();
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::days(7));
        self.sessions.insert(
            token.clone(),
            AdminSession {
                created_at,
                expires_at: created_at + ttl,
            },
        );
        token
    }

    /// 令牌对应未过期的会话时返回 `true`，过期会话顺带移除
    pub fn validate(&self, token: &str) -> bool {
        let expired = match self.sessions.get(token) {
            Some(session) => session.expires_at <= Utc::now(),
            None => return false,
        };

        if expired {
            self.sessions.remove(token);
            return false;
        }
        true
    }

    /// 删除会话（登出）
    pub fn remove(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// 清理过期会话，返回清理数量
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut purged = 0;
        // Counted in place, concurrent logins may change len() meanwhile
        self.sessions.retain(|_, session| {
            let keep = session.expires_at > now;
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// 比较候选密码与配置密码
///
/// 比较的是两者的 SHA-256 摘要，耗时与密码内容无关
pub fn password_matches(candidate: &str, expected: &str) -> bool {
    let a = Sha256::digest(candidate.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
