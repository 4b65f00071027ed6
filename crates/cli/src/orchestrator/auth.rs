// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-authenticated browser state per role.
//!
//! Checks load `auth/<role>.json` instead of logging in themselves. The file
//! uses the storage-state shape browser automation tools consume.

use serde::{Deserialize, Serialize};

use super::fixtures::UserFixture;

/// Origin used when no backend URL is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Cookie name carrying the session token.
pub const SESSION_COOKIE: &str = "vouch_session";

/// Saved browser state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageState {
    pub cookies: Vec<Cookie>,
    pub origins: Vec<OriginState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Unix seconds; -1 for a session cookie.
    pub expires: i64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginState {
    pub origin: String,
    pub local_storage: Vec<StorageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub name: String,
    pub value: String,
}

/// Inputs shared by every role's authentication.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext<'a> {
    pub run_id: &'a str,
    /// Backend origin, e.g. `https://api.example.com`.
    pub backend_url: Option<&'a str>,
}

/// Produces storage state for a user.
pub trait Authenticator {
    fn storage_state(&self, user: &UserFixture, ctx: &AuthContext<'_>)
    -> anyhow::Result<StorageState>;
}

/// Offline authenticator: derives a session token from the run id and role.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAuthenticator;

impl Authenticator for TokenAuthenticator {
    fn storage_state(
        &self,
        user: &UserFixture,
        ctx: &AuthContext<'_>,
    ) -> anyhow::Result<StorageState> {
        let origin = Origin::parse(ctx.backend_url.unwrap_or(DEFAULT_ORIGIN))?;
        let token = session_token(ctx.run_id, &user.role);

        Ok(StorageState {
            cookies: vec![Cookie {
                name: SESSION_COOKIE.to_string(),
                value: token.clone(),
                domain: origin.host.clone(),
                path: "/".to_string(),
                expires: -1,
                http_only: true,
                secure: origin.scheme == "https",
                same_site: "Lax".to_string(),
            }],
            origins: vec![OriginState {
                origin: origin.to_string(),
                local_storage: vec![
                    StorageEntry {
                        name: "vouch.role".to_string(),
                        value: user.role.clone(),
                    },
                    StorageEntry {
                        name: "vouch.user".to_string(),
                        value: user.email.clone(),
                    },
                    StorageEntry {
                        name: "vouch.token".to_string(),
                        value: token,
                    },
                ],
            }],
        })
    }
}

/// Deterministic 64-bit FNV-1a token, hex encoded.
pub fn session_token(run_id: &str, role: &str) -> String {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = run_id
        .bytes()
        .chain(std::iter::once(b':'))
        .chain(role.bytes())
        .fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME));
    format!("{hash:016x}")
}

/// Scheme, host and optional port of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    fn parse(url: &str) -> anyhow::Result<Self> {
        let (scheme, rest) = url
            .trim()
            .split_once("://")
            .ok_or_else(|| anyhow::anyhow!("backend URL `{url}` has no scheme"))?;
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let authority = authority.rsplit('@').next().unwrap_or(authority);

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("backend URL `{url}` has an invalid port"))?;
                (host, Some(port))
            }
            None => (authority, None),
        };

        if host.is_empty() {
            anyhow::bail!("backend URL `{url}` has no host");
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            host: host.to_ascii_lowercase(),
            port,
        })
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}://{}:{}", self.scheme, self.host, port),
            None => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
