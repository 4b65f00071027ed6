// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic test data written before a run.
//!
//! Checks read `fixtures/users.json` and `fixtures/scenarios.json`. The same
//! inputs always produce byte-identical files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const USERS_FILE: &str = "users.json";
pub const SCENARIOS_FILE: &str = "scenarios.json";

/// Email domain for synthetic accounts.
const EMAIL_DOMAIN: &str = "vouch.test";

/// Roles provisioned for every run.
pub const ROLES: &[&str] = &["admin", "manager", "user", "viewer"];

/// A synthetic account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFixture {
    pub role: String,
    pub name: String,
    pub email: String,
    /// Placeholder credential; real secrets never land in fixtures.
    pub password: String,
    pub permissions: Vec<String>,
}

impl UserFixture {
    fn for_role(role: &str) -> Self {
        let permissions: &[&str] = match role {
            "admin" => &[
                "read",
                "write",
                "delete",
                "manage_users",
                "manage_settings",
            ],
            "manager" => &["read", "write", "delete", "manage_team"],
            "user" => &["read", "write"],
            _ => &["read"],
        };

        let mut name = role.to_string();
        if let Some(first) = name.get_mut(0..1) {
            first.make_ascii_uppercase();
        }

        Self {
            role: role.to_string(),
            name: format!("{} Tester", name),
            email: format!("{}@{}", role, EMAIL_DOMAIN),
            password: format!("vouch-{}-password", role),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Load-test profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadProfile {
    pub name: String,
    pub virtual_users: u32,
    pub ramp_up_secs: u32,
    pub duration_secs: u32,
}

impl LoadProfile {
    fn new(name: &str, virtual_users: u32, ramp_up_secs: u32, duration_secs: u32) -> Self {
        Self {
            name: name.to_string(),
            virtual_users,
            ramp_up_secs,
            duration_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    SqlInjection,
    Xss,
    PathTraversal,
    CommandInjection,
    TemplateInjection,
}

/// Known-malicious input for injection checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaliciousPayload {
    pub kind: PayloadKind,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleTask {
    pub title: String,
    pub priority: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleGoal {
    pub title: String,
    pub target: u32,
    pub progress: u32,
}

/// Scenario data shared by checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenarios {
    pub load_profiles: Vec<LoadProfile>,
    pub malicious_payloads: Vec<MaliciousPayload>,
    pub sample_tasks: Vec<SampleTask>,
    pub sample_goals: Vec<SampleGoal>,
}

const PAYLOADS: &[(PayloadKind, &str)] = &[
    (PayloadKind::SqlInjection, "' OR '1'='1"),
    (PayloadKind::SqlInjection, "'; DROP TABLE users; --"),
    (PayloadKind::SqlInjection, "1 UNION SELECT NULL, version() --"),
    (PayloadKind::Xss, "<script>alert('xss')</script>"),
    (PayloadKind::Xss, "<img src=x onerror=alert(1)>"),
    (PayloadKind::Xss, "javascript:alert(document.cookie)"),
    (PayloadKind::PathTraversal, "../../../etc/passwd"),
    (PayloadKind::PathTraversal, "..\\..\\..\\windows\\win.ini"),
    (PayloadKind::PathTraversal, "%2e%2e%2f%2e%2e%2fetc%2fpasswd"),
    (PayloadKind::CommandInjection, "; cat /etc/passwd"),
    (PayloadKind::CommandInjection, "| whoami"),
    (PayloadKind::CommandInjection, "$(id)"),
    (PayloadKind::TemplateInjection, "{{7*7}}"),
    (PayloadKind::TemplateInjection, "${7*7}"),
    (PayloadKind::TemplateInjection, "<%= 7*7 %>"),
];

impl Scenarios {
    fn standard() -> Self {
        Self {
            load_profiles: vec![
                LoadProfile::new("smoke", 1, 0, 60),
                LoadProfile::new("load", 50, 60, 600),
                LoadProfile::new("stress", 200, 120, 900),
                LoadProfile::new("spike", 500, 10, 120),
            ],
            malicious_payloads: PAYLOADS
                .iter()
                .map(|&(kind, payload)| MaliciousPayload {
                    kind,
                    payload: payload.to_string(),
                })
                .collect(),
            sample_tasks: [
                ("Prepare release notes", "high", "todo"),
                ("Review access logs", "medium", "in_progress"),
                ("Archive old projects", "low", "done"),
            ]
            .iter()
            .map(|&(title, priority, status)| SampleTask {
                title: title.to_string(),
                priority: priority.to_string(),
                status: status.to_string(),
            })
            .collect(),
            sample_goals: vec![
                SampleGoal {
                    title: "Ship onboarding revamp".to_string(),
                    target: 100,
                    progress: 40,
                },
                SampleGoal {
                    title: "Reduce p95 latency".to_string(),
                    target: 300,
                    progress: 0,
                },
            ],
        }
    }
}

/// Users and scenarios for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSet {
    pub users: Vec<UserFixture>,
    pub scenarios: Scenarios,
}

impl FixtureSet {
    pub fn generate() -> Self {
        Self {
            users: ROLES.iter().map(|r| UserFixture::for_role(r)).collect(),
            scenarios: Scenarios::standard(),
        }
    }

    /// Write `users.json` and `scenarios.json` into `dir`.
    pub fn write(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        write_json(&dir.join(USERS_FILE), &self.users)?;
        write_json(&dir.join(SCENARIOS_FILE), &self.scenarios)?;
        Ok(())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::Fixture {
        message: format!("{}: {}", path.display(), e),
    })?;
    std::fs::write(path, json + "\n").map_err(|e| Error::io(path, e))
}

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;
