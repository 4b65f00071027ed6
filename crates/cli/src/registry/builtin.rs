// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in production readiness categories.

use super::TestKind::{Automated, Hybrid, Manual};
use super::{TestCategory, TestDefinition};

pub(super) fn categories() -> Vec<TestCategory> {
    vec![
        security(),
        performance(),
        reliability(),
        compliance(),
        ux(),
        devops(),
        data(),
        integration(),
    ]
}

fn security() -> TestCategory {
    TestCategory::new("security", "Security", 25.0)
        .with_description("Authentication, authorization, input handling and transport security")
        .critical()
        .with_tests(vec![
            TestDefinition::new("sec-auth-bypass", "Authentication bypass", Automated)
                .with_description("Protected routes reject unauthenticated and forged sessions")
                .with_duration(300)
                .with_criteria("Every protected endpoint returns 401/403 without a valid session")
                .with_tags(&["auth", "owasp"]),
            TestDefinition::new("sec-injection", "Injection resistance", Automated)
                .with_description("SQL, script, and command payloads are neutralized")
                .with_duration(600)
                .with_criteria("No payload from the malicious fixture list is executed or reflected")
                .with_tags(&["owasp", "injection"]),
            TestDefinition::new("sec-rbac", "Role-based access control", Automated)
                .with_description("Each role can reach exactly its permitted resources")
                .with_duration(420)
                .with_criteria("Permission matrix matches the role fixtures")
                .with_dependencies(&["sec-auth-bypass"])
                .with_tags(&["auth"]),
            TestDefinition::new("sec-headers", "Security headers and TLS", Automated)
                .with_duration(60)
                .with_criteria("HSTS, CSP and X-Content-Type-Options present on all responses")
                .with_tags(&["transport"]),
            TestDefinition::new("sec-pentest", "Penetration test review", Manual)
                .with_duration(14_400)
                .with_criteria("No open high or critical findings")
                .with_tags(&["audit"]),
        ])
}

fn performance() -> TestCategory {
    TestCategory::new("performance", "Performance", 15.0)
        .with_description("Latency, throughput and resource use under load")
        .with_tests(vec![
            TestDefinition::new("perf-page-load", "Page load budget", Automated)
                .with_duration(180)
                .with_criteria("Largest contentful paint under 2.5s on the dashboard")
                .with_tags(&["web-vitals"]),
            TestDefinition::new("perf-api-latency", "API latency", Automated)
                .with_duration(300)
                .with_criteria("p95 under 300ms for read endpoints at nominal load")
                .with_tags(&["api"]),
            TestDefinition::new("perf-load", "Sustained load", Automated)
                .with_duration(1_800)
                .with_criteria("Error rate under 1% at the `load` profile")
                .with_dependencies(&["perf-api-latency"])
                .with_tags(&["load"]),
            TestDefinition::new("perf-spike", "Traffic spike", Hybrid)
                .with_duration(900)
                .with_criteria("Service recovers within the RTO after the `spike` profile")
                .with_dependencies(&["perf-load"])
                .with_tags(&["load"]),
        ])
}

fn reliability() -> TestCategory {
    TestCategory::new("reliability", "Reliability", 15.0)
        .with_description("Fault tolerance, backups and disaster recovery")
        .critical()
        .with_tests(vec![
            TestDefinition::new("rel-health", "Health endpoints", Automated)
                .with_duration(30)
                .with_criteria("Liveness and readiness endpoints report healthy")
                .with_tags(&["health"]),
            TestDefinition::new("rel-auto-recovery", "Automatic recovery", Automated)
                .with_description("Service returns to healthy after a forced restart")
                .with_duration(600)
                .with_criteria("Healthy again within the recovery time objective")
                .with_dependencies(&["rel-health"])
                .with_tags(&["dr", "rto"]),
            TestDefinition::new("rel-backup-restore", "Backup and restore", Hybrid)
                .with_duration(3_600)
                .with_criteria("Restore completes with data loss inside the RPO window")
                .with_tags(&["dr", "rpo"]),
            TestDefinition::new("rel-graceful-degradation", "Graceful degradation", Automated)
                .with_duration(420)
                .with_criteria("Non-critical dependency outages do not fail core flows")
                .with_tags(&["resilience"]),
        ])
}

fn compliance() -> TestCategory {
    TestCategory::new("compliance", "Compliance", 10.0)
        .with_description("Privacy, audit logging and accessibility obligations")
        .with_tests(vec![
            TestDefinition::new("comp-gdpr-export", "Personal data export", Automated)
                .with_duration(240)
                .with_criteria("A user can export all of their data")
                .with_tags(&["gdpr"]),
            TestDefinition::new("comp-gdpr-erasure", "Right to erasure", Automated)
                .with_duration(240)
                .with_criteria("Deleted accounts leave no personal data behind")
                .with_tags(&["gdpr"]),
            TestDefinition::new("comp-audit-log", "Audit trail", Hybrid)
                .with_duration(600)
                .with_criteria("Privileged actions are logged with actor and timestamp")
                .with_tags(&["audit"]),
            TestDefinition::new("comp-wcag", "WCAG 2.1 AA", Manual)
                .with_duration(7_200)
                .with_criteria("No AA violations on primary flows")
                .with_tags(&["a11y"]),
        ])
}

fn ux() -> TestCategory {
    TestCategory::new("ux", "User Experience", 10.0)
        .with_description("Primary user journeys across devices")
        .with_tests(vec![
            TestDefinition::new("ux-onboarding", "Onboarding flow", Automated)
                .with_duration(180)
                .with_criteria("New user reaches the dashboard without errors")
                .with_tags(&["journey"]),
            TestDefinition::new("ux-task-crud", "Task lifecycle", Automated)
                .with_duration(240)
                .with_criteria("Create, edit, complete and delete a task")
                .with_tags(&["journey"]),
            TestDefinition::new("ux-responsive", "Responsive layout", Automated)
                .with_duration(300)
                .with_criteria("No layout overflow at mobile, tablet and desktop widths")
                .with_tags(&["layout"]),
            TestDefinition::new("ux-review", "Usability review", Manual)
                .with_duration(3_600)
                .with_criteria("Sign-off from design review")
                .with_tags(&["review"]),
        ])
}

fn devops() -> TestCategory {
    TestCategory::new("devops", "DevOps", 10.0)
        .with_description("Deployment, rollback and observability")
        .with_tests(vec![
            TestDefinition::new("ops-deploy", "Zero-downtime deploy", Hybrid)
                .with_duration(900)
                .with_criteria("No failed requests during a rolling deploy")
                .with_tags(&["deploy"]),
            TestDefinition::new("ops-rollback", "Rollback", Hybrid)
                .with_duration(900)
                .with_criteria("Previous release restored within 10 minutes")
                .with_dependencies(&["ops-deploy"])
                .with_tags(&["deploy"]),
            TestDefinition::new("ops-monitoring", "Monitoring and alerting", Automated)
                .with_duration(120)
                .with_criteria("Error-rate alert fires for an injected failure")
                .with_tags(&["observability"]),
        ])
}

fn data() -> TestCategory {
    TestCategory::new("data", "Data Integrity", 10.0)
        .with_description("Schema, migrations and consistency of stored data")
        .critical()
        .with_tests(vec![
            TestDefinition::new("data-migrations", "Migrations apply cleanly", Automated)
                .with_duration(120)
                .with_criteria("All migrations apply to an empty and a current database")
                .with_tags(&["schema"]),
            TestDefinition::new("data-constraints", "Constraint enforcement", Automated)
                .with_duration(180)
                .with_criteria("Invalid writes are rejected by the database")
                .with_tags(&["schema"]),
            TestDefinition::new("data-row-security", "Row-level security", Automated)
                .with_duration(300)
                .with_criteria("Users can only read and write their own rows")
                .with_dependencies(&["data-migrations"])
                .with_tags(&["rls", "auth"]),
        ])
}

fn integration() -> TestCategory {
    TestCategory::new("integration", "Integration", 5.0)
        .with_description("Third-party services and public API contracts")
        .with_tests(vec![
            TestDefinition::new("int-api-contract", "Public API contract", Automated)
                .with_duration(240)
                .with_criteria("Responses match the published schema")
                .with_tags(&["api"]),
            TestDefinition::new("int-api-keys", "API key lifecycle", Automated)
                .with_duration(180)
                .with_criteria("Keys can be issued, used, rotated and revoked")
                .with_tags(&["api", "auth"]),
            TestDefinition::new("int-sso", "Single sign-on", Hybrid)
                .with_duration(600)
                .with_criteria("SSO login succeeds for each configured provider")
                .with_tags(&["auth"]),
        ])
}
