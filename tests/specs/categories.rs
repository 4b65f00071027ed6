//! Behavioral specs for the categories command.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Lists the built-in categories with weight shares
#[test]
fn lists_builtin_categories() {
    vouch("categories")
        .on("scores")
        .passes()
        .stdout_has(predicates::str::is_match(r"security\s+Security\s+25%").unwrap())
        .stdout_has(predicates::str::is_match(r"integration\s+Integration\s+5%").unwrap())
        .stdout_has("critical")
        .stdout_has("automated");
}

/// > -o json dumps the registry
#[test]
fn categories_json() {
    let run = vouch("categories").on("scores").args(&["-o", "json"]).passes();
    let json = run.json();
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();

    assert_eq!(
        ids,
        [
            "security",
            "performance",
            "reliability",
            "compliance",
            "ux",
            "devops",
            "data",
            "integration"
        ]
    );
}

/// > Custom categories replace the built-in set
#[test]
fn custom_categories_replace_builtin() {
    let temp = default_project();
    temp.config(
        r#"
[env]
required = []

[[category]]
id = "api"
name = "API"
weight = 3.0
critical_path = true

[[category]]
id = "web"
name = "Web"
weight = 1.0
"#,
    );

    vouch("categories")
        .pwd(temp.path())
        .args(&["-o", "markdown"])
        .passes()
        .stdout_has("| API (`api`) | 75% | 0 | yes |")
        .stdout_has("| Web (`web`) | 25% | 0 | no |")
        .stdout_lacks("Security");
}

/// > Duplicate category ids are a config error
#[test]
fn duplicate_category_ids_fail() {
    let temp = default_project();
    temp.config(
        r#"
[[category]]
id = "api"
name = "API"
weight = 1.0

[[category]]
id = "api"
name = "Again"
weight = 1.0
"#,
    );

    vouch("categories")
        .pwd(temp.path())
        .exits(2)
        .stderr_has("duplicate category id `api`");
}
