//! End-to-end pipeline tests: a stub linter executable feeds the invoker,
//! its violations flow through translation into the action registry, and
//! fix lookups come back by range intersection.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use mandolin_core::{ActionRegistry, Range, translate};
use mandolin_toolchain::{JSON_FLAG, RULES_FLAG, invoke_lint};

const DOC: &str = "file:///ws/src/main.luau";

fn stub_linter(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("lute");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

const BASE_REPORT: &str = r#"[{"range":{"start":{"line":0,"character":10},"end":{"line":0,"character":11}},"severity":1,"code":"divide_by_zero","source":"lute lint","message":"division by zero","suggestedfix":{"fix":"1","range":{"start":{"line":0,"character":8},"end":{"line":0,"character":13}}}}]"#;

const RULE_REPORT: &str = r#"[{"range":{"start":{"line":3,"character":0},"end":{"line":3,"character":4}},"severity":2,"code":"custom_rule","source":"lute lint","message":"custom rule hit"}]"#;

/// Emits the base report normally and the rule report when `-r` is present,
/// standing in for the two rule sources of one lint cycle.
fn two_source_linter(dir: &Path) -> PathBuf {
    stub_linter(
        dir,
        &format!(
            r#"case "$*" in
  *" -r "*) echo '{RULE_REPORT}' ;;
  *) echo '{BASE_REPORT}' ;;
esac"#
        ),
    )
}

#[tokio::test]
async fn fix_is_discoverable_at_the_violation_range() {
    let dir = tempfile::tempdir().unwrap();
    let linter = stub_linter(dir.path(), &format!("echo '{BASE_REPORT}'"));

    let violations = invoke_lint(&linter, &[JSON_FLAG.to_string()], "local x = 1/0", None).await;
    assert_eq!(violations.len(), 1);

    let registry = ActionRegistry::new();
    let mut actions = Vec::new();
    for violation in violations {
        let (_, action) = translate(violation);
        actions.extend(action);
    }
    registry.publish(DOC, actions);

    // A query at exactly the violation's range finds the fix...
    let hits = registry.query(DOC, Range::from_coords(0, 10, 0, 11));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].edit.new_text, "1");
    // ...even though the edit's own span differs from the anchor.
    assert_eq!(hits[0].edit.range, Range::from_coords(0, 8, 0, 13));

    // A disjoint query finds nothing.
    assert!(registry.query(DOC, Range::from_coords(9, 0, 9, 5)).is_empty());
}

#[tokio::test]
async fn both_rule_sources_concatenate_base_first() {
    let dir = tempfile::tempdir().unwrap();
    let linter = two_source_linter(dir.path());
    let text = "local x = 1/0";

    let mut violations = invoke_lint(&linter, &[JSON_FLAG.to_string()], text, None).await;
    violations.extend(
        invoke_lint(
            &linter,
            &[
                JSON_FLAG.to_string(),
                RULES_FLAG.to_string(),
                "/ws/rules.luau".to_string(),
            ],
            text,
            None,
        )
        .await,
    );

    let codes: Vec<_> = violations.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, ["divide_by_zero", "custom_rule"]);
}

#[tokio::test]
async fn failing_rule_source_leaves_the_other_intact() {
    let dir = tempfile::tempdir().unwrap();
    // Succeeds for the base call, dies when a custom rule file is passed.
    let linter = stub_linter(
        dir.path(),
        &format!(
            r#"case "$*" in
  *" -r "*) echo 'bad rules file' >&2; exit 1 ;;
  *) echo '{BASE_REPORT}' ;;
esac"#
        ),
    );
    let text = "local x = 1/0";

    let mut violations = invoke_lint(&linter, &[JSON_FLAG.to_string()], text, None).await;
    violations.extend(
        invoke_lint(
            &linter,
            &[
                JSON_FLAG.to_string(),
                RULES_FLAG.to_string(),
                "/ws/broken.luau".to_string(),
            ],
            text,
            None,
        )
        .await,
    );

    let codes: Vec<_> = violations.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, ["divide_by_zero"]);
}

#[tokio::test]
async fn republish_fully_supersedes_previous_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let linter = two_source_linter(dir.path());
    let registry = ActionRegistry::new();

    // First cycle: base report with its fix.
    let violations = invoke_lint(&linter, &[JSON_FLAG.to_string()], "x", None).await;
    let actions: Vec<_> = violations
        .into_iter()
        .filter_map(|v| translate(v).1)
        .collect();
    assert_eq!(actions.len(), 1);
    registry.publish(DOC, actions);

    // Second cycle: the rule report, which carries no fix.
    let violations = invoke_lint(
        &linter,
        &[
            JSON_FLAG.to_string(),
            RULES_FLAG.to_string(),
            "/ws/rules.luau".to_string(),
        ],
        "x",
        None,
    )
    .await;
    let actions: Vec<_> = violations
        .into_iter()
        .filter_map(|v| translate(v).1)
        .collect();
    registry.publish(DOC, actions);

    // The first cycle's fix would intersect this query; only the second
    // publish's (empty) contents are visible.
    assert!(registry.query(DOC, Range::from_coords(0, 0, 9, 0)).is_empty());
}

#[tokio::test]
async fn malformed_batch_yields_no_violations() {
    let dir = tempfile::tempdir().unwrap();
    // Missing required `message` on the only record: the batch fails as a
    // unit and the invocation degrades to an empty report.
    let linter = stub_linter(
        dir.path(),
        r#"echo '[{"range":{"start":{"line":0,"character":0},"end":{"line":0,"character":1}},"severity":1,"code":"a","source":"lute lint"}]'"#,
    );

    let violations = invoke_lint(&linter, &[JSON_FLAG.to_string()], "x", None).await;
    assert!(violations.is_empty());
}
