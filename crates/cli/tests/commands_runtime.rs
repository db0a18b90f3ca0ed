use std::io::Write;

use serde_json::Value;

use signoff_cli::commands::{approve, check, demo, paths};

#[test]
fn demo_replays_the_scripted_sequence() {
    let result = demo::run();
    assert_eq!(result.exit_code, 0, "expected successful demo run");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "demo");
    assert_eq!(payload["status"], "ok");

    let message = payload["message"].as_str().unwrap_or("");
    assert!(message.contains("  - Phase 1 of Work order 1 by jAbram@company.com: approved"));
    assert!(message.contains("  - Phase 2 of Work order 1 by nAgholor@company.com: approved"));
    assert!(message.contains("  - Phase 3 of Work order 1 by bEdwards@company.com: approved"));
    assert!(message.contains("    all phases of Work order 1 are approved"));
    assert!(message.contains("  - Phase 2 of Work order 2 by dCarlson@company.com: approved"));
    assert!(message.contains("  - Phase 3 of Work order 1 by bEdwards@company.com: already approved"));
    assert!(message.contains("audit events recorded: 5"));
}

#[test]
fn approve_grants_moderate_phase_to_direct_manager() {
    let result = approve::run("Work order 1", "Phase 2", "nAgholor@company.com", None);
    assert_eq!(result.exit_code, 0, "expected successful approval");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "approve");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["message"], "Phase 2 of Work order 1: approved");
    assert_eq!(payload["details"]["decision"]["kind"], "approved");
    assert_eq!(payload["details"]["phase_status"], "approved");
    assert_eq!(payload["details"]["work_order_status"], "in_progress");
    assert_eq!(payload["details"]["shortest_path"], serde_json::json!([1, 8, 9]));
}

#[test]
fn approve_rejects_author_on_high_risk_phase() {
    let result = approve::run("Work order 1", "Phase 3", "jAbram@company.com", None);
    assert_eq!(result.exit_code, 0, "a rejection is a decision, not a command failure");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["message"], "Phase 3 of Work order 1: risk-level/approver mismatch");
    assert_eq!(payload["details"]["decision"]["kind"], "rejected");
    assert_eq!(payload["details"]["decision"]["reason"], "risk_mismatch");
    assert_eq!(payload["details"]["phase_status"], "pending");
}

#[test]
fn approve_unknown_email_fails_with_lookup_class() {
    let result = approve::run("Work order 1", "Phase 1", "ghost@company.com", None);
    assert_eq!(result.exit_code, 1, "expected lookup failure code");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "lookup_failure");
}

#[test]
fn approve_accepts_a_chart_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp chart file");
    file.write_all(
        br#"
[[employees]]
id = 1
name = "Ada Author"
email = "ada@company.com"

[[employees]]
id = 2
name = "Rex Root"
email = "rex@company.com"

[[reporting_lines]]
employee = 1
manager = 2

[[work_orders]]
id = 1
name = "Refit"
author = 1

[[work_orders.phases]]
id = 1
name = "Survey"
risk_level = 1
"#,
    )
    .expect("write chart");

    let result = approve::run("Refit", "Survey", "ada@company.com", Some(file.path()));
    assert_eq!(result.exit_code, 0, "expected approval from file-backed chart");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["details"]["decision"]["kind"], "approved");
    assert_eq!(payload["details"]["work_order_status"], "fully_approved");
}

#[test]
fn approve_reports_invalid_chart_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp chart file");
    file.write_all(b"[[reporting_lines]]\nemployee = 1\nmanager = 2\n").expect("write chart");

    let result = approve::run("Refit", "Survey", "ada@company.com", Some(file.path()));
    assert_eq!(result.exit_code, 2, "expected chart validation failure code");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "chart_validation");
}

#[test]
fn paths_reports_shortest_chain() {
    let result = paths::run("jAbram@company.com", None);
    assert_eq!(result.exit_code, 0, "expected successful paths report");

    let payload = parse_payload(&result.output);
    let message = payload["message"].as_str().unwrap_or("");
    assert!(message.contains("approval paths from employee 1 to root 9:"));
    assert!(message.contains("  - 1 -> 8 -> 9"));
    assert!(message.contains("shortest chain of managers to the root: 1 -> 8 -> 9"));
}

#[test]
fn check_demo_chart_is_valid() {
    let result = check::run(None);
    assert_eq!(result.exit_code, 0, "expected demo chart to validate");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "ok");
    let message = payload["message"].as_str().unwrap_or("");
    assert!(message.contains("root is employee 9"));
}

#[test]
fn check_reports_unreachable_employees() {
    let mut file = tempfile::NamedTempFile::new().expect("temp chart file");
    file.write_all(
        br#"
[[employees]]
id = 1
name = "Ada"
email = "ada@company.com"

[[employees]]
id = 2
name = "Rex"
email = "rex@company.com"

[[employees]]
id = 3
name = "Iso Lated"
email = "iso@company.com"

[[reporting_lines]]
employee = 1
manager = 2
"#,
    )
    .expect("write chart");

    let result = check::run(Some(file.path()));
    assert_eq!(result.exit_code, 1, "expected unreachable employees to fail the check");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "unreachable_employees");
    assert!(payload["message"].as_str().unwrap_or("").contains("3"));
}

#[test]
fn check_rejects_rootless_chart() {
    let mut file = tempfile::NamedTempFile::new().expect("temp chart file");
    file.write_all(
        br#"
[[employees]]
id = 1
name = "Ada"
email = "ada@company.com"

[[employees]]
id = 2
name = "Rex"
email = "rex@company.com"

[[reporting_lines]]
employee = 1
manager = 2

[[reporting_lines]]
employee = 2
manager = 1
"#,
    )
    .expect("write chart");

    let result = check::run(Some(file.path()));
    assert_eq!(result.exit_code, 1, "expected rootless chart to fail the check");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "hierarchy_validation");
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output)
        .unwrap_or_else(|error| panic!("invalid JSON payload `{output}`: {error}"))
}
