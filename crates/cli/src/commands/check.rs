use std::path::Path;
use std::sync::Arc;

use signoff_core::InMemoryAuditSink;
use signoff_directory::ApprovalService;

use crate::commands::{load_chart, CommandResult};

pub fn run(chart: Option<&Path>) -> CommandResult {
    let chart = match load_chart(chart) {
        Ok(chart) => chart,
        Err(error) => {
            return CommandResult::failure(
                "check",
                "chart_validation",
                format!("org chart issue: {error}"),
                2,
            );
        }
    };

    let registry = match chart.build_registry() {
        Ok(registry) => registry,
        Err(error) => {
            return CommandResult::failure(
                "check",
                "chart_validation",
                format!("org chart issue: {error}"),
                2,
            );
        }
    };
    let employee_count = registry.len();

    let hierarchy = chart.build_hierarchy();
    let root = match hierarchy.find_root() {
        Ok(root) => root,
        Err(error) => {
            return CommandResult::failure("check", "hierarchy_validation", error.to_string(), 1);
        }
    };

    let store = match chart.build_store() {
        Ok(store) => store,
        Err(error) => {
            return CommandResult::failure(
                "check",
                "chart_validation",
                format!("org chart issue: {error}"),
                2,
            );
        }
    };

    let service = ApprovalService::with_root(
        registry,
        hierarchy,
        store,
        root,
        Arc::new(InMemoryAuditSink::default()),
    );

    let unreachable = service.unreachable_employees();
    if unreachable.is_empty() {
        return CommandResult::success(
            "check",
            format!(
                "org chart valid: root is employee {root}; all {employee_count} employees can reach the root"
            ),
        );
    }

    let ids = unreachable.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    CommandResult::failure(
        "check",
        "unreachable_employees",
        format!("employees with no approval path to root {root}: {ids}"),
        1,
    )
}
