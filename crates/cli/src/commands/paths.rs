use std::path::Path;
use std::sync::Arc;

use signoff_core::InMemoryAuditSink;

use crate::commands::{load_chart, render_path, service_from_chart, CommandResult};

pub fn run(employee: &str, chart: Option<&Path>) -> CommandResult {
    let chart = match load_chart(chart) {
        Ok(chart) => chart,
        Err(error) => {
            return CommandResult::failure(
                "paths",
                "chart_validation",
                format!("org chart issue: {error}"),
                2,
            );
        }
    };

    let service = match service_from_chart(&chart, Arc::new(InMemoryAuditSink::default())) {
        Ok(service) => service,
        Err(error) => {
            return CommandResult::failure(
                "paths",
                "chart_validation",
                format!("org chart issue: {error}"),
                2,
            );
        }
    };

    match service.approval_paths(employee) {
        Ok(report) => {
            let mut lines =
                vec![format!("approval paths from employee {} to root {}:", report.employee, report.root)];
            if report.paths.is_empty() {
                lines.push("  (none - employee has no path to the hierarchy root)".to_string());
            }
            for path in &report.paths {
                lines.push(format!("  - {}", render_path(path)));
            }
            if let Some(shortest) = &report.shortest {
                lines.push(format!(
                    "shortest chain of managers to the root: {}",
                    render_path(shortest)
                ));
            }
            CommandResult::success("paths", lines.join("\n"))
        }
        Err(error) => CommandResult::failure("paths", "lookup_failure", error.to_string(), 1),
    }
}
