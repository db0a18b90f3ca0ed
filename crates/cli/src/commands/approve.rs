use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use signoff_core::InMemoryAuditSink;

use crate::commands::{load_chart, service_from_chart, CommandResult};

pub fn run(
    work_order: &str,
    phase: &str,
    approver: &str,
    chart: Option<&Path>,
) -> CommandResult {
    let chart = match load_chart(chart) {
        Ok(chart) => chart,
        Err(error) => {
            return CommandResult::failure(
                "approve",
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
                "approve",
                "chart_validation",
                format!("org chart issue: {error}"),
                2,
            );
        }
    };

    match service.approve_phase(work_order, phase, approver) {
        Ok(outcome) => CommandResult::success_with_details(
            "approve",
            format!("{phase} of {work_order}: {}", outcome.decision.describe()),
            json!({
                "decision": outcome.decision,
                "phase_status": outcome.phase_status,
                "work_order_status": outcome.work_order_status,
                "shortest_path": outcome.shortest_path,
            }),
        ),
        Err(error) => CommandResult::failure("approve", "lookup_failure", error.to_string(), 1),
    }
}
