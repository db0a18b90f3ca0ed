use std::sync::Arc;

use signoff_core::{InMemoryAuditSink, WorkOrderStatus};
use signoff_directory::fixtures::{demo_service, DEMO_APPROVAL_SCRIPT};

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let sink = InMemoryAuditSink::default();
    let service = match demo_service(Arc::new(sink.clone())) {
        Ok(service) => service,
        Err(error) => {
            return CommandResult::failure(
                "demo",
                "chart_validation",
                format!("org chart issue: {error}"),
                2,
            );
        }
    };

    let mut lines = vec!["demo approval script replayed:".to_string()];
    for (work_order, phase, approver) in DEMO_APPROVAL_SCRIPT {
        let outcome = match service.approve_phase(work_order, phase, approver) {
            Ok(outcome) => outcome,
            Err(error) => {
                return CommandResult::failure(
                    "demo",
                    "lookup_failure",
                    format!("script step failed: {error}"),
                    1,
                );
            }
        };

        lines.push(format!(
            "  - {phase} of {work_order} by {approver}: {}",
            outcome.decision.describe()
        ));
        if outcome.decision.is_approved()
            && outcome.work_order_status == WorkOrderStatus::FullyApproved
        {
            lines.push(format!("    all phases of {work_order} are approved"));
        }
    }
    lines.push(format!("audit events recorded: {}", sink.events().len()));

    CommandResult::success("demo", lines.join("\n"))
}
