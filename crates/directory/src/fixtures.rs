use std::sync::Arc;

use signoff_core::AuditSink;

use crate::config::{ConfigError, EmployeeSpec, OrgChart, PhaseSpec, ReportingLine, WorkOrderSpec};
use crate::service::ApprovalService;

/// The sample organization: 9 employees with the CEO (id 9) at the root.
const DEMO_EMPLOYEES: &[(u32, &str, &str, &str)] = &[
    (1, "Johnathan Abram", "jAbram@company.com", "R&D Associate I"),
    (2, "Nelson Agholor", "nAgholor@company.com", "R&D Associate II"),
    (3, "Devontae Booker", "dBooker@company.com", "Mechanic Engineer I"),
    (4, "Daniel Carlson", "dCarlson@company.com", "Mechanic Engineer II"),
    (5, "Derek Carrier", "dCarrier@company.com", "Senior Mechanic Engineer"),
    (6, "Maliek Collins", "mCollins@company.com", "Production Manager"),
    (7, "Bryan Edwards", "bEdwards@company.com", "Director of Operation"),
    (8, "Isaiah Johnson", "iJohnson@company.com", "Lead Engineer"),
    (9, "Aaron Rodger", "aRodgerg@company.com", "CEO"),
];

const DEMO_REPORTING_LINES: &[(u32, u32)] =
    &[(7, 9), (6, 7), (8, 6), (8, 9), (2, 8), (1, 2), (1, 8), (5, 8), (4, 5), (3, 4)];

struct DemoWorkOrder {
    id: u32,
    name: &'static str,
    author: u32,
    phases: &'static [(u32, &'static str, u8)],
}

const DEMO_WORK_ORDERS: &[DemoWorkOrder] = &[
    DemoWorkOrder {
        id: 1,
        name: "Work order 1",
        author: 1,
        phases: &[(1, "Phase 1", 1), (2, "Phase 2", 2), (3, "Phase 3", 3)],
    },
    DemoWorkOrder {
        id: 2,
        name: "Work order 2",
        author: 3,
        phases: &[(4, "Phase 1", 1), (5, "Phase 2", 2), (6, "Phase 3", 3)],
    },
    DemoWorkOrder {
        id: 3,
        name: "Work order 3",
        author: 5,
        phases: &[(7, "Phase 1", 1), (8, "Phase 2", 2), (9, "Phase 3", 3)],
    },
    DemoWorkOrder {
        id: 4,
        name: "Work order 4",
        author: 8,
        phases: &[(10, "Phase 1", 1), (11, "Phase 2", 2), (12, "Phase 3", 3)],
    },
    DemoWorkOrder { id: 5, name: "Work order 5", author: 6, phases: &[(13, "Phase 1", 1)] },
];

/// The scripted approval sequence the demo replays, in order:
/// (work order, phase, approver email).
pub const DEMO_APPROVAL_SCRIPT: &[(&str, &str, &str)] = &[
    ("Work order 1", "Phase 1", "jAbram@company.com"),
    ("Work order 1", "Phase 2", "nAgholor@company.com"),
    ("Work order 1", "Phase 3", "bEdwards@company.com"),
    ("Work order 2", "Phase 2", "dCarlson@company.com"),
    ("Work order 1", "Phase 3", "bEdwards@company.com"),
];

pub fn demo_chart() -> OrgChart {
    OrgChart {
        employees: DEMO_EMPLOYEES
            .iter()
            .map(|(id, name, email, title)| EmployeeSpec {
                id: *id,
                name: (*name).to_string(),
                email: (*email).to_string(),
                title: (*title).to_string(),
            })
            .collect(),
        reporting_lines: DEMO_REPORTING_LINES
            .iter()
            .map(|(employee, manager)| ReportingLine { employee: *employee, manager: *manager })
            .collect(),
        work_orders: DEMO_WORK_ORDERS
            .iter()
            .map(|order| WorkOrderSpec {
                id: order.id,
                name: order.name.to_string(),
                author: order.author,
                phases: order
                    .phases
                    .iter()
                    .map(|(id, name, risk_level)| PhaseSpec {
                        id: *id,
                        name: (*name).to_string(),
                        risk_level: *risk_level,
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub fn demo_service(sink: Arc<dyn AuditSink>) -> Result<ApprovalService, ConfigError> {
    let chart = demo_chart();
    let registry = chart.build_registry()?;
    let hierarchy = chart.build_hierarchy();
    let store = chart.build_store()?;
    ApprovalService::new(registry, hierarchy, store, sink).map_err(ConfigError::Directory)
}
