pub mod audit;
pub mod authorize;
pub mod classify;
pub mod domain;
pub mod errors;
pub mod hierarchy;

pub use audit::{ApprovalEvent, AuditSink, InMemoryAuditSink};
pub use authorize::{ApprovalPolicy, Decision, NoOpReason, RejectionReason};
pub use classify::{classify, Classification};
pub use domain::employee::EmployeeId;
pub use domain::work_order::{
    Phase, PhaseId, PhaseStatus, RiskLevel, WorkOrder, WorkOrderId, WorkOrderStatus,
};
pub use errors::HierarchyError;
pub use hierarchy::OrgHierarchy;
