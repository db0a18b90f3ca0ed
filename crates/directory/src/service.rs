use std::sync::Arc;

use tracing::{info, warn};

use signoff_core::{
    classify, ApprovalEvent, ApprovalPolicy, AuditSink, Classification, Decision, EmployeeId,
    OrgHierarchy, PhaseStatus, WorkOrderStatus,
};

use crate::errors::DirectoryError;
use crate::registry::EmployeeRegistry;
use crate::store::WorkOrderStore;

/// Result of one authorization query, rendered back to whatever surface the
/// caller owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovalOutcome {
    pub decision: Decision,
    pub phase_status: PhaseStatus,
    pub work_order_status: WorkOrderStatus,
    pub shortest_path: Option<Vec<EmployeeId>>,
}

/// All approval paths from one employee to the hierarchy root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathsReport {
    pub employee: EmployeeId,
    pub root: EmployeeId,
    pub paths: Vec<Vec<EmployeeId>>,
    pub shortest: Option<Vec<EmployeeId>>,
}

/// Wires the record store and the authorization core together for one query
/// at a time: resolve identifiers, enumerate paths, classify, decide, apply
/// the transition, and report the outcome.
pub struct ApprovalService {
    registry: EmployeeRegistry,
    hierarchy: OrgHierarchy,
    store: WorkOrderStore,
    root: EmployeeId,
    policy: ApprovalPolicy,
    sink: Arc<dyn AuditSink>,
}

impl ApprovalService {
    /// Builds a service with a structurally discovered root.
    pub fn new(
        registry: EmployeeRegistry,
        hierarchy: OrgHierarchy,
        store: WorkOrderStore,
        sink: Arc<dyn AuditSink>,
    ) -> Result<Self, DirectoryError> {
        let root = hierarchy.find_root()?;
        Ok(Self::with_root(registry, hierarchy, store, root, sink))
    }

    /// Builds a service with an explicitly supplied root, skipping discovery.
    pub fn with_root(
        registry: EmployeeRegistry,
        hierarchy: OrgHierarchy,
        store: WorkOrderStore,
        root: EmployeeId,
        sink: Arc<dyn AuditSink>,
    ) -> Self {
        Self { registry, hierarchy, store, root, policy: ApprovalPolicy::new(), sink }
    }

    pub fn root(&self) -> EmployeeId {
        self.root
    }

    pub fn registry(&self) -> &EmployeeRegistry {
        &self.registry
    }

    pub fn store(&self) -> &WorkOrderStore {
        &self.store
    }

    /// One authorization query end to end. Lookup failures are returned as
    /// errors; ineligibility, risk mismatches, and repeat approvals are
    /// ordinary decisions inside the outcome.
    pub fn approve_phase(
        &self,
        work_order: &str,
        phase: &str,
        approver_email: &str,
    ) -> Result<ApprovalOutcome, DirectoryError> {
        let approver = self.registry.by_email(approver_email)?.id;
        let snapshot = self.store.snapshot(work_order, phase)?;

        let facts = self.classify_against_root(snapshot.author, approver);
        let (decision, phase_status, work_order_status) =
            self.store.update_phase(work_order, phase, |live_phase| {
                self.policy.authorize_phase(live_phase, &facts, approver)
            })?;

        self.sink.emit(
            ApprovalEvent::new(
                snapshot.work_order_id,
                snapshot.phase_id,
                snapshot.author,
                approver,
                decision,
            )
            .with_metadata("work_order", work_order)
            .with_metadata("phase", phase)
            .with_metadata("risk_level", snapshot.risk_level.as_str()),
        );
        info!(
            work_order,
            phase,
            approver = %approver,
            decision = decision.describe(),
            "approval attempt evaluated"
        );

        Ok(ApprovalOutcome {
            decision,
            phase_status,
            work_order_status,
            shortest_path: facts.shortest_path,
        })
    }

    pub fn approval_paths(&self, employee_email: &str) -> Result<PathsReport, DirectoryError> {
        let employee = self.registry.by_email(employee_email)?.id;
        let paths = self.hierarchy.all_paths(employee, self.root);
        let shortest = paths.iter().min_by_key(|path| path.len()).cloned();

        Ok(PathsReport { employee, root: self.root, paths, shortest })
    }

    /// Registered employees with no approval path to the root. A non-empty
    /// result indicates an incompletely wired hierarchy.
    pub fn unreachable_employees(&self) -> Vec<EmployeeId> {
        let mut unreachable: Vec<EmployeeId> = self
            .registry
            .ids()
            .filter(|employee| {
                *employee != self.root && self.hierarchy.all_paths(*employee, self.root).is_empty()
            })
            .collect();
        unreachable.sort();
        unreachable
    }

    fn classify_against_root(&self, author: EmployeeId, approver: EmployeeId) -> Classification {
        let paths = self.hierarchy.all_paths(author, self.root);
        if paths.is_empty() {
            warn!(author = %author, root = %self.root, "author has no approval path to the hierarchy root");
        }
        classify(&paths, author, approver)
    }
}
