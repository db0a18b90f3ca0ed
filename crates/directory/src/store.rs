use std::sync::{Mutex, MutexGuard};

use signoff_core::{
    Decision, EmployeeId, Phase, PhaseId, PhaseStatus, RiskLevel, WorkOrder, WorkOrderId,
    WorkOrderStatus,
};

use crate::errors::DirectoryError;

/// What the authorization query needs to know about a phase before the
/// hierarchy traversal runs: who authored the work order, and the phase's
/// risk and status at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseSnapshot {
    pub work_order_id: WorkOrderId,
    pub phase_id: PhaseId,
    pub author: EmployeeId,
    pub risk_level: RiskLevel,
    pub status: PhaseStatus,
}

/// In-memory work-order store. Phase and work-order status is the only
/// state that persists across queries; the single lock serializes status
/// transitions so a decision applied through `update_phase` is an atomic
/// check-and-set.
#[derive(Debug, Default)]
pub struct WorkOrderStore {
    orders: Mutex<Vec<WorkOrder>>,
}

impl WorkOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a work order authored by `author`. Re-creating the same
    /// order is a no-op; reusing an id or name for a different order is an
    /// error.
    pub fn create_work_order(
        &self,
        author: EmployeeId,
        id: WorkOrderId,
        name: &str,
    ) -> Result<(), DirectoryError> {
        let mut orders = self.lock();

        if let Some(existing) = orders.iter().find(|order| order.id == id || order.name == name) {
            if existing.id == id && existing.name == name && existing.author == author {
                return Ok(());
            }
            return Err(DirectoryError::DuplicateWorkOrder(existing.id));
        }

        orders.push(WorkOrder::new(id, name, author));
        Ok(())
    }

    /// Appends a phase to a work order. Only the work order's author may add
    /// phases; re-adding an existing phase id is a no-op.
    pub fn add_phase(
        &self,
        actor: EmployeeId,
        work_order: &str,
        phase: Phase,
    ) -> Result<(), DirectoryError> {
        let mut orders = self.lock();
        let order = find_mut(&mut orders, work_order)?;

        if order.author != actor {
            return Err(DirectoryError::NotAuthor { actor, name: order.name.clone() });
        }

        if order.phases.iter().all(|existing| existing.id != phase.id) {
            order.phases.push(phase);
        }
        Ok(())
    }

    pub fn snapshot(
        &self,
        work_order: &str,
        phase: &str,
    ) -> Result<PhaseSnapshot, DirectoryError> {
        let orders = self.lock();
        let order = find(&orders, work_order)?;
        let phase = order.phase_by_name(phase).ok_or_else(|| DirectoryError::PhaseNotFound {
            work_order: order.name.clone(),
            phase: phase.to_string(),
        })?;

        Ok(PhaseSnapshot {
            work_order_id: order.id,
            phase_id: phase.id,
            author: order.author,
            risk_level: phase.risk_level,
            status: phase.status,
        })
    }

    /// Runs `decide` against the live phase under the store lock and returns
    /// the decision together with the phase and recomputed work-order status.
    pub fn update_phase(
        &self,
        work_order: &str,
        phase: &str,
        decide: impl FnOnce(&mut Phase) -> Decision,
    ) -> Result<(Decision, PhaseStatus, WorkOrderStatus), DirectoryError> {
        let mut orders = self.lock();
        let order = find_mut(&mut orders, work_order)?;
        let order_name = order.name.clone();
        let phase = order.phase_by_name_mut(phase).ok_or_else(|| DirectoryError::PhaseNotFound {
            work_order: order_name,
            phase: phase.to_string(),
        })?;

        let decision = decide(phase);
        let phase_status = phase.status;
        Ok((decision, phase_status, order.status()))
    }

    pub fn work_order(&self, name: &str) -> Result<WorkOrder, DirectoryError> {
        find(&self.lock(), name).cloned()
    }

    pub fn work_orders(&self) -> Vec<WorkOrder> {
        let mut orders = self.lock().clone();
        orders.sort_by_key(|order| order.id);
        orders
    }

    fn lock(&self) -> MutexGuard<'_, Vec<WorkOrder>> {
        match self.orders.lock() {
            Ok(orders) => orders,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn find<'a>(orders: &'a [WorkOrder], name: &str) -> Result<&'a WorkOrder, DirectoryError> {
    orders
        .iter()
        .find(|order| order.name == name)
        .ok_or_else(|| DirectoryError::WorkOrderNotFound { name: name.to_string() })
}

fn find_mut<'a>(
    orders: &'a mut [WorkOrder],
    name: &str,
) -> Result<&'a mut WorkOrder, DirectoryError> {
    orders
        .iter_mut()
        .find(|order| order.name == name)
        .ok_or_else(|| DirectoryError::WorkOrderNotFound { name: name.to_string() })
}
