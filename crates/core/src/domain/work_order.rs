use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::employee::EmployeeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkOrderId(pub u32);

impl fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

/// Risk classification of a phase, determining which role class relative to
/// the work order's author may sign it off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Numeric encoding used by org-chart files: 1 = low, 2 = moderate,
    /// 3 = high.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Low),
            2 => Some(Self::Moderate),
            3 => Some(Self::High),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    Approved,
}

/// A single approval-gated step within a work order. The only transition is
/// Pending -> Approved; eligibility is evaluated against the live hierarchy
/// at approval time, never frozen at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: PhaseId,
    pub name: String,
    pub risk_level: RiskLevel,
    pub status: PhaseStatus,
    pub approved_by: Option<EmployeeId>,
}

impl Phase {
    pub fn new(id: PhaseId, name: impl Into<String>, risk_level: RiskLevel) -> Self {
        Self {
            id,
            name: name.into(),
            risk_level,
            status: PhaseStatus::Pending,
            approved_by: None,
        }
    }
}

/// Derived aggregate status; never independently mutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    InProgress,
    FullyApproved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub name: String,
    pub author: EmployeeId,
    pub phases: Vec<Phase>,
}

impl WorkOrder {
    pub fn new(id: WorkOrderId, name: impl Into<String>, author: EmployeeId) -> Self {
        Self { id, name: name.into(), author, phases: Vec::new() }
    }

    pub fn phase_by_name(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.name == name)
    }

    pub fn phase_by_name_mut(&mut self, name: &str) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|phase| phase.name == name)
    }

    /// Fully approved exactly when every phase is Approved. A work order with
    /// no phases yet is still in progress.
    pub fn status(&self) -> WorkOrderStatus {
        let all_approved = !self.phases.is_empty()
            && self.phases.iter().all(|phase| phase.status == PhaseStatus::Approved);
        if all_approved {
            WorkOrderStatus::FullyApproved
        } else {
            WorkOrderStatus::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, PhaseId, PhaseStatus, RiskLevel, WorkOrder, WorkOrderId, WorkOrderStatus};
    use crate::domain::employee::EmployeeId;

    fn order_with_phases(phases: Vec<Phase>) -> WorkOrder {
        let mut order = WorkOrder::new(WorkOrderId(1), "Work order 1", EmployeeId(1));
        order.phases = phases;
        order
    }

    fn approved_phase(id: u32) -> Phase {
        let mut phase = Phase::new(PhaseId(id), format!("Phase {id}"), RiskLevel::Low);
        phase.status = PhaseStatus::Approved;
        phase.approved_by = Some(EmployeeId(1));
        phase
    }

    #[test]
    fn empty_work_order_is_in_progress() {
        let order = order_with_phases(Vec::new());
        assert_eq!(order.status(), WorkOrderStatus::InProgress);
    }

    #[test]
    fn fully_approved_when_every_phase_is_approved() {
        let order = order_with_phases(vec![approved_phase(1), approved_phase(2)]);
        assert_eq!(order.status(), WorkOrderStatus::FullyApproved);
    }

    #[test]
    fn adding_a_pending_phase_reverts_aggregate_status() {
        let mut order = order_with_phases(vec![approved_phase(1)]);
        assert_eq!(order.status(), WorkOrderStatus::FullyApproved);

        order.phases.push(Phase::new(PhaseId(2), "Phase 2", RiskLevel::Moderate));
        assert_eq!(order.status(), WorkOrderStatus::InProgress);
    }

    #[test]
    fn risk_level_codes_round_trip() {
        for risk in [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High] {
            assert_eq!(RiskLevel::from_code(risk.code()), Some(risk));
        }
        assert_eq!(RiskLevel::from_code(0), None);
        assert_eq!(RiskLevel::from_code(4), None);
    }
}
