use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::domain::employee::EmployeeId;
use crate::domain::work_order::{Phase, PhaseStatus, RiskLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    NotEligible,
    RiskMismatch,
}

impl RejectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotEligible => "not eligible",
            Self::RiskMismatch => "risk-level/approver mismatch",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    AlreadyApproved,
}

impl NoOpReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyApproved => "already approved",
        }
    }
}

/// Outcome of one approval attempt. Rejections and no-ops are expected
/// results, part of the normal decision surface, never errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected { reason: RejectionReason },
    NoOp { reason: NoOpReason },
}

impl Decision {
    pub fn is_approved(self) -> bool {
        self == Self::Approved
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected { reason } => reason.as_str(),
            Self::NoOp { reason } => reason.as_str(),
        }
    }
}

/// The risk-level sign-off policy: low risk is self-approved, moderate risk
/// needs a direct manager, high risk needs an upper-level manager.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApprovalPolicy;

impl ApprovalPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Pure decision over one query's facts. Eligibility short-circuits
    /// everything, including the already-approved check.
    pub fn decide(
        &self,
        risk_level: RiskLevel,
        facts: &Classification,
        status: PhaseStatus,
    ) -> Decision {
        if !facts.eligible() {
            return Decision::Rejected { reason: RejectionReason::NotEligible };
        }

        if status == PhaseStatus::Approved {
            return Decision::NoOp { reason: NoOpReason::AlreadyApproved };
        }

        let allowed = match risk_level {
            RiskLevel::Low => facts.is_self,
            RiskLevel::Moderate => facts.is_direct_manager,
            RiskLevel::High => facts.is_indirect_manager,
        };

        if allowed {
            Decision::Approved
        } else {
            Decision::Rejected { reason: RejectionReason::RiskMismatch }
        }
    }

    /// Decides and, on success, applies the Pending -> Approved transition
    /// and records the approver. The caller serializes access to the phase,
    /// which makes this check-and-set atomic.
    pub fn authorize_phase(
        &self,
        phase: &mut Phase,
        facts: &Classification,
        approver: EmployeeId,
    ) -> Decision {
        let decision = self.decide(phase.risk_level, facts, phase.status);
        if decision.is_approved() {
            phase.status = PhaseStatus::Approved;
            phase.approved_by = Some(approver);
        }
        decision
    }
}
