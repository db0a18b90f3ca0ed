use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authorize::Decision;
use crate::domain::employee::EmployeeId;
use crate::domain::work_order::{PhaseId, WorkOrderId};

/// The one event the core reports per authorization attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub event_id: String,
    pub work_order_id: WorkOrderId,
    pub phase_id: PhaseId,
    pub author: EmployeeId,
    pub approver: EmployeeId,
    pub decision: Decision,
    pub metadata: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl ApprovalEvent {
    pub fn new(
        work_order_id: WorkOrderId,
        phase_id: PhaseId,
        author: EmployeeId,
        approver: EmployeeId,
        decision: Decision,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            work_order_id,
            phase_id,
            author,
            approver,
            decision,
            metadata: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub trait AuditSink: Send + Sync {
    fn emit(&self, event: ApprovalEvent);
}

#[derive(Clone, Default)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<Vec<ApprovalEvent>>>,
}

impl InMemoryAuditSink {
    pub fn events(&self) -> Vec<ApprovalEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, event: ApprovalEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApprovalEvent, AuditSink, InMemoryAuditSink};
    use crate::authorize::Decision;
    use crate::domain::employee::EmployeeId;
    use crate::domain::work_order::{PhaseId, WorkOrderId};

    #[test]
    fn in_memory_sink_records_events_with_metadata() {
        let sink = InMemoryAuditSink::default();
        sink.emit(
            ApprovalEvent::new(
                WorkOrderId(1),
                PhaseId(2),
                EmployeeId(1),
                EmployeeId(2),
                Decision::Approved,
            )
            .with_metadata("risk_level", "moderate")
            .with_metadata("phase", "Phase 2"),
        );

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].work_order_id, WorkOrderId(1));
        assert_eq!(events[0].decision, Decision::Approved);
        assert_eq!(events[0].metadata.get("risk_level").map(String::as_str), Some("moderate"));
        assert!(!events[0].event_id.is_empty());
    }
}
