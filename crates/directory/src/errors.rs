use thiserror::Error;

use signoff_core::{EmployeeId, HierarchyError, WorkOrderId};

/// Lookup and record-keeping failures on the collaborator side of the
/// boundary. The authorization core never resolves names or emails; these
/// are returned to the caller, never panicked.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("no employee with id {0}")]
    EmployeeNotFound(EmployeeId),
    #[error("no employee with email `{email}`")]
    EmailNotFound { email: String },
    #[error("employee id {id} is already registered")]
    DuplicateEmployee { id: EmployeeId },
    #[error("email `{email}` is already registered")]
    DuplicateEmail { email: String },
    #[error("no work order named `{name}`")]
    WorkOrderNotFound { name: String },
    #[error("work order id {0} already exists under a different name")]
    DuplicateWorkOrder(WorkOrderId),
    #[error("no phase named `{phase}` in work order `{work_order}`")]
    PhaseNotFound { work_order: String, phase: String },
    #[error("employee {actor} is not the author of work order `{name}`")]
    NotAuthor { actor: EmployeeId, name: String },
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

#[cfg(test)]
mod tests {
    use super::DirectoryError;
    use signoff_core::{EmployeeId, WorkOrderId};

    #[test]
    fn messages_render_bare_ids() {
        assert_eq!(
            DirectoryError::DuplicateWorkOrder(WorkOrderId(7)).to_string(),
            "work order id 7 already exists under a different name"
        );
        assert_eq!(DirectoryError::EmployeeNotFound(EmployeeId(3)).to_string(), "no employee with id 3");
    }
}
