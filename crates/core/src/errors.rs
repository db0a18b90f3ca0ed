use thiserror::Error;

use crate::domain::employee::EmployeeId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("no hierarchy root found (every known employee has a manager)")]
    RootNotFound,
    #[error("hierarchy has multiple roots: {candidates:?}")]
    AmbiguousRoot { candidates: Vec<EmployeeId> },
}
