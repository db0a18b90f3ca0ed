pub mod config;
pub mod errors;
pub mod fixtures;
pub mod registry;
pub mod service;
pub mod store;

pub use config::{ConfigError, OrgChart};
pub use errors::DirectoryError;
pub use registry::{Employee, EmployeeRegistry};
pub use service::{ApprovalOutcome, ApprovalService};
pub use store::{PhaseSnapshot, WorkOrderStore};
