use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque graph identity. Names, emails, and titles are directory records
/// owned by the surrounding collaborator, never by the authorization core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
