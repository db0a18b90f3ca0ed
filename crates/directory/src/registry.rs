use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use signoff_core::EmployeeId;

use crate::errors::DirectoryError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub title: String,
}

/// Indexed employee lookup: id -> record and normalized email -> id. The
/// registry owns name/email resolution so the authorization core only ever
/// sees opaque ids.
#[derive(Clone, Debug, Default)]
pub struct EmployeeRegistry {
    by_id: HashMap<EmployeeId, Employee>,
    by_email: HashMap<String, EmployeeId>,
}

impl EmployeeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, employee: Employee) -> Result<(), DirectoryError> {
        if self.by_id.contains_key(&employee.id) {
            return Err(DirectoryError::DuplicateEmployee { id: employee.id });
        }

        let email_key = normalize_email(&employee.email);
        if self.by_email.contains_key(&email_key) {
            return Err(DirectoryError::DuplicateEmail { email: employee.email });
        }

        self.by_email.insert(email_key, employee.id);
        self.by_id.insert(employee.id, employee);
        Ok(())
    }

    pub fn by_id(&self, id: EmployeeId) -> Result<&Employee, DirectoryError> {
        self.by_id.get(&id).ok_or(DirectoryError::EmployeeNotFound(id))
    }

    pub fn by_email(&self, email: &str) -> Result<&Employee, DirectoryError> {
        let id = self
            .by_email
            .get(&normalize_email(email))
            .ok_or_else(|| DirectoryError::EmailNotFound { email: email.to_string() })?;
        self.by_id(*id)
    }

    pub fn ids(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.by_id.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{Employee, EmployeeRegistry};
    use crate::errors::DirectoryError;
    use signoff_core::EmployeeId;

    fn employee(id: u32, email: &str) -> Employee {
        Employee {
            id: EmployeeId(id),
            name: format!("Employee {id}"),
            email: email.to_string(),
            title: "Engineer".to_string(),
        }
    }

    #[test]
    fn resolves_email_case_insensitively() {
        let mut registry = EmployeeRegistry::new();
        registry.insert(employee(1, "jAbram@company.com")).expect("insert");

        let found = registry.by_email(" jabram@COMPANY.com ").expect("lookup");
        assert_eq!(found.id, EmployeeId(1));
    }

    #[test]
    fn unknown_email_is_a_not_found_value() {
        let registry = EmployeeRegistry::new();
        let error = registry.by_email("ghost@company.com").expect_err("missing");
        assert_eq!(error, DirectoryError::EmailNotFound { email: "ghost@company.com".to_string() });
    }

    #[test]
    fn rejects_duplicate_id_and_email() {
        let mut registry = EmployeeRegistry::new();
        registry.insert(employee(1, "a@company.com")).expect("insert");

        assert_eq!(
            registry.insert(employee(1, "b@company.com")),
            Err(DirectoryError::DuplicateEmployee { id: EmployeeId(1) })
        );
        assert_eq!(
            registry.insert(employee(2, "A@company.com")),
            Err(DirectoryError::DuplicateEmail { email: "A@company.com".to_string() })
        );
    }
}
