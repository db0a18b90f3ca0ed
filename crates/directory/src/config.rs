use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use signoff_core::{
    EmployeeId, OrgHierarchy, Phase, PhaseId, RiskLevel, WorkOrderId,
};

use crate::errors::DirectoryError;
use crate::registry::{Employee, EmployeeRegistry};
use crate::store::WorkOrderStore;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read org chart file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse org chart file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("could not parse org chart: {0}")]
    Parse(toml::de::Error),
    #[error("org chart validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSpec {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingLine {
    pub employee: u32,
    pub manager: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub id: u32,
    pub name: String,
    /// Numeric risk encoding: 1 = low, 2 = moderate, 3 = high.
    pub risk_level: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderSpec {
    pub id: u32,
    pub name: String,
    pub author: u32,
    #[serde(default)]
    pub phases: Vec<PhaseSpec>,
}

/// Declarative org chart: the full set of management edges supplied once at
/// setup, plus the work orders the record store starts with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgChart {
    #[serde(default)]
    pub employees: Vec<EmployeeSpec>,
    #[serde(default)]
    pub reporting_lines: Vec<ReportingLine>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrderSpec>,
}

impl OrgChart {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        let chart: Self = toml::from_str(&raw)
            .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;
        chart.validate()?;
        Ok(chart)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let chart: Self = toml::from_str(raw).map_err(ConfigError::Parse)?;
        chart.validate()?;
        Ok(chart)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let declared: BTreeSet<u32> = self.employees.iter().map(|employee| employee.id).collect();

        for line in &self.reporting_lines {
            for endpoint in [line.employee, line.manager] {
                if !declared.contains(&endpoint) {
                    return Err(ConfigError::Validation(format!(
                        "reporting line {} -> {} references undeclared employee {endpoint}",
                        line.employee, line.manager
                    )));
                }
            }
            if line.employee == line.manager {
                return Err(ConfigError::Validation(format!(
                    "employee {} cannot manage themselves",
                    line.employee
                )));
            }
        }

        let mut order_ids = BTreeSet::new();
        let mut phase_ids = BTreeSet::new();
        for order in &self.work_orders {
            if !declared.contains(&order.author) {
                return Err(ConfigError::Validation(format!(
                    "work order `{}` has undeclared author {}",
                    order.name, order.author
                )));
            }
            if !order_ids.insert(order.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate work order id {}",
                    order.id
                )));
            }
            for phase in &order.phases {
                if RiskLevel::from_code(phase.risk_level).is_none() {
                    return Err(ConfigError::Validation(format!(
                        "phase `{}` of `{}` has invalid risk level {} (expected 1..=3)",
                        phase.name, order.name, phase.risk_level
                    )));
                }
                if !phase_ids.insert(phase.id) {
                    return Err(ConfigError::Validation(format!(
                        "duplicate phase id {}",
                        phase.id
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn build_registry(&self) -> Result<EmployeeRegistry, ConfigError> {
        let mut registry = EmployeeRegistry::new();
        for spec in &self.employees {
            registry.insert(Employee {
                id: EmployeeId(spec.id),
                name: spec.name.clone(),
                email: spec.email.clone(),
                title: spec.title.clone(),
            })?;
        }
        Ok(registry)
    }

    pub fn build_hierarchy(&self) -> OrgHierarchy {
        let mut hierarchy = OrgHierarchy::new();
        for line in &self.reporting_lines {
            hierarchy.add_manager(EmployeeId(line.employee), EmployeeId(line.manager));
        }
        hierarchy
    }

    pub fn build_store(&self) -> Result<WorkOrderStore, ConfigError> {
        let store = WorkOrderStore::new();
        for order in &self.work_orders {
            let author = EmployeeId(order.author);
            store.create_work_order(author, WorkOrderId(order.id), &order.name)?;
            for phase in &order.phases {
                let risk = RiskLevel::from_code(phase.risk_level).ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "phase `{}` has invalid risk level {}",
                        phase.name, phase.risk_level
                    ))
                })?;
                store.add_phase(
                    author,
                    &order.name,
                    Phase::new(PhaseId(phase.id), phase.name.clone(), risk),
                )?;
            }
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{ConfigError, OrgChart};
    use signoff_core::{EmployeeId, RiskLevel};

    const MINIMAL_CHART: &str = r#"
[[employees]]
id = 1
name = "Ada Author"
email = "ada@company.com"
title = "Engineer"

[[employees]]
id = 2
name = "Rex Root"
email = "rex@company.com"
title = "CEO"

[[reporting_lines]]
employee = 1
manager = 2

[[work_orders]]
id = 1
name = "Work order 1"
author = 1

[[work_orders.phases]]
id = 1
name = "Phase 1"
risk_level = 2
"#;

    #[test]
    fn parses_and_builds_registry_hierarchy_and_store() {
        let chart = OrgChart::from_toml_str(MINIMAL_CHART).expect("chart should parse");

        let registry = chart.build_registry().expect("registry");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_email("ada@company.com").expect("lookup").id, EmployeeId(1));

        let hierarchy = chart.build_hierarchy();
        assert_eq!(hierarchy.find_root(), Ok(EmployeeId(2)));

        let store = chart.build_store().expect("store");
        let order = store.work_order("Work order 1").expect("order");
        assert_eq!(order.phases.len(), 1);
        assert_eq!(order.phases[0].risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn rejects_undeclared_reporting_line_endpoint() {
        let raw = r#"
[[employees]]
id = 1
name = "Ada"
email = "ada@company.com"

[[reporting_lines]]
employee = 1
manager = 7
"#;
        let error = OrgChart::from_toml_str(raw).expect_err("undeclared manager");
        assert!(matches!(error, ConfigError::Validation(message) if message.contains("undeclared employee 7")));
    }

    #[test]
    fn rejects_invalid_risk_code() {
        let raw = r#"
[[employees]]
id = 1
name = "Ada"
email = "ada@company.com"

[[work_orders]]
id = 1
name = "Work order 1"
author = 1

[[work_orders.phases]]
id = 1
name = "Phase 1"
risk_level = 9
"#;
        let error = OrgChart::from_toml_str(raw).expect_err("bad risk code");
        assert!(matches!(error, ConfigError::Validation(message) if message.contains("invalid risk level 9")));
    }

    #[test]
    fn rejects_duplicate_work_order_id() {
        let raw = r#"
[[employees]]
id = 1
name = "Ada"
email = "ada@company.com"

[[work_orders]]
id = 1
name = "Work order 1"
author = 1

[[work_orders]]
id = 1
name = "Work order 2"
author = 1
"#;
        let error = OrgChart::from_toml_str(raw).expect_err("duplicate order id");
        assert!(matches!(error, ConfigError::Validation(message) if message.contains("duplicate work order id 1")));
    }

    #[test]
    fn loads_from_a_file_on_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(MINIMAL_CHART.as_bytes()).expect("write chart");

        let chart = OrgChart::from_path(file.path()).expect("chart from file");
        assert_eq!(chart.employees.len(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error =
            OrgChart::from_path(std::path::Path::new("/nonexistent/chart.toml")).expect_err("missing file");
        assert!(matches!(error, ConfigError::ReadFile { .. }));
    }
}
