pub mod approve;
pub mod check;
pub mod demo;
pub mod paths;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use signoff_core::{AuditSink, EmployeeId};
use signoff_directory::{fixtures, ApprovalService, ConfigError, OrgChart};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            details: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_details(
        command: &str,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            details: Some(details),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            details: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

fn load_chart(chart: Option<&Path>) -> Result<OrgChart, ConfigError> {
    match chart {
        Some(path) => OrgChart::from_path(path),
        None => Ok(fixtures::demo_chart()),
    }
}

fn service_from_chart(
    chart: &OrgChart,
    sink: Arc<dyn AuditSink>,
) -> Result<ApprovalService, ConfigError> {
    let registry = chart.build_registry()?;
    let hierarchy = chart.build_hierarchy();
    let store = chart.build_store()?;
    ApprovalService::new(registry, hierarchy, store, sink).map_err(ConfigError::Directory)
}

fn render_path(path: &[EmployeeId]) -> String {
    path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ")
}
