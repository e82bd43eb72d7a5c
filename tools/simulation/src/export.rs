//! JSON export
//!
//! Serializes reports, batch metrics and order checks for external
//! consumption.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::metrics::BatchMetrics;
use crate::replay::{OrderCheck, ReplayValidation};
use crate::report::MatchingReport;

/// Combined export containing whatever the run produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<MatchingReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replay: Option<ReplayValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_check: Option<OrderCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BatchMetrics>,
}

impl SimulationExport {
    pub fn new() -> Self {
        Self {
            version: crate::VERSION.to_string(),
            ..Self::default()
        }
    }

    pub fn with_report(mut self, report: MatchingReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_replay(mut self, replay: ReplayValidation) -> Self {
        self.replay = Some(replay);
        self
    }

    pub fn with_order_check(mut self, check: OrderCheck) -> Self {
        self.order_check = Some(check);
        self
    }

    pub fn with_metrics(mut self, metrics: BatchMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

/// Export as pretty-printed JSON.
pub fn export_json(export: &SimulationExport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(export)
}

/// Write export to a file path.
pub fn write_to_file(export: &SimulationExport, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = export_json(export)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{run_generated, ScenarioConfig};

    #[test]
    fn test_build_export() {
        let export = SimulationExport::new();
        assert_eq!(export.version, crate::VERSION);
        assert!(export.report.is_none());
        assert_eq!(export_json(&export).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_export_json_roundtrip() {
        let outcome = run_generated(&ScenarioConfig { couples: 4, ..ScenarioConfig::default() }).unwrap();
        let export = SimulationExport::new().with_report(MatchingReport::from_outcome(&outcome));

        let json = export_json(&export).unwrap();
        let parsed: SimulationExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, export);
    }

    #[test]
    fn test_export_shape() {
        let outcome = run_generated(&ScenarioConfig { couples: 2, ..ScenarioConfig::default() }).unwrap();
        let export = SimulationExport::new()
            .with_report(MatchingReport::from_outcome(&outcome))
            .with_metrics(BatchMetrics::new());

        let value: serde_json::Value = serde_json::from_str(&export_json(&export).unwrap()).unwrap();
        assert_eq!(value["report"]["seed"], 42);
        assert_eq!(value["report"]["verdict"]["stable"], true);
        assert_eq!(value["report"]["preferences"]["proposers"].as_array().unwrap().len(), 2);
        assert!(value.get("order_check").is_none());
    }
}
