use frame_tunnel_summary_model::{store_run_summary, RunSummary, ScenarioName, ScenarioRecord};

use crate::report::ReportCollector;

/// Writes the run summary to stdout as one line of JSON, for consumption by other tools.
#[derive(Debug, Default)]
pub struct JsonReportCollector;

impl ReportCollector for JsonReportCollector {
    fn add_scenario(&mut self, _name: ScenarioName, _record: &ScenarioRecord) {}

    fn add_failure(&mut self, _name: ScenarioName, _error: &anyhow::Error) {}

    fn finalize(&self, summary: &RunSummary) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = store_run_summary(summary, &mut stdout) {
            log::error!("Failed to write run summary: {e:?}");
        }
    }
}
