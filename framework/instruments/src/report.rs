mod json_report;
mod recommendations;
mod summary_report;

use frame_tunnel_summary_model::{RunSummary, ScenarioName, ScenarioRecord};
use parking_lot::Mutex;

pub use json_report::JsonReportCollector;
pub use recommendations::generate_recommendations;
pub use summary_report::{render_summary, SummaryReportCollector};

/// Receives scenario outcomes as they complete and renders them when the run is over.
pub trait ReportCollector: Send {
    fn add_scenario(&mut self, name: ScenarioName, record: &ScenarioRecord);

    fn add_failure(&mut self, name: ScenarioName, error: &anyhow::Error);

    fn finalize(&self, summary: &RunSummary);
}

/// Discards everything, for runs where only the returned results matter.
#[derive(Debug, Default)]
pub struct NoopReportCollector;

impl ReportCollector for NoopReportCollector {
    fn add_scenario(&mut self, _name: ScenarioName, _record: &ScenarioRecord) {}

    fn add_failure(&mut self, _name: ScenarioName, _error: &anyhow::Error) {}

    fn finalize(&self, _summary: &RunSummary) {}
}

/// Choose which collectors a run reports to.
#[derive(Debug, Default)]
pub struct ReportConfig {
    summary: bool,
    json: bool,
}

impl ReportConfig {
    /// Print a table of scenario results and recommendations at the end of the run.
    pub fn enable_summary(mut self) -> Self {
        self.summary = true;
        self
    }

    /// Print the run summary as a single JSON line at the end of the run.
    pub fn enable_json(mut self) -> Self {
        self.json = true;
        self
    }

    pub fn init(self) -> Reporter {
        let mut collectors: Vec<Box<dyn ReportCollector>> = Vec::new();
        if self.summary {
            collectors.push(Box::new(SummaryReportCollector::new()));
        }
        if self.json {
            collectors.push(Box::new(JsonReportCollector));
        }
        if collectors.is_empty() {
            collectors.push(Box::new(NoopReportCollector));
        }

        Reporter {
            collectors: Mutex::new(collectors),
        }
    }
}

/// Fans scenario outcomes out to the configured collectors. Shared by reference across the run.
pub struct Reporter {
    collectors: Mutex<Vec<Box<dyn ReportCollector>>>,
}

impl Reporter {
    pub fn add_scenario(&self, name: ScenarioName, record: &ScenarioRecord) {
        for collector in self.collectors.lock().iter_mut() {
            collector.add_scenario(name, record);
        }
    }

    pub fn add_failure(&self, name: ScenarioName, error: &anyhow::Error) {
        for collector in self.collectors.lock().iter_mut() {
            collector.add_failure(name, error);
        }
    }

    pub fn finalize(&self, summary: &RunSummary) {
        for collector in self.collectors.lock().iter() {
            collector.finalize(summary);
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("collectors", &self.collectors.lock().len())
            .finish()
    }
}
