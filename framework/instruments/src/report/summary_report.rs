mod scenario_table;

use std::fmt::Write;

use frame_tunnel_summary_model::{RunSummary, ScenarioName, ScenarioRecord};
use itertools::Itertools;
use tabled::settings::Style;
use tabled::Table;

use crate::report::recommendations::generate_recommendations;
use crate::report::summary_report::scenario_table::ScenarioRow;
use crate::report::ReportCollector;

/// Prints a human readable table of the run to stdout once the run is over.
#[derive(Debug, Default)]
pub struct SummaryReportCollector {
    failures: Vec<(ScenarioName, String)>,
}

impl SummaryReportCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportCollector for SummaryReportCollector {
    fn add_scenario(&mut self, name: ScenarioName, record: &ScenarioRecord) {
        log::debug!("Scenario [{name}] finished in {:.2}ms", record.duration_ms);
    }

    fn add_failure(&mut self, name: ScenarioName, error: &anyhow::Error) {
        self.failures.push((name, format!("{error:#}")));
    }

    fn finalize(&self, summary: &RunSummary) {
        println!("{}", render_summary(summary, &self.failures));
    }
}

/// Render the results table, failures and recommendations for a run.
pub fn render_summary(summary: &RunSummary, failures: &[(ScenarioName, String)]) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n📈 Performance Test Results");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "Run ID: {}", summary.run_id);
    let _ = writeln!(out, "Fingerprint: {}", summary.fingerprint());

    if summary.results.is_empty() {
        let _ = writeln!(out, "\nNo scenarios completed");
    } else {
        let rows = summary
            .results
            .iter()
            .map(|(name, record)| ScenarioRow::new(name, record))
            .collect_vec();
        let mut table = Table::new(&rows);
        table.with(Style::modern());
        let _ = writeln!(out, "\n{table}");
    }

    if !failures.is_empty() {
        let _ = writeln!(out, "\n❌ Failed scenarios:");
        for (name, error) in failures {
            let _ = writeln!(out, "   {name}: {error}");
        }
    }

    let skipped = summary.skipped();
    if !skipped.is_empty() {
        let _ = writeln!(
            out,
            "\n⏭️  Not run: {}",
            skipped.iter().map(|name| name.as_str()).join(", ")
        );
    }

    let _ = writeln!(out, "\n✅ Optimization Recommendations:");
    for recommendation in generate_recommendations(&summary.results) {
        let _ = writeln!(out, "{recommendation}");
    }

    out
}
