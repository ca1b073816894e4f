mod record;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha3::Digest;
use std::io::{Read, Write};

pub use record::{AnimationsDisabled, MemorySnapshot, ResultsMap, ScenarioName, ScenarioRecord};

/// What the scenarios ran against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostDescription {
    /// Native refresh rate of the frame scheduler, if it runs on a fixed grid
    pub refresh_rate_hz: Option<u32>,
    /// Scrollable height of the page when the run started, in pixels
    pub scroll_height: f64,
    /// Whether the host exposed a memory API
    pub memory_api: bool,
    /// Whether the host already preferred reduced motion before any scenario patched it
    pub prefers_reduced_motion: bool,
}

/// Summary of a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// The unique run id
    ///
    /// Chosen by the runner unless one is supplied on the command line.
    pub run_id: String,
    /// The time the run started
    ///
    /// This is a Unix timestamp in seconds.
    pub started_at: i64,
    /// The scenarios selected for this run, in execution order
    pub scenarios: Vec<ScenarioName>,
    /// The host the scenarios ran against
    pub host: HostDescription,
    /// Scenarios that failed and therefore have no record in [RunSummary::results]
    pub failed: Vec<ScenarioName>,
    /// The records produced by the run
    pub results: ResultsMap,
    /// The version of Frame Tunnel that produced this summary
    pub frame_tunnel_version: String,
}

impl RunSummary {
    /// Create a new run summary with no results
    pub fn new(
        run_id: String,
        started_at: i64,
        scenarios: Vec<ScenarioName>,
        host: HostDescription,
        frame_tunnel_version: String,
    ) -> Self {
        Self {
            run_id,
            started_at,
            scenarios,
            host,
            failed: Vec::new(),
            results: ResultsMap::new(),
            frame_tunnel_version,
        }
    }

    /// Compute a fingerprint for this run summary
    ///
    /// The fingerprint identifies the configuration the scenarios ran with, so that two runs can be
    /// compared only when they measured the same thing. It uses the
    ///     - Selected scenarios, in order
    ///     - Host description
    ///     - Frame Tunnel version
    ///
    /// The fingerprint is computed using [sha3::Sha3_256].
    pub fn fingerprint(&self) -> String {
        let mut hasher = sha3::Sha3_256::new();
        self.scenarios.iter().for_each(|name| {
            Digest::update(&mut hasher, name.as_str().as_bytes());
        });
        Digest::update(&mut hasher, self.host.refresh_rate_hz.unwrap_or(0).to_le_bytes());
        Digest::update(&mut hasher, self.host.scroll_height.to_le_bytes());
        Digest::update(&mut hasher, [u8::from(self.host.memory_api)]);
        Digest::update(&mut hasher, [u8::from(self.host.prefers_reduced_motion)]);
        Digest::update(&mut hasher, self.frame_tunnel_version.as_bytes());

        format!("{:x}", hasher.finalize())
    }

    /// Names of the scenarios that were selected but neither completed nor failed, because the run
    /// was stopped early.
    pub fn skipped(&self) -> Vec<ScenarioName> {
        let completed = self.results.names();
        self.scenarios
            .iter()
            .filter(|name| !completed.contains(name) && !self.failed.contains(name))
            .copied()
            .collect_vec()
    }
}

/// Serialize the run summary to a writer as a single line of JSON
pub fn store_run_summary<W: Write>(run_summary: &RunSummary, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *writer, run_summary)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Load a run summary from a reader
pub fn load_run_summary<R: Read>(reader: R) -> anyhow::Result<RunSummary> {
    let reader = std::io::BufReader::new(reader);
    let run_summary: RunSummary = serde_json::from_reader(reader)?;
    Ok(run_summary)
}
