use frame_tunnel_summary_model::{ScenarioName, ScenarioRecord};
use tabled::Tabled;

#[derive(Tabled)]
pub struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    pub scenario: ScenarioName,
    #[tabled(rename = "Duration (ms)", display = "float2")]
    pub duration_ms: f64,
    #[tabled(rename = "FPS")]
    pub fps: String,
    #[tabled(rename = "Memory")]
    pub memory: String,
    #[tabled(rename = "Monitored FPS")]
    pub monitored_fps: String,
    #[tabled(rename = "Animations disabled")]
    pub animations_disabled: String,
    #[tabled(rename = "Throttled")]
    pub throttled: String,
}

impl ScenarioRow {
    pub fn new(scenario: ScenarioName, record: &ScenarioRecord) -> Self {
        Self {
            scenario,
            duration_ms: record.duration_ms,
            // A zero count means nothing was measured, same as no count at all.
            fps: match record.fps {
                Some(fps) if fps > 0 => fps.to_string(),
                _ => "N/A".to_string(),
            },
            memory: if record.memory_usage.is_unsupported() {
                "N/A".to_string()
            } else {
                format!("{:.2}MB", record.memory_usage.used_mb())
            },
            monitored_fps: record
                .monitored_fps
                .map(|fps| format!("{fps:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            animations_disabled: record
                .animations_disabled
                .and_then(|disabled| serde_json::to_string(&disabled).ok())
                .unwrap_or_else(|| "-".to_string()),
            throttled: record
                .throttled
                .map(|throttled| throttled.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn float2(n: &f64) -> String {
    format!("{:.2}", n)
}
