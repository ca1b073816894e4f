use frame_tunnel_summary_model::{ResultsMap, ScenarioName};
use itertools::Itertools;

/// Below this many frames per second an animation reads as janky.
const LOW_FPS_THRESHOLD: u32 = 30;

/// Heap usage above this many MiB is flagged.
const HIGH_MEMORY_MB: f64 = 100.0;

const PERFORMANCE_TIPS: [&str; 5] = [
    "   - Use will-change CSS property for animated elements",
    "   - Implement hardware acceleration with translateZ(0)",
    "   - Batch DOM operations to minimize reflows",
    "   - Use requestAnimationFrame for smooth animations",
    "   - Clean up animations on component unmount",
];

/// Heuristic advice derived from the results, followed by the fixed performance tips.
///
/// Scenarios without an FPS reading, or with a zero reading, are not counted as slow. Unsupported
/// memory snapshots are never counted as high.
pub fn generate_recommendations(results: &ResultsMap) -> Vec<String> {
    let mut recommendations = Vec::new();

    let low_fps = results
        .iter()
        .filter(|(_, record)| matches!(record.fps, Some(fps) if fps > 0 && fps < LOW_FPS_THRESHOLD))
        .map(|(name, _)| name)
        .collect_vec();
    if !low_fps.is_empty() {
        recommendations.push(format!("⚠️  Low FPS detected in: {}", low_fps.iter().join(", ")));
    }

    let high_memory = results
        .iter()
        .filter(|(_, record)| {
            !record.memory_usage.is_unsupported() && record.memory_usage.used_mb() > HIGH_MEMORY_MB
        })
        .map(|(name, _)| name)
        .collect_vec();
    if !high_memory.is_empty() {
        recommendations.push(format!(
            "💾 High memory usage in: {}",
            high_memory.iter().join(", ")
        ));
    }

    if let Some(disabled) = results
        .get(ScenarioName::ReducedMotion)
        .and_then(|record| record.animations_disabled)
    {
        if disabled.all() {
            recommendations.push("♿ Reduced motion compliance: ✅ Working correctly".to_string());
        } else {
            recommendations.push(format!(
                "♿ Reduced motion compliance: ❌ Still animating in: {}",
                disabled.failing_groups().join(", ")
            ));
        }
    }

    recommendations.push("🚀 Performance Tips:".to_string());
    recommendations.extend(PERFORMANCE_TIPS.iter().map(|tip| tip.to_string()));

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_tunnel_summary_model::{AnimationsDisabled, MemorySnapshot, ScenarioRecord};
    use pretty_assertions::assert_eq;

    fn record(fps: Option<u32>, used_mb: u64) -> ScenarioRecord {
        ScenarioRecord::new(
            1000.0,
            fps,
            MemorySnapshot {
                used_bytes: used_mb * 1024 * 1024,
                total_bytes: 0,
                limit_bytes: 0,
            },
        )
    }

    #[test]
    fn only_tips_for_healthy_results() {
        let mut results = ResultsMap::new();
        results.insert(ScenarioName::NormalScroll, record(Some(60), 40));

        let recommendations = generate_recommendations(&results);

        assert_eq!(6, recommendations.len());
        assert_eq!("🚀 Performance Tips:", recommendations[0]);
    }

    #[test]
    fn flags_slow_and_heavy_scenarios() {
        let mut results = ResultsMap::new();
        results.insert(ScenarioName::NormalScroll, record(Some(24), 40));
        results.insert(ScenarioName::FastScroll, record(Some(0), 140));
        results.insert(ScenarioName::LowEndDevice, record(Some(29), 0));
        results.insert(ScenarioName::HoverInteractions, record(None, 0));

        let recommendations = generate_recommendations(&results);

        assert_eq!(
            "⚠️  Low FPS detected in: normal-scroll, low-end-device",
            recommendations[0]
        );
        assert_eq!("💾 High memory usage in: fast-scroll", recommendations[1]);
    }

    #[test]
    fn reports_reduced_motion_compliance() {
        let mut results = ResultsMap::new();
        results.insert(
            ScenarioName::ReducedMotion,
            record(Some(60), 40).with_animations_disabled(AnimationsDisabled {
                hero: true,
                skills: true,
                about: true,
            }),
        );
        assert_eq!(
            "♿ Reduced motion compliance: ✅ Working correctly",
            generate_recommendations(&results)[0]
        );

        results.insert(
            ScenarioName::ReducedMotion,
            record(Some(60), 40).with_animations_disabled(AnimationsDisabled {
                hero: true,
                skills: false,
                about: true,
            }),
        );
        assert_eq!(
            "♿ Reduced motion compliance: ❌ Still animating in: skills",
            generate_recommendations(&results)[0]
        );
    }
}
