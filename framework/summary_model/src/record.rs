use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The fixed set of scenarios the harness knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioName {
    NormalScroll,
    FastScroll,
    HoverInteractions,
    ReducedMotion,
    LowEndDevice,
}

impl ScenarioName {
    /// Canonical execution order.
    pub const ALL: [ScenarioName; 5] = [
        ScenarioName::NormalScroll,
        ScenarioName::FastScroll,
        ScenarioName::HoverInteractions,
        ScenarioName::ReducedMotion,
        ScenarioName::LowEndDevice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioName::NormalScroll => "normal-scroll",
            ScenarioName::FastScroll => "fast-scroll",
            ScenarioName::HoverInteractions => "hover-interactions",
            ScenarioName::ReducedMotion => "reduced-motion",
            ScenarioName::LowEndDevice => "low-end-device",
        }
    }
}

impl Display for ScenarioName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioName::ALL
            .into_iter()
            .find(|name| name.as_str() == s.trim())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown scenario [{}], expected one of: {}",
                    s,
                    itertools::join(ScenarioName::ALL.iter(), ", ")
                )
            })
    }
}

/// A heap usage reading in bytes.
///
/// The all-zero snapshot is what a host without a memory API reports, so it means "unsupported"
/// rather than "nothing used".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub limit_bytes: u64,
}

impl MemorySnapshot {
    pub fn is_unsupported(&self) -> bool {
        *self == MemorySnapshot::default()
    }

    pub fn used_mb(&self) -> f64 {
        self.used_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Whether every element of each checked group reported `animation: none`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationsDisabled {
    pub hero: bool,
    pub skills: bool,
    pub about: bool,
}

impl AnimationsDisabled {
    pub fn all(&self) -> bool {
        self.hero && self.skills && self.about
    }

    /// Names of the groups that still animate.
    pub fn failing_groups(&self) -> Vec<&'static str> {
        [("hero", self.hero), ("skills", self.skills), ("about", self.about)]
            .into_iter()
            .filter(|(_, disabled)| !disabled)
            .map(|(name, _)| name)
            .collect()
    }
}

/// The outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    /// Time from the start of the scenario action to its completion, in milliseconds.
    pub duration_ms: f64,
    /// Frames counted in the one second sampling window, `None` if the window never closed.
    pub fps: Option<u32>,
    pub memory_usage: MemorySnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations_disabled: Option<AnimationsDisabled>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttled: Option<bool>,
    /// Average of the performance monitor samples taken while the scenario ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitored_fps: Option<f64>,
}

impl ScenarioRecord {
    pub fn new(duration_ms: f64, fps: Option<u32>, memory_usage: MemorySnapshot) -> Self {
        Self {
            duration_ms,
            fps,
            memory_usage,
            animations_disabled: None,
            throttled: None,
            monitored_fps: None,
        }
    }

    pub fn with_animations_disabled(mut self, animations_disabled: AnimationsDisabled) -> Self {
        self.animations_disabled = Some(animations_disabled);
        self
    }

    pub fn with_throttled(mut self, throttled: bool) -> Self {
        self.throttled = Some(throttled);
        self
    }

    pub fn with_monitored_fps(mut self, monitored_fps: Option<f64>) -> Self {
        self.monitored_fps = monitored_fps;
        self
    }
}

/// Scenario records keyed by name, in the order the scenarios ran.
///
/// There is at most one record per scenario. Inserting a name that is already present replaces the
/// record where it stands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultsMap {
    entries: Vec<(ScenarioName, ScenarioRecord)>,
}

impl ResultsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced.
    pub fn insert(&mut self, name: ScenarioName, record: ScenarioRecord) -> Option<ScenarioRecord> {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, record)),
            None => {
                self.entries.push((name, record));
                None
            }
        }
    }

    pub fn get(&self, name: ScenarioName) -> Option<&ScenarioRecord> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScenarioName, &ScenarioRecord)> {
        self.entries.iter().map(|(name, record)| (*name, record))
    }

    pub fn names(&self) -> Vec<ScenarioName> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResultsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResultsMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultsMapVisitor;

        impl<'de> Visitor<'de> for ResultsMapVisitor {
            type Value = ResultsMap;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("a map of scenario names to scenario records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut results = ResultsMap::new();
                while let Some((name, record)) = access.next_entry::<ScenarioName, ScenarioRecord>()? {
                    results.insert(name, record);
                }
                Ok(results)
            }
        }

        deserializer.deserialize_map(ResultsMapVisitor)
    }
}
