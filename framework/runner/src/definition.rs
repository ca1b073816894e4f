use frame_tunnel_core::prelude::HostEnvironment;
use frame_tunnel_summary_model::{ScenarioName, ScenarioRecord};
use itertools::Itertools;

use crate::cli::FrameTunnelCli;
use crate::context::{RunnerContext, ScenarioContext};
use crate::patch::EnvironmentPatch;

pub type HookResult = anyhow::Result<()>;

pub type GlobalHookMut = fn(&mut RunnerContext) -> HookResult;

/// A scenario runs once and produces exactly one record.
pub type ScenarioBehaviour = fn(&mut ScenarioContext) -> anyhow::Result<ScenarioRecord>;

#[derive(derive_more::Error, derive_more::Display, Debug, PartialEq, Eq)]
pub enum DefinitionError {
    #[display("No host environment was provided for [{name}]")]
    MissingEnvironment { name: String },
    #[display("Scenario [{scenario}] is already defined")]
    DuplicateScenario { scenario: ScenarioName },
    #[display("Scenario [{scenario}] was selected but is not defined")]
    UnknownSelection { scenario: ScenarioName },
    #[display("No scenarios are defined for [{name}]")]
    NoScenarios { name: String },
}

#[derive(Clone)]
pub(crate) struct ScenarioStep {
    pub(crate) name: ScenarioName,
    pub(crate) patch: Option<EnvironmentPatch>,
    pub(crate) behaviour: ScenarioBehaviour,
}

/// The builder for a scenario definition.
///
/// This must be used at the start of a test to define the scenarios that you want to run.
pub struct ScenarioDefinitionBuilder {
    /// The name of the test suite.
    ///
    /// Recommended value is `env!("CARGO_PKG_NAME")`.
    name: String,
    /// This value is initialised for you and you cannot change it.
    #[doc(hidden)]
    cli: FrameTunnelCli,
    /// The host the scenarios run against. Scenarios that need a different host receive a patched
    /// copy of this, it is never replaced.
    environment: Option<HostEnvironment>,
    /// Global setup hook, run once before the first scenario.
    setup_fn: Option<GlobalHookMut>,
    /// The scenarios, in the order they will run.
    scenarios: Vec<ScenarioStep>,
}

pub(crate) struct ScenarioDefinition {
    pub(crate) name: String,
    pub(crate) cli: FrameTunnelCli,
    pub(crate) environment: HostEnvironment,
    pub(crate) setup_fn: Option<GlobalHookMut>,
    pub(crate) scenarios: Vec<ScenarioStep>,
}

impl ScenarioDefinitionBuilder {
    /// Initialise a new scenario definition from the suite name and command line arguments.
    /// See the [ScenarioDefinitionBuilder::name] for more information about the name.
    pub fn new(name: &str, cli: FrameTunnelCli) -> Self {
        Self {
            name: name.to_string(),
            cli,
            environment: None,
            setup_fn: None,
            scenarios: Vec::new(),
        }
    }

    /// Set the host environment [ScenarioDefinitionBuilder::environment] the scenarios run against.
    pub fn with_environment(mut self, environment: HostEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set the global setup hook [ScenarioDefinitionBuilder::setup_fn] for this suite.
    pub fn use_setup(mut self, setup_fn: GlobalHookMut) -> Self {
        self.setup_fn = Some(setup_fn);
        self
    }

    /// Add a scenario that runs against the unpatched environment.
    pub fn use_scenario(self, name: ScenarioName, behaviour: ScenarioBehaviour) -> Self {
        self.push_scenario(name, None, behaviour)
    }

    /// Add a scenario that runs against a copy of the environment with `patch` applied.
    pub fn use_patched_scenario(
        self,
        name: ScenarioName,
        patch: EnvironmentPatch,
        behaviour: ScenarioBehaviour,
    ) -> Self {
        self.push_scenario(name, Some(patch), behaviour)
    }

    fn push_scenario(
        mut self,
        name: ScenarioName,
        patch: Option<EnvironmentPatch>,
        behaviour: ScenarioBehaviour,
    ) -> Self {
        self.scenarios.push(ScenarioStep {
            name,
            patch,
            behaviour,
        });
        self
    }

    pub(crate) fn build(self) -> Result<ScenarioDefinition, DefinitionError> {
        let environment = self
            .environment
            .ok_or_else(|| DefinitionError::MissingEnvironment {
                name: self.name.clone(),
            })?;

        if self.scenarios.is_empty() {
            return Err(DefinitionError::NoScenarios { name: self.name });
        }

        if let Some(duplicate) = self.scenarios.iter().map(|step| step.name).duplicates().next() {
            return Err(DefinitionError::DuplicateScenario {
                scenario: duplicate,
            });
        }

        if let Some(unknown) = self
            .cli
            .scenarios
            .iter()
            .find(|selected| !self.scenarios.iter().any(|step| step.name == **selected))
        {
            return Err(DefinitionError::UnknownSelection { scenario: *unknown });
        }

        let scenarios = if self.cli.scenarios.is_empty() {
            self.scenarios
        } else {
            self.scenarios
                .into_iter()
                .filter(|step| self.cli.scenarios.contains(&step.name))
                .collect()
        };

        Ok(ScenarioDefinition {
            name: self.name,
            cli: self.cli,
            environment,
            setup_fn: self.setup_fn,
            scenarios,
        })
    }
}
