use std::sync::Arc;

use frame_tunnel_core::prelude::{HostEnvironment, ShutdownHandle};
use frame_tunnel_summary_model::ScenarioName;

use crate::executor::Executor;

/// State shared by every scenario in a run.
#[derive(Debug)]
pub struct RunnerContext {
    executor: Arc<Executor>,
    shutdown_handle: ShutdownHandle,
    environment: HostEnvironment,
}

impl RunnerContext {
    pub(crate) fn new(
        executor: Arc<Executor>,
        shutdown_handle: ShutdownHandle,
        environment: HostEnvironment,
    ) -> Self {
        Self {
            executor,
            shutdown_handle,
            environment,
        }
    }

    pub fn executor(&self) -> &Arc<Executor> {
        &self.executor
    }

    /// The unpatched host environment. Scenarios never replace it, patched environments are copies.
    pub fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    /// Stop the run after the current scenario. Records that have already been produced are kept.
    pub fn force_stop_scenario(&self) {
        self.shutdown_handle.shutdown();
    }
}

/// What a single scenario behaviour gets to work with.
pub struct ScenarioContext {
    name: ScenarioName,
    runner_context: Arc<RunnerContext>,
    environment: HostEnvironment,
}

impl ScenarioContext {
    pub(crate) fn new(
        name: ScenarioName,
        runner_context: Arc<RunnerContext>,
        environment: HostEnvironment,
    ) -> Self {
        Self {
            name,
            runner_context,
            environment,
        }
    }

    pub fn name(&self) -> ScenarioName {
        self.name
    }

    pub fn runner_context(&self) -> &Arc<RunnerContext> {
        &self.runner_context
    }

    pub fn executor(&self) -> &Arc<Executor> {
        self.runner_context.executor()
    }

    /// The environment for this scenario, with its patch applied if it has one.
    pub fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    /// The runner's unpatched environment.
    pub fn default_environment(&self) -> &HostEnvironment {
        self.runner_context.environment()
    }
}
