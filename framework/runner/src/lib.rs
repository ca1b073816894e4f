mod cli;
mod context;
mod definition;
mod executor;
mod init;
mod monitor;
mod patch;
mod progress;
mod run;
mod shutdown;
mod types;

pub mod prelude {
    pub use crate::cli::{FrameTunnelCli, ReporterOpt};
    pub use crate::context::{RunnerContext, ScenarioContext};
    pub use crate::definition::{
        DefinitionError, HookResult, ScenarioBehaviour, ScenarioDefinitionBuilder,
    };
    pub use crate::executor::Executor;
    pub use crate::init::init;
    pub use crate::patch::{
        EnvironmentPatch, ReducedMotionMatcher, ThrottledFrameScheduler, LOW_END_FRAME_DELAY,
    };
    pub use crate::run::{run, run_on};
    pub use crate::types::FrameTunnelResult;

    pub use frame_tunnel_core::prelude::{
        HostEnvironment, ScenarioBailError, Section, ShutdownSignalError,
    };
    pub use frame_tunnel_summary_model::{
        AnimationsDisabled, MemorySnapshot, ResultsMap, ScenarioName, ScenarioRecord,
    };
}
