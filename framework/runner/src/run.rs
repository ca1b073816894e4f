use std::sync::Arc;

use anyhow::Context;
use frame_tunnel_core::prelude::{
    HostEnvironment, MemoryReading, ScenarioBailError, ShutdownSignalError,
};
use frame_tunnel_instruments::{AnimationPerformanceMonitor, ReportConfig, Reporter};
use frame_tunnel_summary_model::{HostDescription, ResultsMap, RunSummary, ScenarioRecord};
use itertools::Itertools;

use crate::cli::ReporterOpt;
use crate::context::{RunnerContext, ScenarioContext};
use crate::definition::{ScenarioDefinitionBuilder, ScenarioStep};
use crate::executor::Executor;
use crate::monitor::start_monitor;
use crate::progress::scenario_progress;
use crate::shutdown::start_shutdown_listener;

/// Run the defined scenarios on a new multi-threaded runtime.
///
/// See [run_on].
pub fn run(definition: ScenarioDefinitionBuilder) -> anyhow::Result<ResultsMap> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;

    run_on(definition, runtime)
}

/// Run the defined scenarios one after another on `runtime`, returning the records they produced.
///
/// A scenario that fails is reported and the run moves on to the next one. A shutdown signal stops
/// the run, but the records of the scenarios that finished are still reported and returned. Only a
/// failing setup hook or an invalid definition fails the run as a whole.
pub fn run_on(
    definition: ScenarioDefinitionBuilder,
    runtime: tokio::runtime::Runtime,
) -> anyhow::Result<ResultsMap> {
    let definition = definition.build()?;

    log::info!("Running scenarios: {}", definition.name);

    let shutdown_handle = start_shutdown_listener(&runtime)?;
    let executor = Arc::new(Executor::new(runtime, shutdown_handle.clone()));
    let reporter = Arc::new(select_reporter(definition.cli.reporter));
    let mut runner_context = RunnerContext::new(
        executor,
        shutdown_handle.clone(),
        definition.environment.clone(),
    );

    if let Some(setup_fn) = definition.setup_fn {
        setup_fn(&mut runner_context)?;
    }

    let runner_context = Arc::new(runner_context);

    let mut summary = RunSummary::new(
        definition
            .cli
            .run_id
            .clone()
            .unwrap_or_else(|| nanoid::nanoid!()),
        chrono::Utc::now().timestamp(),
        definition.scenarios.iter().map(|step| step.name).collect(),
        describe_host(runner_context.environment()),
        env!("CARGO_PKG_VERSION").to_string(),
    );

    // Scenarios measure frame timing, so warn if the harness itself is busy enough to skew it.
    start_monitor(shutdown_handle.new_listener())?;

    let progress = scenario_progress(definition.scenarios.len(), definition.cli.no_progress);
    let mut monitor = AnimationPerformanceMonitor::new();
    let mut cycle_shutdown_receiver = shutdown_handle.new_listener();

    for step in &definition.scenarios {
        if cycle_shutdown_receiver.should_shutdown() {
            log::info!("Run stopped before scenario [{}]", step.name);
            break;
        }

        progress.set_message(step.name.as_str());
        log::info!("📊 Testing scenario: {}", step.name);

        match run_scenario(step, &runner_context, &mut monitor) {
            Ok(record) => {
                reporter.add_scenario(step.name, &record);
                summary.results.insert(step.name, record);
            }
            Err(e) if e.is::<ShutdownSignalError>() => {
                log::info!("Scenario [{}] was cancelled by shutdown", step.name);
                break;
            }
            Err(e) if e.is::<ScenarioBailError>() => {
                log::warn!("Scenario [{}] bailed: {}", step.name, e);
                reporter.add_failure(step.name, &e);
                summary.failed.push(step.name);
            }
            Err(e) => {
                log::error!("Scenario [{}] failed: {:?}", step.name, e);
                reporter.add_failure(step.name, &e);
                summary.failed.push(step.name);
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    let skipped = summary.skipped();
    if !skipped.is_empty() {
        log::warn!(
            "{} scenario(s) did not run: {}",
            skipped.len(),
            skipped.iter().join(", ")
        );
    }

    // Release the progress and resource monitor threads.
    shutdown_handle.shutdown();

    reporter.finalize(&summary);

    Ok(summary.results)
}

fn run_scenario(
    step: &ScenarioStep,
    runner_context: &Arc<RunnerContext>,
    monitor: &mut AnimationPerformanceMonitor,
) -> anyhow::Result<ScenarioRecord> {
    let default_environment = runner_context.environment();
    let environment = match step.patch {
        Some(patch) => patch.apply(default_environment),
        None => default_environment.clone(),
    };

    // The monitor gets its own copy of the patch so its frame requests don't consume the
    // scenario's throttling pattern.
    let monitor_environment = match step.patch {
        Some(patch) => patch.apply(default_environment),
        None => default_environment.clone(),
    };
    {
        let _runtime = runner_context.executor().enter();
        if let Err(e) =
            monitor.start_monitoring(step.name.as_str(), monitor_environment.frame_scheduler().clone())
        {
            log::warn!("Scenario [{}] runs without the performance monitor: {}", step.name, e);
        }
    }

    let mut context = ScenarioContext::new(step.name, runner_context.clone(), environment);
    let result = (step.behaviour)(&mut context);

    monitor.stop_monitoring();
    let samples = monitor.get_metrics(step.name.as_str());
    let monitored_fps = if samples.is_empty() {
        None
    } else {
        Some(monitor.get_average_fps(step.name.as_str()))
    };

    Ok(result?.with_monitored_fps(monitored_fps))
}

fn select_reporter(reporter: ReporterOpt) -> Reporter {
    match reporter {
        ReporterOpt::Summary => ReportConfig::default().enable_summary().init(),
        ReporterOpt::Json => ReportConfig::default().enable_json().init(),
        ReporterOpt::Noop => ReportConfig::default().init(),
    }
}

fn describe_host(environment: &HostEnvironment) -> HostDescription {
    HostDescription {
        refresh_rate_hz: environment.frame_scheduler().refresh_rate_hz(),
        scroll_height: environment.document().scroll_height(),
        memory_api: matches!(environment.memory().read(), MemoryReading::Available(_)),
        prefers_reduced_motion: environment.prefers_reduced_motion(),
    }
}
