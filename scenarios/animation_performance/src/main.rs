use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use frame_tunnel_instruments::{
    check_animations_disabled, measure_fps_during, measure_memory_usage, simulate_scroll,
    ABOUT_ANIMATED_SELECTOR, HERO_ANIMATED_SELECTOR, SKILLS_ANIMATED_SELECTOR,
};
use portfolio_page::prelude::*;
use tokio::time::Instant;

const NORMAL_SCROLL_DURATION: Duration = Duration::from_millis(2000);
const FAST_SCROLL_DURATION: Duration = Duration::from_millis(500);
const REDUCED_MOTION_SCROLL_DURATION: Duration = Duration::from_millis(1500);
const LOW_END_SCROLL_DURATION: Duration = Duration::from_millis(2000);

const HOVER_SKILL_ITEMS: usize = 5;
const HOVER_EXPERIENCE_CARDS: usize = 3;
const HOVER_DWELL: Duration = Duration::from_millis(200);
const HOVER_GAP: Duration = Duration::from_millis(100);

fn setup(ctx: &mut RunnerContext) -> HookResult {
    log::info!("🚀 Starting Animation Performance Tests...");

    let document = ctx.environment().document();
    for (group, selector) in [
        ("hero", HERO_ANIMATED_SELECTOR),
        ("skills", SKILLS_ANIMATED_SELECTOR),
        ("about", ABOUT_ANIMATED_SELECTOR),
        ("experience", ".experience-card"),
    ] {
        log::info!(
            "Found {} animated {group} elements",
            document.query_selector_all(selector).len()
        );
    }
    log::info!("Page is {}px tall", document.scroll_height());

    Ok(())
}

fn normal_scroll(ctx: &mut ScenarioContext) -> anyhow::Result<ScenarioRecord> {
    scroll_scenario(ctx, NORMAL_SCROLL_DURATION)
}

fn fast_scroll(ctx: &mut ScenarioContext) -> anyhow::Result<ScenarioRecord> {
    scroll_scenario(ctx, FAST_SCROLL_DURATION)
}

fn hover_interactions(ctx: &mut ScenarioContext) -> anyhow::Result<ScenarioRecord> {
    let environment = ctx.environment().clone();
    let document = environment.document().clone();

    let targets = document
        .query_selector_all(".skill-item")
        .into_iter()
        .take(HOVER_SKILL_ITEMS)
        .chain(
            document
                .query_selector_all(".experience-card")
                .into_iter()
                .take(HOVER_EXPERIENCE_CARDS),
        )
        .collect::<Vec<_>>();
    log::debug!("[{}] hovering over {} elements", ctx.name(), targets.len());

    ctx.executor().execute_in_place(async move {
        measure(&environment, async {
            for element in targets {
                document.dispatch_event(element, PointerEvent::Enter);
                tokio::time::sleep(HOVER_DWELL).await;
                document.dispatch_event(element, PointerEvent::Leave);
                tokio::time::sleep(HOVER_GAP).await;
            }
            Ok(())
        })
        .await
    })
}

fn reduced_motion(ctx: &mut ScenarioContext) -> anyhow::Result<ScenarioRecord> {
    let environment = ctx.environment().clone();

    let outcome = (|| -> anyhow::Result<ScenarioRecord> {
        let initialized = environment
            .run_initializers()
            .context("Failed to re-initialize sections with reduced motion")?;
        log::debug!("Re-initialized {initialized} sections with reduced motion");

        let record = ctx.executor().execute_in_place(async {
            measure(
                &environment,
                scroll_through(&environment, REDUCED_MOTION_SCROLL_DURATION),
            )
            .await
        })?;

        let disabled = check_animations_disabled(environment.document().as_ref());
        Ok(record.with_animations_disabled(disabled))
    })();

    // Later scenarios expect the page animated again, whatever happened above.
    let restored = ctx
        .default_environment()
        .run_initializers()
        .context("Failed to restore section animations after reduced motion");

    let record = outcome?;
    restored?;

    Ok(record)
}

fn low_end_device(ctx: &mut ScenarioContext) -> anyhow::Result<ScenarioRecord> {
    Ok(scroll_scenario(ctx, LOW_END_SCROLL_DURATION)?.with_throttled(true))
}

fn scroll_scenario(ctx: &mut ScenarioContext, duration: Duration) -> anyhow::Result<ScenarioRecord> {
    let environment = ctx.environment().clone();
    log::debug!("[{}] scrolling the page over {duration:?}", ctx.name());

    ctx.executor().execute_in_place(async move {
        measure(&environment, scroll_through(&environment, duration)).await
    })
}

async fn scroll_through(environment: &HostEnvironment, duration: Duration) -> anyhow::Result<()> {
    let height = environment.document().scroll_height();
    let frames = simulate_scroll(environment, 0.0, height, duration).await;
    log::debug!("Scrolled {height}px over {duration:?} in {frames} frames");

    Ok(())
}

/// Time `action` while counting frames, then read memory once it has settled.
async fn measure<F>(environment: &HostEnvironment, action: F) -> anyhow::Result<ScenarioRecord>
where
    F: Future<Output = anyhow::Result<()>>,
{
    let elapsed = Cell::new(Duration::ZERO);
    let fps = measure_fps_during(environment.frame_scheduler().clone(), async {
        let start = Instant::now();
        action.await?;
        elapsed.set(start.elapsed());
        Ok(())
    })
    .await?;

    let memory_usage = measure_memory_usage(environment.memory().as_ref());

    Ok(ScenarioRecord::new(
        elapsed.get().as_secs_f64() * 1000.0,
        fps,
        memory_usage,
    ))
}

fn definition(cli: FrameTunnelCli, environment: HostEnvironment) -> ScenarioDefinitionBuilder {
    ScenarioDefinitionBuilder::new(env!("CARGO_PKG_NAME"), cli)
        .with_environment(environment)
        .use_setup(setup)
        .use_scenario(ScenarioName::NormalScroll, normal_scroll)
        .use_scenario(ScenarioName::FastScroll, fast_scroll)
        .use_scenario(ScenarioName::HoverInteractions, hover_interactions)
        .use_patched_scenario(
            ScenarioName::ReducedMotion,
            EnvironmentPatch::ReducedMotion,
            reduced_motion,
        )
        .use_patched_scenario(
            ScenarioName::LowEndDevice,
            EnvironmentPatch::low_end_device(),
            low_end_device,
        )
}

fn log_inventory(page: &PortfolioPage) {
    for (section, class, count) in page.inventory() {
        log::info!("{section}: {count} .{class}");
    }
}

fn main() -> FrameTunnelResult<()> {
    let cli = init::<PortfolioCli>();
    let host = PortfolioHost::build(&cli.page)?;
    log_inventory(host.page());

    run(definition(cli.runner, host.into_environment()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .start_paused(true)
            .build()
            .unwrap()
    }

    fn cli(scenarios: Vec<ScenarioName>) -> FrameTunnelCli {
        FrameTunnelCli {
            scenarios,
            reporter: ReporterOpt::Noop,
            no_progress: true,
            run_id: None,
        }
    }

    fn host() -> PortfolioHost {
        PortfolioHost::build(&PageOptions {
            refresh_rate: 50,
            no_memory_api: true,
            ..Default::default()
        })
        .unwrap()
    }

    fn assert_between(value: f64, low: f64, high: f64) {
        assert!(low <= value && value <= high, "{value} not in [{low}, {high}]");
    }

    #[test]
    fn runs_every_scenario_in_order() {
        let host = host();

        let results = run_on(definition(cli(vec![]), host.environment().clone()), runtime()).unwrap();

        assert_eq!(ScenarioName::ALL.to_vec(), results.names());
        for (name, record) in results.iter() {
            assert!(record.memory_usage.is_unsupported(), "{name}");
            if name != ScenarioName::LowEndDevice {
                assert!(matches!(record.fps, Some(49..=50)), "{name}: {:?}", record.fps);
            }
        }

        let duration = |name| results.get(name).unwrap().duration_ms;
        assert_between(duration(ScenarioName::NormalScroll), 2000.0, 2020.0);
        assert_between(duration(ScenarioName::FastScroll), 500.0, 520.0);
        assert_between(duration(ScenarioName::HoverInteractions), 2399.0, 2401.0);
        assert_between(duration(ScenarioName::ReducedMotion), 1500.0, 1520.0);
        assert_between(duration(ScenarioName::LowEndDevice), 2000.0, 2060.0);
    }

    #[test]
    fn reduced_motion_is_checked_and_then_restored() {
        let host = host();

        let results = run_on(
            definition(cli(vec![ScenarioName::ReducedMotion]), host.environment().clone()),
            runtime(),
        )
        .unwrap();

        let record = results.get(ScenarioName::ReducedMotion).unwrap();
        assert_eq!(
            Some(AnimationsDisabled {
                hero: true,
                skills: true,
                about: true,
            }),
            record.animations_disabled
        );
        assert_eq!(None, record.throttled);

        let after = check_animations_disabled(host.page().as_ref());
        assert!(!after.hero && !after.skills && !after.about);
    }

    #[test]
    fn low_end_device_is_marked_throttled() {
        let host = host();

        let results = run_on(
            definition(
                cli(vec![ScenarioName::FastScroll, ScenarioName::LowEndDevice]),
                host.environment().clone(),
            ),
            runtime(),
        )
        .unwrap();

        assert_eq!(None, results.get(ScenarioName::FastScroll).unwrap().throttled);
        assert_eq!(Some(true), results.get(ScenarioName::LowEndDevice).unwrap().throttled);
        assert_eq!(None, results.get(ScenarioName::LowEndDevice).unwrap().animations_disabled);
    }

    #[test]
    fn scrolling_ends_at_the_bottom_of_the_page() {
        let host = host();

        run_on(
            definition(cli(vec![ScenarioName::FastScroll]), host.environment().clone()),
            runtime(),
        )
        .unwrap();

        assert_eq!(host.page().scroll_height(), host.page().scroll_top());
    }

    #[test]
    fn hovered_elements_are_left_at_rest() {
        let host = host();
        let page = host.page().clone();
        let listeners = page.listener_count();

        let results = run_on(
            definition(cli(vec![ScenarioName::HoverInteractions]), host.environment().clone()),
            runtime(),
        )
        .unwrap();

        assert_eq!(1, results.len());
        for card in page
            .query_selector_all(".experience-card")
            .into_iter()
            .take(HOVER_EXPERIENCE_CARDS)
        {
            assert_eq!(Some("none".to_string()), page.computed_style(card, "transform"));
        }
        for item in page.query_selector_all(".skill-item").into_iter().take(HOVER_SKILL_ITEMS) {
            assert_eq!(Some("auto".to_string()), page.computed_style(item, "will-change"));
        }
        assert_eq!(listeners, page.listener_count());
    }

    #[test]
    fn failed_reduced_motion_still_restores_the_page() {
        let host = host();
        let page_load = host
            .environment()
            .initializer(Section::Experience)
            .unwrap()
            .clone();
        let environment = host.environment().clone().with_initializer(
            Section::Experience,
            Arc::new(move |environment: &HostEnvironment| -> anyhow::Result<()> {
                if environment.prefers_reduced_motion() {
                    anyhow::bail!("Experience section cannot switch to reduced motion");
                }
                page_load(environment)
            }),
        );

        let results = run_on(
            definition(
                cli(vec![ScenarioName::ReducedMotion, ScenarioName::LowEndDevice]),
                environment,
            ),
            runtime(),
        )
        .unwrap();

        assert_eq!(vec![ScenarioName::LowEndDevice], results.names());
        let after = check_animations_disabled(host.page().as_ref());
        assert!(!after.hero && !after.skills && !after.about, "{after:?}");
    }
}
