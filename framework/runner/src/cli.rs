use clap::{Parser, ValueEnum};
use frame_tunnel_summary_model::ScenarioName;

#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
pub struct FrameTunnelCli {
    /// Only run the named scenario. Specify the flag multiple times to run several scenarios, for
    /// example `--scenario=normal-scroll --scenario=low-end-device`.
    ///
    /// Scenarios always run in their defined order, regardless of the order of the flags. If the
    /// flag is not given then every defined scenario runs.
    #[clap(long = "scenario", short, value_parser = parse_scenario_name)]
    pub scenarios: Vec<ScenarioName>,

    /// Where to report the results once the run is over.
    #[clap(long, value_enum, default_value_t = ReporterOpt::Summary)]
    pub reporter: ReporterOpt,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,

    /// Identifier for this run, included in the reported run summary. Generated if not provided.
    #[clap(long)]
    pub run_id: Option<String>,
}

#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReporterOpt {
    /// Print a table of results followed by optimization recommendations.
    #[default]
    Summary,
    /// Print the run summary as a single line of JSON.
    Json,
    /// Do not report anything, the results are only returned to the caller.
    Noop,
}

fn parse_scenario_name(s: &str) -> anyhow::Result<ScenarioName> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_scenarios() {
        let cli = FrameTunnelCli::try_parse_from([
            "frame-tunnel",
            "--scenario",
            "low-end-device",
            "-s",
            "normal-scroll",
            "--reporter",
            "json",
        ])
        .unwrap();

        assert_eq!(
            vec![ScenarioName::LowEndDevice, ScenarioName::NormalScroll],
            cli.scenarios
        );
        assert_eq!(ReporterOpt::Json, cli.reporter);
        assert!(!cli.no_progress);
    }

    #[test]
    fn rejects_unknown_scenarios() {
        let result = FrameTunnelCli::try_parse_from(["frame-tunnel", "--scenario", "slow-scroll"]);

        assert!(result.is_err());
    }
}
