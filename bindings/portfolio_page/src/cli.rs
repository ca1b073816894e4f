use std::path::PathBuf;

use clap::{Args, Parser};
use frame_tunnel_core::prelude::DEFAULT_REFRESH_RATE_HZ;
use frame_tunnel_runner::prelude::FrameTunnelCli;

/// Options for the simulated host the page is rendered in.
#[derive(Args, Debug, Clone)]
pub struct PageOptions {
    /// A TOML file with the page content to render instead of the built-in content.
    #[clap(long)]
    pub content: Option<PathBuf>,

    /// The display refresh rate, in frames per second.
    #[clap(long, default_value_t = DEFAULT_REFRESH_RATE_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    pub refresh_rate: u32,

    /// Simulate a host without a memory API. Memory readings are reported as N/A.
    #[clap(long, default_value = "false")]
    pub no_memory_api: bool,

    /// Start with the user's reduced motion preference already set.
    #[clap(long, default_value = "false")]
    pub prefers_reduced_motion: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            content: None,
            refresh_rate: DEFAULT_REFRESH_RATE_HZ,
            no_memory_api: false,
            prefers_reduced_motion: false,
        }
    }
}

/// The runner's command line together with the page options.
#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
pub struct PortfolioCli {
    #[command(flatten)]
    pub runner: FrameTunnelCli,

    #[command(flatten)]
    pub page: PageOptions,
}
