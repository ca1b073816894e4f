mod cli;
mod content;
mod host;
mod page;
mod sections;

pub mod prelude {
    pub use crate::cli::{PageOptions, PortfolioCli};
    pub use crate::content::{About, Experience, Hero, SiteContent, Skills};
    pub use crate::host::PortfolioHost;
    pub use crate::page::{PortfolioPage, VIEWPORT_HEIGHT};
    pub use crate::sections::{section_initializer, HOVER_LIFT};

    /// Re-export of the `frame_tunnel_runner` prelude.
    ///
    /// This is for convenience so that you can depend on a single crate for the runner in your scenarios.
    pub use frame_tunnel_runner::prelude::*;

    /// Re-export of the host abstractions the page implements.
    pub use frame_tunnel_core::prelude::{
        Document, ElementId, FrameScheduler, MemoryProvider, PointerEvent, REDUCED_MOTION_QUERY,
    };
}
