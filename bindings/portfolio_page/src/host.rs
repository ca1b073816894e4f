use std::sync::Arc;

use frame_tunnel_core::prelude::{
    Document, HostEnvironment, Section, StaticMediaMatcher, UnavailableMemory,
    VsyncFrameScheduler, REDUCED_MOTION_QUERY,
};
use frame_tunnel_instruments::ProcessMemoryProvider;
use itertools::Itertools;

use crate::cli::PageOptions;
use crate::content::SiteContent;
use crate::page::PortfolioPage;
use crate::sections::section_initializer;

/// The portfolio page wired into a host environment, as it is after the page has loaded.
pub struct PortfolioHost {
    page: Arc<PortfolioPage>,
    environment: HostEnvironment,
}

impl PortfolioHost {
    /// Load the content named by `options`, or the built-in content, and build the host.
    pub fn build(options: &PageOptions) -> anyhow::Result<Self> {
        let content = match &options.content {
            Some(path) => SiteContent::load(path)?,
            None => SiteContent::builtin()?,
        };

        Self::build_with_content(&content, options)
    }

    pub fn build_with_content(content: &SiteContent, options: &PageOptions) -> anyhow::Result<Self> {
        let page = Arc::new(PortfolioPage::new(content));

        let mut environment = HostEnvironment::new(
            page.clone(),
            Arc::new(VsyncFrameScheduler::new(options.refresh_rate)),
        );

        if options.prefers_reduced_motion {
            environment = environment
                .with_media_matcher(Arc::new(StaticMediaMatcher::new([REDUCED_MOTION_QUERY])));
        }

        environment = if options.no_memory_api {
            environment.with_memory_provider(Arc::new(UnavailableMemory))
        } else {
            environment.with_memory_provider(Arc::new(ProcessMemoryProvider::new()))
        };

        let gc_page = Arc::downgrade(&page);
        environment = environment.with_gc_hint(Arc::new(move || {
            if let Some(page) = gc_page.upgrade() {
                page.collect_garbage();
            }
        }));

        for section in Section::ALL {
            environment = environment.with_initializer(section, section_initializer(&page, section));
        }

        // Page load.
        let initialized = environment.run_initializers()?;
        log::debug!(
            "Loaded portfolio page for [{}]: {initialized} sections initialized, {}px tall ({})",
            content.hero.name,
            page.scroll_height(),
            Section::ALL
                .iter()
                .map(|section| format!("{section} {}px", page.section_height(*section)))
                .join(", ")
        );

        Ok(Self { page, environment })
    }

    pub fn page(&self) -> &Arc<PortfolioPage> {
        &self.page
    }

    pub fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    pub fn into_environment(self) -> HostEnvironment {
        self.environment
    }
}
