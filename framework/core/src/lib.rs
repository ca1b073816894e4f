mod bail;
mod environment;
mod frame;
mod host;
mod shutdown;

pub mod prelude {
    pub use crate::bail::ScenarioBailError;
    pub use crate::environment::{GcHint, HostEnvironment};
    pub use crate::frame::{FrameFuture, FrameScheduler, VsyncFrameScheduler, DEFAULT_REFRESH_RATE_HZ};
    pub use crate::host::{
        Document, ElementId, EventHandler, MediaMatcher, MemoryProvider, MemoryReading,
        PointerEvent, Section, SectionInitializer, StaticMediaMatcher, UnavailableMemory,
        REDUCED_MOTION_QUERY,
    };
    pub use crate::shutdown::{DelegatedShutdownListener, ShutdownHandle, ShutdownSignalError};
}
