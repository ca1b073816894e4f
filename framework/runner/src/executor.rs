use std::future::Future;

use frame_tunnel_core::prelude::{ShutdownHandle, ShutdownSignalError};

/// Owns the runtime that scenarios drive their frame loops on.
///
/// Scenario behaviours are synchronous functions, so every bit of async work they do goes through
/// [Executor::execute_in_place]. Tasks spawned along the way, like the performance monitor's frame
/// loop, only make progress while a scenario is blocked in there.
#[derive(Debug)]
pub struct Executor {
    runtime: tokio::runtime::Runtime,
    shutdown_handle: ShutdownHandle,
}

impl Executor {
    pub(crate) fn new(runtime: tokio::runtime::Runtime, shutdown_handle: ShutdownHandle) -> Self {
        Self {
            runtime,
            shutdown_handle,
        }
    }

    /// Block on `fut` until it completes or the run is shut down.
    ///
    /// A shutdown drops the future wherever it is waiting and returns a [ShutdownSignalError],
    /// which the runner treats as the end of the run rather than a scenario failure.
    pub fn execute_in_place<T>(
        &self,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> anyhow::Result<T> {
        let mut shutdown_listener = self.shutdown_handle.new_listener();

        self.runtime.block_on(async move {
            tokio::select! {
                biased;
                _ = shutdown_listener.wait_for_shutdown() => {
                    log::debug!("Cancelling in-flight scenario work");
                    Err(ShutdownSignalError::default().into())
                }
                result = fut => result,
            }
        })
    }

    /// Enter the runtime so that synchronous code can spawn onto it.
    pub fn enter(&self) -> tokio::runtime::EnterGuard<'_> {
        self.runtime.enter()
    }
}
