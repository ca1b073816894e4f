use anyhow::Context;
use frame_tunnel_core::prelude::ShutdownHandle;
use tokio::signal;

pub(crate) fn start_shutdown_listener(
    runtime: &tokio::runtime::Runtime,
) -> anyhow::Result<ShutdownHandle> {
    let handle = ShutdownHandle::default();

    let listener_handle = handle.clone();
    runtime.spawn(async move {
        match signal::ctrl_c().await.context("Failed to receive Ctrl-C signal") {
            Ok(()) => {
                listener_handle.shutdown();
                println!("Received shutdown signal, shutting down...");
            }
            Err(e) => log::error!("{e:?}"),
        }
    });

    Ok(handle)
}
