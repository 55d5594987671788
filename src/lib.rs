//! LIBRIS application library
//!
//! Wires the project modules into the kernel registry and runs the HTTP
//! server over them.

pub mod modules;
pub mod utils;

use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::books::{models::Book, models::PagedResult, store::BookStore};

/// Build a registry holding every project module
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Run the module lifecycle around the HTTP server until shutdown
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    serve_registry(&registry, &settings).await
}

/// Initialize, start, serve and stop the modules of `registry`
pub async fn serve_registry(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let ctx = InitCtx { settings };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = libris_http::start_server(registry, settings).await;

    // Stop modules even when the server exits with an error.
    let stopped = registry.stop_all().await;
    shutdown_outcome(served, stopped)
}

/// A server error takes precedence; a stop failure behind it is logged and
/// attached as context so neither is lost.
fn shutdown_outcome(
    served: anyhow::Result<()>,
    stopped: anyhow::Result<()>,
) -> anyhow::Result<()> {
    match (served, stopped) {
        (Err(serve_err), Err(stop_err)) => {
            tracing::error!(
                error = %format!("{stop_err:#}"),
                "modules failed to stop after server error"
            );
            Err(serve_err.context(format!("modules also failed to stop: {stop_err:#}")))
        }
        (Err(serve_err), Ok(())) => Err(serve_err),
        (Ok(()), stopped) => stopped,
    }
}
