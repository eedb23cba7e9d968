use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Build the registry for `settings` with every project module registered.
pub fn registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings)
        .with_context(|| "failed to register modules")?;
    Ok(registry)
}

/// Run the service until shutdown: init and start modules, serve HTTP, stop modules.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = shelf_http::start_server(&registry, &settings).await;
    if let Err(err) = &served {
        tracing::error!(error = %err, "HTTP server exited with error");
    }

    registry.stop_modules().await?;
    served
}
