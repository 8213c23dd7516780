//! Questline daemon entry point.
//!
//! Registers the built-in objective types, loads quest templates, wires the
//! dispatcher to an in-process event bus, and runs the tick sweep until
//! shutdown. A host game server embeds the same pieces against its own
//! event bus and profile provider.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use questline_core::capability::StaticCapabilities;
use questline_core::clock::SystemClock;
use questline_engine::application::bus::InProcessEventBus;
use questline_engine::application::dispatch::Dispatcher;
use questline_engine::application::profiles::MemoryProfileProvider;
use questline_engine::application::registry::ObjectiveRegistry;
use questline_engine::application::tick::TickScheduler;
use questline_objectives::register_builtins;
use questline_templates::store::TemplateStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Questline daemon");

    // Read configuration from environment.
    let template_dir: PathBuf = std::env::var("QUESTLINE_TEMPLATE_DIR")
        .unwrap_or_else(|_| "core/quest".to_string())
        .into();
    let tick_seconds: u64 = std::env::var("QUESTLINE_TICK_SECONDS")
        .unwrap_or_else(|_| "1".to_string())
        .parse()
        .map_err(|e| format!("QUESTLINE_TICK_SECONDS must be a valid u64: {e}"))?;
    let capabilities: Vec<String> = std::env::var("QUESTLINE_CAPABILITIES")
        .unwrap_or_else(|_| "minecraft".to_string())
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect();
    let host_version: u32 = std::env::var("QUESTLINE_HOST_VERSION")
        .unwrap_or_else(|_| "1".to_string())
        .parse()
        .map_err(|e| format!("QUESTLINE_HOST_VERSION must be a valid u32: {e}"))?;

    // Register objective types, gated on host capabilities.
    let registry = Arc::new(ObjectiveRegistry::new());
    let host = StaticCapabilities::new(capabilities, host_version);
    let registered = register_builtins(&registry, &host);
    tracing::info!(registered, "objective types registered");

    // Load templates and publish the active set.
    let store = Arc::new(TemplateStore::new());
    let report = store.load_all(&template_dir, &registry)?;
    tracing::info!(
        loaded = report.loaded,
        duplicates = report.duplicate_ids,
        skipped = report.skipped,
        "template load complete"
    );

    // Wire the dispatcher to the in-process bus.
    let profiles = Arc::new(MemoryProfileProvider::new());
    let clock = Arc::new(SystemClock);
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&registry),
        Arc::clone(&profiles) as _,
        Arc::clone(&clock) as _,
    ));
    let bus = Arc::new(InProcessEventBus::new());
    dispatcher.subscribe_all(bus.as_ref());

    // Run the periodic sweep until ctrl-c.
    let scheduler = Arc::new(TickScheduler::new(
        Arc::clone(&profiles) as _,
        Arc::clone(&clock) as _,
    ));
    let sweep = scheduler.spawn(Duration::from_secs(tick_seconds));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    sweep.abort();

    Ok(())
}
