//! # sproutd — sprout daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars) and validate it
//! - Construct the hardware adapters and the shared settings store
//! - Construct application services, injecting adapters via port traits
//! - Spawn the automation loop as a dedicated background task
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use sprout_adapter_camera_cli::CliCamera;
use sprout_adapter_fs_sensor::FsSensorReader;
use sprout_adapter_http_axum::state::AppState;
use sprout_adapter_output_cli::CliOutputGateway;
use sprout_app::control_loop::ControlLoop;
use sprout_app::services::actuator_service::ActuatorService;
use sprout_app::services::controller_service::ControllerService;
use sprout_app::services::sensor_service::SensorService;
use sprout_app::settings_store::SettingsStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Shared state
    let store = Arc::new(SettingsStore::new(
        config.controller_settings(),
        config.actuator_configs(),
        config.sensor_specs(),
    ));

    // Hardware adapters
    let sensors = FsSensorReader::new(&config.hardware.data_dir);
    let gateway = CliOutputGateway::new(&config.hardware.output_command)
        .with_timeout(config.command_timeout());
    let camera = CliCamera::new(
        &config.camera.command,
        config.camera.width,
        config.camera.height,
    );

    // Automation loop
    let control = ControlLoop::new(
        Arc::clone(&store),
        sensors.clone(),
        gateway.clone(),
        config.indicators(),
    );
    tokio::spawn(control.run());

    // HTTP
    let state = AppState::new(
        SensorService::new(Arc::clone(&store), sensors),
        ActuatorService::new(Arc::clone(&store), gateway.clone()),
        ControllerService::new(Arc::clone(&store), gateway, config.indicators()),
        camera,
    );
    let app = sprout_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "sproutd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::warn!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
