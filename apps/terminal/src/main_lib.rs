use std::sync::Arc;

use commitments_api::HttpCommitmentsClient;
use commitments_dashboard::{DashboardConfig, DashboardController, DashboardView};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::render;

/// Installs the subscriber. Logs go to stderr because stdout carries the
/// rendered dashboard, and `log` records from the library crates are
/// forwarded through the same subscriber.
pub fn init_tracing() {
    let log_format =
        std::env::var("COMMITMENTS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_controller(config: &DashboardConfig) -> anyhow::Result<Arc<DashboardController>> {
    let api = HttpCommitmentsClient::with_timeout(&config.api_base_url, config.request_timeout)?;
    Ok(Arc::new(DashboardController::from_config(
        Arc::new(api),
        config,
    )))
}

/// Redraws the dashboard after every state change.
pub fn spawn_renderer(controller: Arc<DashboardController>) -> JoinHandle<()> {
    let mut events = controller.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log::debug!("Rendering after {:?}", event),
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("Renderer skipped {} events", skipped)
                }
                Err(RecvError::Closed) => break,
            }
            let view = DashboardView::from_snapshot(&controller.snapshot());
            println!("{}", render::render(&view));
        }
    })
}
