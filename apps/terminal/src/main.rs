mod command;
mod main_lib;
mod render;

use std::sync::Arc;

use command::Command;
use commitments_dashboard::DashboardConfig;
use main_lib::{build_controller, init_tracing, spawn_renderer};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env()?;
    init_tracing();
    tracing::info!("Using commitments API at {}", config.api_base_url);

    let controller = build_controller(&config)?;
    let renderer = spawn_renderer(controller.clone());

    println!("{}", render::HELP);
    let mount = controller.clone();
    tokio::spawn(async move { mount.mount().await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", render::HELP),
            Ok(command) => dispatch(&controller, command),
            Err(message) => println!("{}", message),
        }
    }

    renderer.abort();
    Ok(())
}

/// Runs a command in the background so a slow load never blocks input.
fn dispatch(controller: &Arc<commitments_dashboard::DashboardController>, command: Command) {
    let controller = controller.clone();
    tokio::spawn(async move {
        match command {
            Command::Select(investor_id) => controller.select_investor(investor_id).await,
            Command::Filter(asset_class) => controller.select_asset_class(asset_class),
            Command::Refresh => controller.refresh_investors().await,
            Command::Focus => controller.window_focused().await,
            Command::Help | Command::Quit => {}
        }
    });
}
