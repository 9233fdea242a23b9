pub(crate) mod admin;
pub(crate) mod cli;
pub(crate) mod console;
pub(crate) mod core;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use crate::cli::Cli;
use crate::console::{terminal::Terminal, Console};
use crate::core::{config::Settings, session::AdminSession, telemetry};
use crate::services::http_client::HttpAdminApi;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load_with(cli.overrides())?;
    telemetry::init_tracing(&settings)?;

    let session = AdminSession::from_settings(&settings);
    if !session.is_authenticated() {
        tracing::warn!("No admin token configured; requests are sent without credentials");
    }

    let api = HttpAdminApi::from_settings(&settings, session.clone())?;

    tracing::info!(
        base_url = %settings.api().base_url.as_str(),
        environment = %settings.runtime().environment.as_str(),
        user = %session.display_name(),
        "Exam admin console starting"
    );

    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .with_shutdown(crate::core::shutdown::spawn_listener());
    let mut console = Console::new(Arc::new(api), session);
    console
        .run(&mut terminal)
        .await
        .context("console terminated with an I/O error")?;

    Ok(())
}
