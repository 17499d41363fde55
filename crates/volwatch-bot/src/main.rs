mod error;

use std::sync::Arc;

use log::info;

use volwatch_core::{
    ReqwestHttpClient, RunReport, Settings, TelegramNotifier, Universe, YahooHistory,
};

use crate::error::BotError;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

async fn run() -> Result<(), BotError> {
    // Credentials first: a missing variable must abort before any network
    // activity.
    let settings = Settings::from_env()?;

    let http_client = Arc::new(ReqwestHttpClient::new());
    let provider = YahooHistory::new(http_client.clone());
    let notifier = TelegramNotifier::new(http_client, settings.bot_token, settings.chat_id);
    let universe = Universe::default_watchlist();

    let report = volwatch_core::run(&universe, &provider, &notifier).await?;
    summarize(&report);

    Ok(())
}

fn summarize(report: &RunReport) {
    let delivered = report
        .alerts
        .iter()
        .filter(|alert| alert.delivery.is_delivered())
        .count();

    info!(
        "run complete: {} evaluated, {} skipped, {} alerts ({} delivered)",
        report.evaluated,
        report.skipped.len(),
        report.alerts.len(),
        delivered,
    );
}
