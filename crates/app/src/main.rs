//! Courier - command-line entry point.
//!
//! Dispatches one request described on the command line and prints its
//! outcome: the value on stdout, a normalized error on stderr (exit 1), or
//! an abandonment notice (exit 2).

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use courier_application::ports::TokenStorage;
use courier_application::{CallOutcome, Dispatcher, DispatcherPorts, SessionState, SharedPage};
use courier_infrastructure::{
    InMemoryStorage, JsonFileStorage, ReqwestTransport, SettingsLoader, SpringSortSerializer,
    TracingLoadingIndicator, TracingNavigator, TracingNotifier,
};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let loader = cli
        .settings
        .as_ref()
        .map_or_else(SettingsLoader::new, SettingsLoader::from_path);
    let settings = loader.load().await?;

    let storage: Arc<dyn TokenStorage> = match &cli.storage {
        Some(path) => Arc::new(JsonFileStorage::open(path).await?),
        None => Arc::new(InMemoryStorage::new()),
    };

    let dispatcher = Dispatcher::new(
        &settings,
        DispatcherPorts {
            transport: Arc::new(ReqwestTransport::new(&settings)?),
            storage,
            notifier: Arc::new(if cli.auto_confirm {
                TracingNotifier::auto_confirming()
            } else {
                TracingNotifier::new()
            }),
            navigator: Arc::new(TracingNavigator::new()),
            loading: Arc::new(TracingLoadingIndicator::new()),
            sorter: Arc::new(SpringSortSerializer::new()),
            session: Arc::new(SessionState::new()),
        },
    );

    tracing::debug!(base_url = %settings.base_url, "dispatching");
    let page = cli.pagination().map(|p| Arc::new(SharedPage::new(p)));
    let mut options = cli.options();
    if let Some(page) = &page {
        options = options.page(page.clone());
    }
    let channel = dispatcher.send(options)?;

    let code = match channel.outcome().await {
        CallOutcome::Settled(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            if let Some(page) = page.map(|p| p.snapshot()) {
                tracing::info!(
                    page = page.page,
                    total_pages = page.total_pages,
                    total_elements = page.total_elements,
                    more = page.has_next(),
                    "page received"
                );
            }
            ExitCode::SUCCESS
        }
        CallOutcome::Failed(error) => {
            eprintln!("{}", serde_json::to_string_pretty(&error)?);
            ExitCode::from(1)
        }
        CallOutcome::Abandoned(reason) => {
            eprintln!("abandoned: {reason:?}");
            ExitCode::from(2)
        }
    };

    if let Some(delay) = cli.linger(&settings) {
        tokio::time::sleep(delay).await;
        tokio::task::yield_now().await;
    }
    Ok(code)
}
