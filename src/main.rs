use clap::Parser;
use klarna_checkout::application::checkout::{CheckoutOutcome, KlarnaCheckout};
use klarna_checkout::config::{CheckoutConfig, DEFAULT_CONTAINER, DEFAULT_GATEWAY_PROVIDER};
use klarna_checkout::domain::locale::LocaleTag;
use klarna_checkout::domain::order::Order;
use klarna_checkout::infrastructure::in_memory::{InMemoryStorefront, ServiceCall};
use klarna_checkout::interfaces::json::scenario::ScenarioReader;
use klarna_checkout::logging::init_logging;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario JSON file describing the storefront state
    scenario: PathBuf,

    /// Gateway provider name of the payment configuration to use
    #[arg(long, default_value = DEFAULT_GATEWAY_PROVIDER)]
    provider: String,

    /// Container the payment widget is rendered into
    #[arg(long, default_value = DEFAULT_CONTAINER)]
    container: String,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    #[serde(flatten)]
    outcome: CheckoutOutcome,
    locale: Option<LocaleTag>,
    draft_order: Option<Order>,
    rendered_html: Option<String>,
    calls: Vec<ServiceCall>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json_logs);

    let file = File::open(&cli.scenario).into_diagnostic()?;
    let scenario = ScenarioReader::new(file).scenario().into_diagnostic()?;

    let storefront = InMemoryStorefront::new(scenario);
    let config = CheckoutConfig::default()
        .with_gateway_provider(cli.provider)
        .with_container(cli.container);
    let checkout = KlarnaCheckout::new(storefront.services(), config);

    let run = checkout.initialize().await;
    checkout.flush_logs().await;

    let report = RunReport {
        outcome: run.outcome,
        locale: run.context.locale,
        draft_order: run.context.draft_order,
        rendered_html: storefront.rendered(&checkout.config().container).await,
        calls: storefront.calls().await,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).into_diagnostic()?;
    writeln!(out).into_diagnostic()?;

    Ok(())
}
