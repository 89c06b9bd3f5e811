//! Transfer Wizard: desktop shell for the transfer-asset wizard

use eframe::egui;
use eyre::WrapErr;

use transfer_wizard_adapters::{AccountFixture, LedgerAdapterConfig};
use transfer_wizard_core::WizardConfig;

mod app;
mod prompt;
mod state;
mod ui;

const DEMO_FIXTURE: &str = include_str!("../assets/demo_accounts.json");

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Transfer Wizard");

    let wizard_config = WizardConfig::from_env();
    let ledger_config = LedgerAdapterConfig::from_env();
    let fixture = load_fixture(&ledger_config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Transfer Wizard")
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Transfer Wizard",
        native_options,
        Box::new(move |_cc| {
            let app = app::App::new(wizard_config, ledger_config, fixture)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| eyre::eyre!("GUI exited with an error: {e}"))
}

fn load_fixture(config: &LedgerAdapterConfig) -> eyre::Result<AccountFixture> {
    let json = match &config.fixture_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading account fixture");
            std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading account fixture {}", path.display()))?
        }
        None => DEMO_FIXTURE.to_owned(),
    };
    AccountFixture::from_json(&json).wrap_err("parsing account fixture")
}
