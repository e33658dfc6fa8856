use anyhow::Context;
use clap::Parser;
use country_stats::core::{ConfigProvider, CountryStore};
use country_stats::utils::error::ErrorSeverity;
use country_stats::utils::logger;
use country_stats::{
    CliConfig, FileStore, LocalStorage, Prompter, ReportFormat, StatisticsReport, StatsError,
};
use tokio::io::BufReader;

fn exit_code(e: &StatsError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: StatsError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            fail(e);
        }
    };

    if settings.log_json() {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting country-stats");
    tracing::debug!("Settings: {:?}", settings);

    let storage = LocalStorage::new(".");
    let store = match FileStore::open(storage, settings.data_path(), settings.data_format()).await
    {
        Ok(store) => store,
        Err(e) => fail(e),
    };
    tracing::info!(
        "📁 {} countries loaded from {}",
        store.countries().len(),
        store.path()
    );

    if let Some(format) = cli.report {
        let countries = store.fetch_all().await?;
        let report = StatisticsReport::compute(&countries, settings.correlation_mode());
        match format {
            ReportFormat::Text => print!("{}", report.render_text()),
            ReportFormat::Json => println!(
                "{}",
                report.to_json().context("failed to serialize statistics report")?
            ),
        }
        return Ok(());
    }

    let reader = BufReader::new(tokio::io::stdin());
    let mut prompter = Prompter::new(
        reader,
        tokio::io::stdout(),
        store,
        settings.correlation_mode(),
    );

    if let Err(e) = prompter.run().await {
        fail(e);
    }

    tracing::info!("👋 Bye");
    Ok(())
}
