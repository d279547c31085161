use anyhow::Context;
use clap::Parser;
use pick_sheet::domain::model::{GroupStatus, RunReport};
use pick_sheet::utils::error::ErrorSeverity;
use pick_sheet::utils::{logger, validation::Validate};
use pick_sheet::{
    CliArgs, HeaderProbe, LocalStorage, PickSheetPipeline, RipClient, SheetConfig, SheetEngine,
};

fn print_report(report: &RunReport) {
    for line in &report.summary {
        let note = match line.status {
            GroupStatus::Queued => "",
            GroupStatus::Unresolved => "  (no artwork, skipped)",
            GroupStatus::NotQueued => "  (size not printed)",
        };
        println!("{}: {}{}", line.group, line.count, note);
    }
    for degraded in &report.degraded {
        println!("⚠️ {} used fallback height: {}", degraded.artifact, degraded.reason);
    }
    println!("✅ Placed {} prints", report.placed);
    println!("📁 Output saved to: {}", report.output_path);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match SheetConfig::load(&args).context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.monitoring.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting pick-sheet");
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 Run monitoring enabled");
    }

    if config.submission_enabled() {
        tracing::info!(
            "🖨️ Jobs go to print unit {} via {}",
            config.rip.print_unit,
            config.rip.controller_url.as_deref().unwrap_or_default()
        );
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let submitter = RipClient::from_config(&config.rip)?;
    let mut pipeline = PickSheetPipeline::new(storage, HeaderProbe, config);
    if let Some(client) = submitter {
        pipeline = pipeline.with_submitter(Box::new(client));
    }

    let engine = SheetEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Pick sheet completed successfully!");
            print_report(&report);
        }
        Err(e) => {
            tracing::error!(
                "❌ Pick sheet failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
