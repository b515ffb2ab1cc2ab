use anyhow::Context;
use circuit_board::config::toml_config::LogFormat;
use circuit_board::utils::error::{CircuitError, ErrorSeverity};
use circuit_board::utils::logger;
use circuit_board::{CliConfig, EditingSession, ScriptRunner};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};

fn exit_code(e: &CircuitError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: CircuitError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e).max(1));
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔要先載入才知道日誌格式
    let config = cli.resolve();
    let format = config
        .as_ref()
        .map(|c| c.logging.format)
        .unwrap_or_default();
    match format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("🚀 Starting circuit-board");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = config.unwrap_or_else(|e| fail(e));
    let session = EditingSession::with_settings(&config).unwrap_or_else(|e| fail(e));
    tracing::info!(
        "✅ {}x{} board ready, connectivity {:?}",
        config.grid.size,
        config.grid.size,
        config.analysis.connectivity
    );

    let mut runner = ScriptRunner::new(session, cli.json);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script '{}'", path.display()))?;
            runner.run(BufReader::new(file), &mut out)
        }
        None => runner.run(io::stdin().lock(), &mut out),
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                "📊 {} commands executed, {} failed, {} components on the board",
                summary.executed,
                summary.failed,
                runner.session().grid().component_count()
            );
            Ok(())
        }
        Err(e) => fail(e),
    }
}
