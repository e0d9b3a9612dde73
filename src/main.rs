use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use candle_oracle::{Cli, ErrorJournal, run_session};

fn main() -> Result<()> {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Error journal (capped, persisted)
    let journal_path = args
        .error_log
        .clone()
        .unwrap_or_else(ErrorJournal::default_path);
    let mut journal = ErrorJournal::open(&journal_path)
        .with_context(|| format!("Failed to open error journal {}", journal_path.display()))?;

    // D. Run the session
    let report = match run_session(&args) {
        Ok(report) => report,
        Err(e) => {
            if let Err(journal_err) = journal.record("cli", format!("{:#}", e), Utc::now()) {
                log::error!("⚠️  Failed to write error journal: {}", journal_err);
            }
            return Err(e);
        }
    };

    for error in &report.errors {
        if let Err(journal_err) = journal.record("engine", error.clone(), Utc::now()) {
            log::error!("⚠️  Failed to write error journal: {}", journal_err);
        }
    }

    // E. Present
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
