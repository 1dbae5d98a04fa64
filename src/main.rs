use anyhow::{Context, Result};
use calc_repl::{repl, CalculatorConfig, Calculator, JsonFileStore, LoggingObserver};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &CalculatorConfig) {
    let file = match config.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => std::fs::create_dir_all(dir),
        None => Ok(()),
    }
    .and_then(|_| OpenOptions::new().create(true).append(true).open(&config.log_file));
    match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!(path = %config.log_file.display(), error = %e, "cannot open log file, logging to stderr");
        }
    }
}

fn main() -> Result<()> {
    let config = CalculatorConfig::from_env().context("invalid calculator configuration")?;
    init_logging(&config);
    tracing::info!(?config, "starting calculator");

    let store = JsonFileStore::new(config.history_file.clone());
    let mut calc = Calculator::new(config, Box::new(store));
    calc.add_observer(Box::new(LoggingObserver));
    calc.load_on_startup();

    repl::start_repl(&mut calc)
}
