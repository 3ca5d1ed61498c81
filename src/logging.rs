use std::error::Error;
use std::fs::File;
use std::path::Path;

use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

/// Terminal logging through `env_logger` (honors `RUST_LOG`), or terminal
/// plus a debug-level file when `log_file` is given.
pub fn init(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        None => {
            env_logger::Builder::new()
                .target(env_logger::Target::Stderr)
                .filter_level(LevelFilter::Info)
                .parse_env("RUST_LOG")
                .try_init()?;
        }
        Some(path) => {
            let file = File::create(path)?;
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    Config::default(),
                    TerminalMode::Stderr,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, Config::default(), file),
            ])?;
        }
    }
    log::info!("Logger initialized");
    Ok(())
}
