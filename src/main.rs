//=========================================================================
// Lanebound: Binary
//
// Usage: lanebound [config.toml]
//
// Logging is controlled through `RUST_LOG` (defaults to `info`).
//
//=========================================================================

use std::process::ExitCode;

use log::error;

use lanebound::{EngineBuilder, EngineError};

fn run() -> Result<(), EngineError> {
    let builder = match std::env::args().nth(1) {
        Some(path) => EngineBuilder::new().with_config_file(path)?,
        None => EngineBuilder::new(),
    };
    builder.build().run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
