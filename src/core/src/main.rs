use log::{error, info, LevelFilter};
use spacetimer::configuration::config::Config;
use spacetimer::controller::Controller;
use spacetimer::error_handling::types::ControllerError;

fn init_logging(level: LevelFilter) {
    // RUST_LOG, when set, refines the configured level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}

async fn run() -> Result<(), ControllerError> {
    let config = match Config::from_args() {
        Ok(config) => config,
        Err(e) => {
            init_logging(LevelFilter::Info);
            return Err(e.into());
        }
    };
    init_logging(config.log_level);

    info!("spacetimer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration imported successfully");

    let controller = Controller::new(config)?;
    controller.run().await
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}, exiting...", e);
        std::process::exit(1);
    }
}
