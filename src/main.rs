use std::process::ExitCode;

use tracing::{error, info};

use aart::{Config, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let (mut config, load_error) = match Config::load("config.toml") {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Initialize logging
    if let Err(e) = aart::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        aart::logging::init_console_only(&config.logging.level);
    }

    if let Some(e) = load_error {
        info!("No usable config.toml ({e}); using default configuration");
    }

    // HOST and PORT are mandatory
    if let Err(e) = config.apply_env_overrides().and_then(|()| config.validate()) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    info!("aart world storage");

    let server = match WebServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to initialize storage: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Server configured on {}", server.bind_address());

    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
