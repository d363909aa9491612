use clap::Parser;
use tokio::io::BufReader;

use quiz_client::{
    app_state::AppState,
    cli::{Cli, Shell},
    config::Config,
    errors::AppError,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(username) = cli.username {
        config.username = Some(username);
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }

    let app = AppState::new(config)?;
    log::info!("Using quiz backend at {}", app.config.api_base_url);

    let mut shell = Shell::new(app, BufReader::new(tokio::io::stdin()), std::io::stdout());
    shell.run().await
}
