mod cli;
use log::error;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // A missing .env file is fine, variables may come from the environment
    dotenvy::dotenv().ok();

    // Errors are logged only, the exit status stays 0
    if let Err(e) = cli::run().await {
        error!("Error: {e}");
    }
}
