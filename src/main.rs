use dotenv::dotenv;
use tracing::{info, warn};

use openscholar_backend::app::app::App;
use openscholar_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Rolling file + console logging; guards must stay alive for the
    // lifetime of the process.
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("Starting OpenScholar backend");

    match dotenv() {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
