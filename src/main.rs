#[tokio::main]
async fn main() {
    if let Err(e) = club_site::start_server().await {
        tracing::error!("Gateway failed to start: {}", e);
        eprintln!("Gateway failed to start: {e}");
        std::process::exit(1);
    }
}
