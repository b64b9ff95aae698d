#[tokio::main]
async fn main() {
    if let Err(error) = sports_catalog_lib::run().await {
        eprintln!("sports-catalog failed: {}", error);
        std::process::exit(1);
    }
}
