#[tokio::main]
async fn main() {
    if let Err(e) = uiguide_lib::run().await {
        eprintln!("uiguide: {e}");
        std::process::exit(1);
    }
}
