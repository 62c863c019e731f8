#[tokio::main]
async fn main() {
    if let Err(e) = hospital_records_lib::run().await {
        tracing::error!("{e}");
        eprintln!("hospital-records: {e}");
        std::process::exit(1);
    }
}
