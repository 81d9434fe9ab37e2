#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    clinic_booking::run().await
}
