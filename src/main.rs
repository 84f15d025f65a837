#[tokio::main]
async fn main() -> anyhow::Result<()> {
    companion_relay::run().await
}
