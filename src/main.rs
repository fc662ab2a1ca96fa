#[tokio::main]
async fn main() -> anyhow::Result<()> {
    coursewise::app::run().await
}
