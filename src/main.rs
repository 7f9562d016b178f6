#[tokio::main]
async fn main() -> anyhow::Result<()> {
    timefighter_lib::run().await
}
