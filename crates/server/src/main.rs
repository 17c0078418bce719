#[tokio::main]
async fn main() -> anyhow::Result<()> {
    notes_server::run().await
}
