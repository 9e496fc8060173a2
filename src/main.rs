#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = interndesk_rust::run().await {
        eprintln!("interndesk-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
