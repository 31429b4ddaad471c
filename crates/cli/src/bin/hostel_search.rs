use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hostel_cli::main_entry().await
}
