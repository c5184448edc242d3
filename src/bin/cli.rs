use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    liftlog::cli::run().await?;
    Ok(())
}
