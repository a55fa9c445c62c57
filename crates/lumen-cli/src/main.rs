use clap::Parser;
use lumen_cli::{CliArgs, LumenCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = LumenCli::from_args("lumen", &args)?;
    cli.run(args).await?;
    Ok(())
}
