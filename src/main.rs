use anyhow::Result;
use clap::Parser;

use folio::cli::Cli;
use folio::logger;

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	logger::init(cli.verbose);
	cli.run().await
}
