mod cli;
mod config;
mod error;
mod files;
mod logging;
mod output;
mod provider;

#[cfg(test)]
mod test_support;

use clap::Parser;

#[tokio::main]
async fn main() {
    // The API key may live in a local .env file.
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let code = cli.run().await;
    std::process::exit(code);
}
