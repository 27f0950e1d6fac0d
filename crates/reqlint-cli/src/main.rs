use clap::Parser;
use reqlint_core::errors::find_review_error;
use tracing_subscriber::EnvFilter;

mod cli;
pub mod exit_codes;

use cli::args::Cli;
use cli::commands::dispatch;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => match find_review_error(&e) {
            Some(err) => {
                eprintln!("error: {err}");
                exit_codes::CONFIG_ERROR
            }
            _ => {
                eprintln!("unexpected error: {e:#}");
                exit_codes::INTERNAL_ERROR
            }
        },
    };
    std::process::exit(code);
}
