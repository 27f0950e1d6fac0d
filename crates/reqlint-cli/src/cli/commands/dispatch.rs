use super::super::args::*;
use crate::exit_codes;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Review(args) => super::review::run(args).await,
        Command::Rules(args) => super::rules::run(args),
        Command::Segment(args) => super::segment::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}
