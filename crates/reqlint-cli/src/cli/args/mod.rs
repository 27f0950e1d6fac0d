use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use reqlint_core::config::ProviderKind;
use reqlint_core::EvaluationRule;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "reqlint",
    version,
    about = "Expression-quality review for requirements documents, driven by an LLM"
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Review a .docx, .pdf, .txt or .md document and write a report
    Review(ReviewArgs),
    /// List the evaluation rule catalog
    Rules(RulesArgs),
    /// Preview how a document splits into chapters (no model calls)
    Segment(SegmentArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReviewArgs {
    /// Document to review
    pub file: PathBuf,

    /// Rule to apply; repeat or comma-separate (see `reqlint rules`)
    #[arg(short = 'r', long = "rule", value_delimiter = ',')]
    pub rules: Vec<EvaluationRule>,

    /// Apply every rule in the catalog
    #[arg(long, conflicts_with = "rules")]
    pub all_rules: bool,

    /// Config file (default: ./reqlint.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model provider: azure | openai | fake
    #[arg(long, env = "REQLINT_PROVIDER")]
    pub provider: Option<ProviderKind>,

    /// Model id (openai) or deployment name (azure)
    #[arg(long, env = "REQLINT_MODEL")]
    pub model: Option<String>,

    /// Output token budget per request
    #[arg(long, env = "REQLINT_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// Chapters evaluated concurrently (1 = sequential)
    #[arg(long, env = "REQLINT_PARALLEL")]
    pub parallel: Option<usize>,

    /// Report path (default: evaluation_result.md, or .json with --format json)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub format: ReportFormat,

    /// Print the report to stdout instead of writing a file
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,

    /// Include every evaluated sentence, not only the flagged ones
    #[arg(long)]
    pub full_transcript: bool,

    /// Exit with code 1 when at least one issue was found
    #[arg(long)]
    pub fail_on_issues: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RulesArgs {
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SegmentArgs {
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}
