use crate::cli::args::{ReportFormat, ReviewArgs};
use crate::exit_codes;
use anyhow::Context;
use reqlint_core::config::{load_config, ReviewConfig, ServiceConfig};
use reqlint_core::engine::ReviewRunner;
use reqlint_core::extract::extract_text;
use reqlint_core::providers::llm::build_client;
use reqlint_core::report::{console, json, markdown};
use reqlint_core::review::EvaluationClient;
use reqlint_core::{ReviewError, RuleSet};
use std::path::PathBuf;

pub async fn run(args: ReviewArgs) -> anyhow::Result<i32> {
    // 1. Pre-flight: document, config, rules, credentials, network policy
    if !args.file.is_file() {
        return Err(ReviewError::extract(&args.file, "file not found").into());
    }
    let cfg = resolve_config(&args)?;
    let rules = resolve_rules(&args, &cfg)?;
    let service = ServiceConfig::from_env_and_config(&cfg)?;
    let client = EvaluationClient::new(build_client(&service)?);

    // 2. Extract + run
    let text = extract_text(&args.file)?;
    let runner = ReviewRunner::new(client, cfg.parallel);
    let run = runner
        .run(&text, &rules, Some(console::default_progress_sink()))
        .await
        .context("review run failed")?;

    console::print_summary(&run.report, run.chapters.len());

    // 3. Report
    let document = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let rendered = match args.format {
        ReportFormat::Markdown => markdown::render_document(
            &run.report,
            &markdown::DocumentContext {
                document: &document,
                rules: &rules,
                chapters_evaluated: run.chapters.len(),
                chapters_skipped: run.skipped,
                full_transcript: args.full_transcript,
            },
        ),
        ReportFormat::Json => {
            let mut v = json::report_json(&run.report, &document, &rules);
            v["chapters"] = serde_json::to_value(&run.chapters)?;
            serde_json::to_string_pretty(&v)?
        }
    };

    if args.stdout {
        println!("{rendered}");
    } else {
        let out = output_path(&args, &cfg);
        std::fs::write(&out, rendered)
            .with_context(|| format!("failed to write report to {}", out.display()))?;
        eprintln!("Report written to {}", out.display());
    }

    if args.fail_on_issues && run.report.has_issues() {
        return Ok(exit_codes::ISSUES_FOUND);
    }
    Ok(exit_codes::OK)
}

fn resolve_config(args: &ReviewArgs) -> Result<ReviewConfig, ReviewError> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(provider) = args.provider {
        cfg.provider = provider;
    }
    if let Some(model) = &args.model {
        cfg.model = model.clone();
    }
    if let Some(max_tokens) = args.max_tokens {
        cfg.max_tokens = max_tokens;
    }
    if let Some(parallel) = args.parallel {
        cfg.parallel = parallel;
    }
    cfg.validate(args.config.as_deref())?;
    Ok(cfg)
}

/// CLI rules win over config rules; an empty selection is refused.
fn resolve_rules(args: &ReviewArgs, cfg: &ReviewConfig) -> Result<RuleSet, ReviewError> {
    if args.all_rules {
        return Ok(RuleSet::all());
    }
    if !args.rules.is_empty() {
        return RuleSet::new(args.rules.iter().copied());
    }
    RuleSet::new(cfg.rules.iter().copied())
}

fn output_path(args: &ReviewArgs, cfg: &ReviewConfig) -> PathBuf {
    if let Some(out) = &args.out {
        return out.clone();
    }
    match args.format {
        ReportFormat::Markdown => cfg.output.clone(),
        ReportFormat::Json => cfg.output.with_extension("json"),
    }
}
