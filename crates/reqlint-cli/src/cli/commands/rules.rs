use crate::cli::args::{ListFormat, RulesArgs};
use crate::exit_codes;
use reqlint_core::EvaluationRule;
use serde_json::json;

pub fn run(args: RulesArgs) -> anyhow::Result<i32> {
    match args.format {
        ListFormat::Text => {
            for rule in EvaluationRule::ALL {
                println!("{:<22}{}", rule.key(), rule.label());
                println!("{:<22}{}", "", rule.description());
            }
        }
        ListFormat::Json => {
            let rules: Vec<_> = EvaluationRule::ALL
                .iter()
                .map(|r| {
                    json!({
                        "key": r.key(),
                        "label": r.label(),
                        "description": r.description(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(exit_codes::OK)
}
