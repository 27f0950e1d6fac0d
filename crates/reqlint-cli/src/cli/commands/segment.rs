use crate::cli::args::{ListFormat, SegmentArgs};
use crate::exit_codes;
use reqlint_core::extract::extract_text;
use reqlint_core::segment::segment;
use serde_json::json;

pub fn run(args: SegmentArgs) -> anyhow::Result<i32> {
    let text = extract_text(&args.file)?;
    let chapters = segment(&text);

    match args.format {
        ListFormat::Text => {
            for c in &chapters {
                let lines = c.content.lines().count();
                if c.is_blank() {
                    println!("[{}] {} ({} lines, blank: skipped)", c.id, c.label, lines);
                } else {
                    println!("[{}] {} ({} lines)", c.id, c.label, lines);
                }
            }
        }
        ListFormat::Json => {
            let out: Vec<_> = chapters
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "label": c.label,
                        "lines": c.content.lines().count(),
                        "blank": c.is_blank(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(exit_codes::OK)
}
