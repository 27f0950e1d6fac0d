use crate::model::ChatMessage;
use crate::rules::RuleSet;
use serde_json::json;

/// Top-level key of the response object; the aggregator reads it.
pub const EVALUATIONS_KEY: &str = "evaluations";

pub const SYSTEM_PROMPT: &str = "You are an expert reviewer of software requirements specifications. \
     You assess the expression quality of requirement sentences. \
     Respond with a single JSON object only, with no prose and no code fences.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system_prompt: String,
    pub user_prompt: String,
}

impl PromptPair {
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(self.user_prompt.clone()),
        ]
    }
}

fn worked_example() -> String {
    let example = json!({
        EVALUATIONS_KEY: [
            {
                "original_sentence": "The data shall be processed quickly.",
                "has_issue": true,
                "reason": "\"quickly\" is vague and cannot be verified; the actor performing the processing is not named.",
                "suggestion": "The system shall process the data within 2 seconds."
            },
            {
                "original_sentence": "The system shall record every failed login attempt.",
                "has_issue": false,
                "reason": "",
                "suggestion": ""
            }
        ]
    });
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

/// Renders the prompt pair for one text unit.
///
/// Only the descriptions of `rules` are embedded; the output schema is the
/// same whatever rules are active.
pub fn build_prompt(unit_text: &str, rules: &RuleSet) -> PromptPair {
    let checklist = rules
        .iter()
        .map(|r| format!("- {}", r.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let user_prompt = format!(
        "# Task\n\
         Evaluate the expression quality of the requirements text below.\n\
         \n\
         # Instructions\n\
         - Split the text into individual sentences.\n\
         - Keep only sentences that state software requirements or specifications; ignore all others.\n\
         - Check every kept sentence against each rule in the checklist.\n\
         - Report every kept sentence. Set \"has_issue\" to true when a sentence violates a rule, \
         name the violated rule in \"reason\" and give an improved sentence in \"suggestion\". \
         For sentences without issues set \"has_issue\" to false and leave \"reason\" and \"suggestion\" empty.\n\
         - Answer with one JSON object whose \"{key}\" array holds objects with the keys \
         \"original_sentence\", \"has_issue\", \"reason\" and \"suggestion\".\n\
         \n\
         # Rule checklist\n\
         {checklist}\n\
         \n\
         # Example output\n\
         {example}\n\
         \n\
         # Text to evaluate\n\
         {unit_text}\n",
        key = EVALUATIONS_KEY,
        checklist = checklist,
        example = worked_example(),
        unit_text = unit_text,
    );

    PromptPair {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt,
    }
}
