use crate::surface::types::UiSnapshot;

pub const SYSTEM_PROMPT: &str = "You are a UI assistant for a web application UI.";

/// User turn for a direct completion call: page context, the question, and
/// the instruction to answer with concrete steps.
pub fn build_user_prompt(user_message: &str, snapshot: &UiSnapshot) -> String {
    format!(
        "{summary}\n\
         User asked: \"{user_message}\"\n\
         Please respond with step-by-step actions the user should take within this UI.\n\
         Be specific: mention which button or icon to click, or which field to fill.\n\
         When possible, answer with JSON of the form \
         {{\"explanation\": string, \"steps\": [{{\"step\": number, \"action\": \"click\" | \"fill\", \
         \"targetText\": string, \"targetLabel\": string}}]}}.",
        summary = snapshot.summary(),
    )
}
