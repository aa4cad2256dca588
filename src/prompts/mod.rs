//! Prompt composition
//!
//! Merges the knowledge document and the user's question into the single
//! text block sent to the language model.

pub mod clinic_prompt;

use crate::knowledge::Knowledge;

/// Builds the model prompt for a question
///
/// A missing knowledge document contributes its placeholder text, so a prompt
/// is always produced.
///
/// # Examples
///
/// ```
/// use caregp_chat::knowledge::Knowledge;
/// use caregp_chat::prompts::compose_prompt;
///
/// let prompt = compose_prompt(
///     &Knowledge::Document("Clinic opens at 8am.".to_string()),
///     "What are your hours?",
/// );
/// assert!(prompt.contains("Clinic opens at 8am."));
/// assert!(prompt.contains("What are your hours?"));
/// ```
pub fn compose_prompt(knowledge: &Knowledge, question: &str) -> String {
    clinic_prompt::generate_clinic_prompt(knowledge.prompt_text(), question)
}
