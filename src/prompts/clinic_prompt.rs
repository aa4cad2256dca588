//! Clinic assistant prompt template
//!
//! The knowledge text and the question are inserted verbatim. Nothing is
//! escaped or truncated, so either can carry text that changes the model's
//! effective instructions.

/// Persona and task instructions placed before the knowledge base
pub const CLINIC_ASSISTANT_INSTRUCTIONS: &str = "You are a helpful AI assistant for GP clinics using CareGP software.
You answer questions using the following knowledge base. Be concise and accurate.";

/// Generates the full prompt for one user question
///
/// # Arguments
///
/// * `knowledge` - Knowledge document text (or its placeholder)
/// * `question` - The user's trimmed question
///
/// # Returns
///
/// The prompt text sent to the model
pub fn generate_clinic_prompt(knowledge: &str, question: &str) -> String {
    format!(
        "\n{}\n\nKnowledge Base:\n{}\n\nUser Question:\n{}\n",
        CLINIC_ASSISTANT_INSTRUCTIONS, knowledge, question
    )
}
