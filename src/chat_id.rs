//! Chat identifier generation
//!
//! Identifiers are `chat_` followed by a random six-digit number. There is no
//! uniqueness check: a collision merges two conversations into one session.

use rand::Rng;

/// Prefix shared by all generated identifiers
pub const CHAT_ID_PREFIX: &str = "chat_";

const MIN_SUFFIX: u32 = 100_000;
const MAX_SUFFIX: u32 = 999_999;

/// Generate a new chat identifier such as `chat_482913`
///
/// # Examples
///
/// ```
/// use caregp_chat::chat_id::{generate_chat_id, is_generated_chat_id};
///
/// let id = generate_chat_id();
/// assert!(is_generated_chat_id(&id));
/// ```
pub fn generate_chat_id() -> String {
    let suffix = rand::rng().random_range(MIN_SUFFIX..=MAX_SUFFIX);
    format!("{}{}", CHAT_ID_PREFIX, suffix)
}

/// Whether `id` has the shape produced by [`generate_chat_id`]
pub fn is_generated_chat_id(id: &str) -> bool {
    id.strip_prefix(CHAT_ID_PREFIX)
        .and_then(|digits| {
            if digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_digit()) {
                digits.parse::<u32>().ok()
            } else {
                None
            }
        })
        .is_some_and(|n| (MIN_SUFFIX..=MAX_SUFFIX).contains(&n))
}
