//! Report composition: structured prompts in, structured reports out,
//! deterministic fallbacks on any provider or extraction failure.

pub mod progression;
pub mod prompt;
pub mod research;
