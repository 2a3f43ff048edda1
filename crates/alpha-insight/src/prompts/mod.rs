//! Prompt construction for stock analysis
//!
//! - `system`: the fixed instruction describing persona, behavior and reply schema
//! - `user`: the per-query instruction rendered from a template
//! - `language`: output language selection

mod language;
mod system;
mod user;

pub use language::Language;
pub use system::SYSTEM_INSTRUCTION;
pub use user::{DEFAULT_RECENCY, render_user_prompt};
