//! Per-query user instruction

use super::Language;
use minijinja::{Environment, context};

/// Default lookback the model is asked to focus on
pub const DEFAULT_RECENCY: &str = "week";

const USER_TEMPLATE: &str = "Analyze the stock: {{ query }}. \
Focus on recent performance and news from the last {{ recency }}. \
Provide a recommendation in {{ language }} language.";

/// Render the user instruction for one query
///
/// The query is passed as a template value, never as template source, so
/// braces typed by the user are not interpreted.
pub fn render_user_prompt(
    query: &str,
    recency: &str,
    language: Language,
) -> Result<String, minijinja::Error> {
    // Create a new environment for each render; the template is tiny
    let env = Environment::new();
    env.render_str(
        USER_TEMPLATE,
        context! {
            query => query,
            recency => recency,
            language => language.name(),
        },
    )
}
