//! Terminal rendering for the analysis narrative
//!
//! Headings, emphasis, lists, block quotes and rules are laid out as plain
//! text. With styling on, headings and bold text also get ANSI attributes.

use console::Style;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

const QUOTE_PREFIX: &str = "│ ";
const RULE: &str = "────────────────────────────────────────";

#[derive(Default)]
struct Renderer {
    out: String,
    styled: bool,
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    heading: Option<HeadingLevel>,
    strong: usize,
    emphasis: usize,
}

impl Renderer {
    fn quote_prefix(&mut self) {
        for _ in 0..self.quote_depth {
            self.out.push_str(QUOTE_PREFIX);
        }
    }

    fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.quote_prefix();
    }

    /// Separate blocks with one blank line
    fn blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        if !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn start_block(&mut self) {
        self.blank_line();
        self.quote_prefix();
    }

    fn style(&self) -> Style {
        let mut style = Style::new().force_styling(self.styled);
        match self.heading {
            Some(HeadingLevel::H1) => style = style.bold().underlined().yellow(),
            Some(HeadingLevel::H3) => style = style.bold().cyan(),
            Some(_) => style = style.bold(),
            None => {}
        }
        if self.strong > 0 {
            style = style.bold().yellow();
        }
        if self.emphasis > 0 || self.quote_depth > 0 {
            style = style.italic();
        }
        style
    }

    fn text(&mut self, text: &str) {
        let painted = self.style().apply_to(text).to_string();
        self.out.push_str(&painted);
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.start_block();
                self.heading = Some(level);
            }
            Event::End(TagEnd::Heading { .. }) => {
                self.heading = None;
                self.out.push('\n');
            }
            // List items hold their own paragraphs; only top-level ones get spacing
            Event::Start(Tag::Paragraph) if self.lists.is_empty() => self.start_block(),
            Event::End(TagEnd::Paragraph) if self.lists.is_empty() => self.out.push('\n'),
            Event::Start(Tag::BlockQuote { .. }) => self.quote_depth += 1,
            Event::End(TagEnd::BlockQuote { .. }) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            Event::Start(Tag::List(start)) => {
                if self.lists.is_empty() {
                    self.blank_line();
                }
                self.lists.push(start);
            }
            Event::End(TagEnd::List { .. }) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                self.newline();
                let depth = self.lists.len().saturating_sub(1);
                self.out.push_str(&"  ".repeat(depth));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.out.push_str(&marker);
            }
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => self.text(&text),
            Event::SoftBreak | Event::HardBreak => {
                self.newline();
                if !self.lists.is_empty() {
                    self.out.push_str(&"  ".repeat(self.lists.len()));
                }
            }
            Event::Rule => {
                self.start_block();
                self.out.push_str(RULE);
                self.out.push('\n');
            }
            _ => {}
        }
    }
}

/// Render markdown for a terminal
///
/// Unstyled output is plain text: markers such as `##` and `**` are dropped
/// and list items become `•` or numbered lines.
pub fn render(markdown: &str, styled: bool) -> String {
    let mut renderer = Renderer {
        styled,
        ..Renderer::default()
    };
    for event in Parser::new(markdown) {
        renderer.event(event);
    }
    renderer.out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_bold_lose_markers() {
        let text = render("## Market Sentiment\n\nDemand is **strong** this week.", false);
        assert_eq!(text, "Market Sentiment\n\nDemand is strong this week.");
    }

    #[test]
    fn test_lists() {
        let text = render("Drivers:\n\n- Deliveries\n- **Margins**\n\n1. Buy\n2. Hold", false);
        assert_eq!(
            text,
            "Drivers:\n\n• Deliveries\n• Margins\n\n1. Buy\n2. Hold"
        );
    }

    #[test]
    fn test_nested_list_is_indented() {
        let text = render("- Risks\n  - Rates\n  - Competition", false);
        assert_eq!(text, "• Risks\n  • Rates\n  • Competition");
    }

    #[test]
    fn test_block_quote_and_rule() {
        let text = render("> Not financial advice\n\n---\n\nEnd", false);
        assert_eq!(text, format!("│ Not financial advice\n\n{RULE}\n\nEnd"));
    }

    #[test]
    fn test_styling_adds_ansi_only_when_enabled() {
        let styled = render("# Outlook\n\n**Buy** now", true);
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("Outlook"));

        let plain = render("# Outlook\n\n**Buy** now", false);
        assert!(!plain.contains('\u{1b}'));
    }
}
