//! Report formatting for the terminal

use crate::markdown;
use crate::model::{AnalysisQuery, AnalysisResult, ChartPoint, Source};
use crate::prompts::Language;
use crate::state::AnalysisState;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use std::fmt::Write;

/// Renders analysis outcomes for display
pub trait ReportFormatter: Send + Sync {
    fn format_result(&self, result: &AnalysisResult) -> String;
    fn format_error(&self, error: &str) -> String;
    fn format_loading(&self, query: &AnalysisQuery) -> String;

    /// Render whatever the state currently shows; `Idle` renders nothing
    fn format_state(&self, state: &AnalysisState) -> String {
        match state {
            AnalysisState::Idle => String::new(),
            AnalysisState::Loading { query } => self.format_loading(query),
            AnalysisState::Success(result) => self.format_result(result),
            AnalysisState::Error { message } => self.format_error(message),
        }
    }
}

struct Labels {
    confidence: &'static str,
    entry: &'static str,
    exit: &'static str,
    horizon: &'static str,
    trend: &'static str,
    date: &'static str,
    price: &'static str,
    sentiment: &'static str,
    volume: &'static str,
    range: &'static str,
    no_trend: &'static str,
    sources: &'static str,
    loading: &'static str,
    disclaimer: &'static str,
}

const ENGLISH: Labels = Labels {
    confidence: "Confidence",
    entry: "Entry",
    exit: "Exit",
    horizon: "Horizon",
    trend: "7-Day Trend",
    date: "Date",
    price: "Price",
    sentiment: "Sentiment",
    volume: "Volume",
    range: "Range",
    no_trend: "No trend data",
    sources: "Sources",
    loading: "Analyzing market data for",
    disclaimer: "AI-generated analysis for reference only. Not financial advice.",
};

const CHINESE: Labels = Labels {
    confidence: "置信度",
    entry: "入场区间",
    exit: "离场区间",
    horizon: "持有周期",
    trend: "7日走势",
    date: "日期",
    price: "价格",
    sentiment: "情绪",
    volume: "成交量",
    range: "区间",
    no_trend: "暂无走势数据",
    sources: "参考来源",
    loading: "正在分析市场数据",
    disclaimer: "以上内容由 AI 生成，仅供参考，不构成投资建议。",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::English => &ENGLISH,
        Language::Chinese => &CHINESE,
    }
}

/// Plain-text report with a recommendation card and a trend table
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalFormatter {
    language: Language,
    styled: bool,
}

impl TerminalFormatter {
    /// Styling follows whether stdout supports colors
    pub fn new(language: Language) -> Self {
        Self {
            language,
            styled: console::colors_enabled(),
        }
    }

    pub fn with_styling(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    fn header(result: &AnalysisResult) -> String {
        let mut line = match (result.company_name.is_empty(), result.symbol.is_empty()) {
            (false, false) => format!("{} ({})", result.company_name, result.symbol),
            (true, false) => result.symbol.clone(),
            (false, true) => result.company_name.clone(),
            (true, true) => String::new(),
        };
        if !result.current_price.is_empty() {
            if !line.is_empty() {
                line.push_str("  ");
            }
            line.push_str(&result.current_price);
        }
        line
    }

    fn card(&self, result: &AnalysisResult) -> String {
        let labels = labels(self.language);
        let rec = &result.recommendation;
        format!(
            "{}\n  {}: {}%\n  {}: {}\n  {}: {}\n  {}: {}",
            rec.action.label(self.language),
            labels.confidence,
            rec.confidence,
            labels.entry,
            rec.entry_price_range,
            labels.exit,
            rec.exit_price_range,
            labels.horizon,
            rec.time_horizon,
        )
    }

    fn trend(&self, result: &AnalysisResult) -> String {
        let labels = labels(self.language);
        let Some((low, high)) = result.price_range() else {
            return format!("{}: {}", labels.trend, labels.no_trend);
        };

        let with_sentiment = result.has_sentiment();
        let with_volume = result.trend_data.iter().any(|p| p.volume.is_some());

        let mut header = vec![labels.date, labels.price];
        if with_sentiment {
            header.push(labels.sentiment);
        }
        if with_volume {
            header.push(labels.volume);
        }

        let columns = header.len();
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header);

        for point in &result.trend_data {
            table.add_row(trend_row(point, with_sentiment, with_volume));
        }
        for index in 1..columns {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }

        format!(
            "{}  ({}: {low:.2} - {high:.2})\n{table}",
            labels.trend, labels.range
        )
    }

    fn sources(&self, sources: &[Source]) -> Option<String> {
        if sources.is_empty() {
            return None;
        }
        let mut out = format!("{}:", labels(self.language).sources);
        for (i, source) in sources.iter().enumerate() {
            let title = if source.title.is_empty() {
                &source.uri
            } else {
                &source.title
            };
            let _ = write!(out, "\n  {}. {title}", i + 1);
            if !source.uri.is_empty() && title != &source.uri {
                let _ = write!(out, "\n     {}", source.uri);
            }
        }
        Some(out)
    }
}

fn trend_row(point: &ChartPoint, with_sentiment: bool, with_volume: bool) -> Vec<String> {
    let optional = |value: Option<f64>| value.map(|v| format!("{v:.0}")).unwrap_or_default();

    let mut row = vec![point.date.clone(), format!("{:.2}", point.price)];
    if with_sentiment {
        row.push(optional(point.sentiment));
    }
    if with_volume {
        row.push(optional(point.volume));
    }
    row
}

impl ReportFormatter for TerminalFormatter {
    fn format_result(&self, result: &AnalysisResult) -> String {
        let mut sections = vec![
            Self::header(result),
            self.card(result),
            self.trend(result),
        ];
        if !result.markdown_analysis.trim().is_empty() {
            sections.push(markdown::render(&result.markdown_analysis, self.styled));
        }
        sections.extend(self.sources(&result.sources));
        sections.push(labels(self.language).disclaimer.to_string());

        sections.retain(|s| !s.is_empty());
        sections.join("\n\n")
    }

    fn format_error(&self, error: &str) -> String {
        format!("❌ Error: {error}")
    }

    fn format_loading(&self, query: &AnalysisQuery) -> String {
        format!("⏳ {} {query}...", labels(self.language).loading)
    }
}

/// Pretty-printed JSON for scripting
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_result(&self, result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| self.format_error(&e.to_string()))
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({ "error": error }).to_string()
    }

    fn format_loading(&self, _query: &AnalysisQuery) -> String {
        String::new()
    }
}
