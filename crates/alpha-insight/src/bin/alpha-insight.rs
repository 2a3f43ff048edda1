//! AlphaInsight command-line interface
//!
//! Analyze a single stock and exit, or start an interactive prompt.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export API_KEY="your-gemini-key"
//!
//! # One-shot
//! cargo run --bin alpha-insight -- TSLA --language en
//!
//! # Interactive
//! cargo run --bin alpha-insight
//! ```

use alpha_insight::{
    AnalysisQuery, AnalysisSession, AnalysisState, InsightConfig, JsonFormatter, Language,
    ReportFormatter, StockAnalyzer, TerminalFormatter,
};
use anyhow::Context;
use clap::Parser;
use insight_llm::providers::GeminiConfig;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "alpha-insight")]
#[command(about = "AI-assisted stock analysis grounded in live search", long_about = None)]
struct Args {
    /// Ticker or company name; starts an interactive prompt when omitted
    query: Option<String>,

    /// Gemini model identifier
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long)]
    temperature: Option<f32>,

    /// Output language: en or zh
    #[arg(long)]
    language: Option<Language>,

    /// Reject replies that omit required fields
    #[arg(long)]
    strict: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

impl Args {
    fn insight_config(&self) -> anyhow::Result<InsightConfig> {
        let mut builder = InsightConfig::builder();
        if let Some(model) = &self.model {
            builder = builder.model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(language) = self.language {
            builder = builder.language(language);
        }
        if self.strict {
            builder = builder.strict_schema(true);
        }
        if let Some(secs) = self.timeout {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        let config = builder
            .with_env()
            .context("invalid INSIGHT_* environment")?
            .build()?;
        Ok(config)
    }

    fn formatter(&self, language: Language) -> Box<dyn ReportFormatter> {
        if self.json {
            Box::new(JsonFormatter)
        } else {
            Box::new(TerminalFormatter::new(language))
        }
    }
}

fn print_banner(config: &InsightConfig) {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                        AlphaInsight                          ║
║                                                              ║
║  Enter a ticker or company name:                             ║
║    TSLA                                                      ║
║    苹果                                                      ║
║                                                              ║
║  exit / quit - 退出 (Exit)                                   ║
╚══════════════════════════════════════════════════════════════╝
"
    );
    println!("Configuration:");
    println!("  Model: {}", config.model);
    println!("  Language: {}", config.language);
    println!("  Web search: {}", config.web_search);
    println!();
}

async fn run_once(
    session: &mut AnalysisSession,
    formatter: &dyn ReportFormatter,
    query: &str,
) -> anyhow::Result<()> {
    let state = session.submit(query).await?;
    match state {
        AnalysisState::Error { message } => {
            eprintln!("{}", formatter.format_error(message));
            anyhow::bail!("analysis failed");
        }
        other => println!("{}", formatter.format_state(other)),
    }
    Ok(())
}

async fn run_repl(
    session: &mut AnalysisSession,
    formatter: &dyn ReportFormatter,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("alpha-insight> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "exit" | "quit") {
            println!("Goodbye!");
            break;
        }

        if let Ok(query) = AnalysisQuery::new(input) {
            let loading = formatter.format_loading(&query);
            if !loading.is_empty() {
                println!("{loading}");
            }
        }

        match session.submit(input).await {
            Ok(state) => println!("{}\n", formatter.format_state(state)),
            Err(e) => eprintln!("{}\n", formatter.format_error(&e.to_string())),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    insight_utils::init_tracing("warn,alpha_insight=info");

    let args = Args::parse();
    let config = args.insight_config()?;
    let formatter = args.formatter(config.language);

    let analyzer = StockAnalyzer::gemini(GeminiConfig::from_env(), config)?;
    info!(model = %analyzer.config().model, "Starting alpha-insight");
    let mut session = AnalysisSession::new(analyzer);

    match &args.query {
        Some(query) => run_once(&mut session, formatter.as_ref(), query).await,
        None => {
            if !args.json {
                print_banner(session.analyzer().config());
            }
            run_repl(&mut session, formatter.as_ref()).await
        }
    }
}
