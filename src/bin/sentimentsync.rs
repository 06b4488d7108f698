//! sentimentsync: benchmark sentiment-analysis methods from the command line
//!
//! Reads one sentence per line, scores them with the selected methods, and
//! prints the result table, timings, and method comparison.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sentimentsync::config::{Config, Secrets};
use sentimentsync::scoring::gemini::KNOWN_MODELS;
use sentimentsync::version::version_string;
use sentimentsync::{ComparisonReport, Method, SentimentLabel, parse_sentences};

/// SentimentSync command-line front end
#[derive(Parser)]
#[command(name = "sentimentsync")]
#[command(version = sentimentsync::version::PKG_VERSION)]
#[command(about = "Compare sentiment-analysis methods on a batch of sentences")]
struct Args {
    /// Sentences, one per line (or omit to read from --input or stdin)
    text: Option<String>,

    /// Read sentences from a file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Methods to run, comma separated (VADER, TextBlob, Gemini)
    #[arg(short, long, value_delimiter = ',')]
    methods: Vec<Method>,

    /// Gemini model (any name is accepted as a custom model)
    #[arg(long, env = "SENTIMENTSYNC_GEMINI_MODEL")]
    gemini_model: Option<String>,

    /// Config file (default: ~/.sentimentsync/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the suggested Gemini models and exit
    #[arg(long)]
    list_models: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(version = %version_string(), "sentimentsync starting");

    if args.list_models {
        for model in KNOWN_MODELS {
            println!("{model}");
        }
        return Ok(());
    }

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(model) = args.gemini_model {
        config.gemini.model = model;
    }
    let secrets = Secrets::load()?;
    let engine = config.engine_builder(&secrets)?.build()?;

    let methods = if args.methods.is_empty() {
        config.methods.default.clone()
    } else {
        args.methods
    };

    let text = resolve_text(args.text, args.input)?;
    let report = engine.analyze(&parse_sentences(&text), &methods).await?;

    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }

    match args.format {
        Format::Json => println!("{}", report.to_json()?),
        Format::Text => print_report(&report),
    }

    Ok(())
}

/// Resolve sentence input from the positional argument, a file, or stdin.
fn resolve_text(
    arg: Option<String>,
    input: Option<PathBuf>,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(text) = arg {
        return Ok(text);
    }
    if let Some(path) = input {
        return Ok(std::fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?);
    }
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Err("no input provided (pass sentences as argument, --input, or via stdin)".into())
}

fn print_report(report: &ComparisonReport) {
    let methods = report.table.methods();

    println!("results:");
    for (i, row) in report.table.rows().iter().enumerate() {
        println!("{:>3}. {}", i + 1, row.text);
        for method in methods {
            let cell = row.output(*method);
            println!(
                "       {:<9} {:<8} {:.3}",
                method.as_str(),
                cell.label_str(),
                cell.intensity()
            );
        }
    }

    println!("\ntiming:");
    println!("  batch processing time: {:.4} s", report.timing.batch_seconds);
    match report.timing.mean_call_seconds.value() {
        Some(mean) => println!("  average time per call: {mean:.4} s"),
        None => println!("  average time per call: N/A"),
    }
    for timing in &report.timing.per_method {
        println!(
            "  {:<9} {} calls, mean {:.4} s",
            timing.method.as_str(),
            timing.calls,
            timing.mean_seconds
        );
    }

    println!("\nmean intensity:");
    for entry in &report.mean_intensities {
        println!("  {:<9} {}", entry.method.as_str(), entry.mean);
    }

    let Some(comparison) = &report.comparison else {
        println!("\n{}", ComparisonReport::NOT_APPLICABLE);
        return;
    };

    println!("\nagreement:");
    println!("  overall: {}%", comparison.agreement.overall_percent);
    for (i, agreed) in comparison.agreement.per_sentence.iter().enumerate() {
        println!("  #{:<3} {}", i + 1, if *agreed { "yes" } else { "no" });
    }
    for pair in &comparison.agreement.pairwise {
        println!("  {} vs {}: {}%", pair.method_a, pair.method_b, pair.value);
    }

    println!("\ncorrelation:");
    for entry in &comparison.correlations {
        println!(
            "  {:<8} {} vs {}: {}",
            entry.kind.as_str(),
            entry.metric.method_a,
            entry.metric.method_b,
            entry.metric.value
        );
    }

    println!("\njaccard similarity:");
    for pair in &comparison.similarity {
        println!("  {} vs {}: {}", pair.method_a, pair.method_b, pair.value);
    }

    for cm in &comparison.confusion {
        println!("\nconfusion matrix ({} rows, {} columns):", cm.method_a, cm.method_b);
        print!("  {:<9}", "");
        for label in SentimentLabel::MATRIX_ORDER {
            print!("{:>9}", label.as_str());
        }
        println!();
        for (actual, counts) in SentimentLabel::MATRIX_ORDER.iter().zip(cm.matrix.iter()) {
            print!("  {:<9}", actual.as_str());
            for count in counts {
                print!("{count:>9}");
            }
            println!();
        }
        if cm.excluded > 0 {
            println!("  ({} sentences excluded: ERROR)", cm.excluded);
        }
    }
}
