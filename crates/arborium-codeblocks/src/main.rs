//! arborium-codeblocks CLI - highlight `language-*` code blocks in HTML files.

use anyhow::Result;
use arborium_codeblocks::processor::{ProcessOptions, Processor};
use arborium_codeblocks::{CodeBlockHighlighter, HighlightConfig, HtmlFormat, Options};
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Highlight `<code class="language-*">` blocks in HTML with tree-sitter grammars.
#[derive(Parser, Debug)]
#[command(name = "arborium-codeblocks", version)]
struct Args {
    /// HTML file, or directory searched recursively for *.html
    input: PathBuf,

    /// Where to write the result (defaults to modifying the input in place)
    output: Option<PathBuf>,

    /// Language identifier to leave alone without a warning (repeatable)
    #[arg(long = "plain-text", value_name = "ID")]
    plain_text: Vec<String>,

    /// Do not warn about grammars that embed languages that are not loaded
    #[arg(long)]
    allow_missing_scopes: bool,

    /// Load every bundled grammar instead of the common set
    #[arg(long)]
    all_grammars: bool,

    /// Prefix for highlight class names
    #[arg(long, value_name = "PREFIX", default_value = "pl")]
    class_prefix: String,

    /// Emit compact custom elements (<a-k>) instead of classed spans
    #[arg(long, conflicts_with = "class_prefix")]
    custom_elements: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> Options {
        let html_format = if self.custom_elements {
            HtmlFormat::CustomElements
        } else if self.class_prefix.is_empty() {
            HtmlFormat::ClassNames
        } else {
            HtmlFormat::ClassNamesWithPrefix(self.class_prefix.clone())
        };

        let mut options = Options::default()
            .with_plain_text(self.plain_text.iter().cloned())
            .allow_missing_scopes(self.allow_missing_scopes)
            .with_highlight(HighlightConfig {
                html_format,
                ..Default::default()
            });
        if self.all_grammars {
            options = options.with_grammars(arborium_highlight::all());
        }
        options
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("ARBORIUM_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().build())
    }))
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let options = ProcessOptions {
        input: args.input.clone(),
        output: args.output.clone(),
        verbose: args.verbose,
    };
    let processor = Processor::new(options, CodeBlockHighlighter::new(args.options()));

    eprintln!(
        "{} Processing: {}",
        "arborium-codeblocks".green().bold(),
        args.input.display()
    );
    if let Some(out) = &args.output {
        eprintln!("  Output: {}", out.display());
    } else {
        eprintln!("  {} Modifying in place", "Note:".yellow());
    }
    eprintln!();

    let start = Instant::now();
    let stats = processor.process().await?;
    let elapsed = start.elapsed();

    for report in &stats.reports {
        for message in &report.messages {
            eprintln!("{:?}", miette::Report::new(message.clone()));
        }
    }

    eprintln!("{}", "Results:".bold());
    eprintln!(
        "  {} HTML files processed ({} changed)",
        stats.files_processed.to_string().cyan(),
        stats.files_changed.to_string().cyan()
    );
    eprintln!(
        "  {} code blocks highlighted",
        stats.blocks.highlighted.to_string().green()
    );
    eprintln!(
        "  {} code blocks skipped ({} plain text, {} unknown language, {} empty)",
        stats.blocks.skipped().to_string().yellow(),
        stats.blocks.plain,
        stats.blocks.unknown,
        stats.blocks.unchanged
    );
    if stats.files_failed > 0 {
        eprintln!("  {} files failed", stats.files_failed.to_string().red());
    }
    if !stats.blocks.unknown_languages.is_empty() {
        eprintln!(
            "\n  {} Unknown languages: {}",
            "Note:".yellow(),
            stats.blocks.unknown_languages.join(", ")
        );
    }
    if args.verbose {
        eprintln!(
            "  HTML size {:+.1}%, {:.1} MB/s",
            stats.html_inflation_percent(),
            stats.throughput_mb_s()
        );
    }

    eprintln!(
        "\n  {} warnings, completed in {:.2}s",
        stats.message_count(),
        elapsed.as_secs_f64()
    );

    Ok(())
}
