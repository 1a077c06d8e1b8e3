//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use chatstats::ChatstatsError;
use chatstats::analytics::participants;
use chatstats::cli::Args;
use chatstats::format::write_report;
use chatstats::parser::TranscriptParser;
use chatstats::report::analyze;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays readable; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "chatstats=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatsError> {
    let total_start = Instant::now();

    let config = args.analysis_config()?;
    let filter = args.filter_config()?;
    let parser = TranscriptParser::with_config(args.parser_config());

    if args.list_participants {
        let messages = parser.parse(&args.input)?;
        println!("Overall");
        for name in participants(&messages, &config.excluded_senders) {
            println!("{}", name);
        }
        return Ok(());
    }

    let output_path = args.output_path();

    // Print header
    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", args.format);
    println!("👤 User:    {}", filter.participant);
    if let Some(from) = filter.range.from {
        println!("📅 After:   {}", from);
    }
    if let Some(to) = filter.range.to {
        println!("📅 Before:  {}", to);
    }
    println!();

    // Step 1: Parse
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let messages = parser.parse(&args.input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    let stopwords = args.stopwords()?;
    if !stopwords.is_empty() {
        println!("🧹 Loaded {} stopwords", stopwords.len());
    }

    // Step 2: Analyze
    println!("🔍 Analyzing...");
    let analyze_start = Instant::now();
    let report = analyze(&messages, &filter, &config, &stopwords);
    println!("   Done in {:.2}s", analyze_start.elapsed().as_secs_f64());

    // Step 3: Write
    println!("💾 Writing {}...", args.format);
    write_report(&report, &output_path, args.format)?;

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    // Summary
    let stats = &report.summary;
    println!();
    println!("📈 Summary:");
    println!("   Messages:  {}", stats.messages);
    println!("   Words:     {}", stats.words);
    println!("   Media:     {}", stats.media);
    println!("   Links:     {}", stats.links);
    if let Some(top) = report.participants.first() {
        println!("   Most active: {} ({:.2}%)", top.sender, top.share);
    }
    if let Some(day) = report.busiest_day {
        println!("   Busiest day: {}", day.weekday);
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
