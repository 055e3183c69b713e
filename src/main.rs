//! CLI entry point for glade-layout
//!
//! Provides command-line interface for parsing layouts, injecting CSS
//! names, and showing cached documents.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use glade_layout::{
    core::{DiagnosticKind, Document, LayoutParser, NamingOptions, ParseOptions},
    store::{load_class_filters, LayoutCache, LayoutFile},
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "glade-layout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log parse details (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a layout and list its objects
    Parse {
        /// Path to the Glade file
        file: PathBuf,

        /// Drop objects declared without an id
        #[arg(long)]
        skip_empty_id: bool,

        /// Drop objects whose id starts with a lower-case letter
        #[arg(long)]
        skip_lowercase_first: bool,

        /// Write the parsed document to a JSON cache file
        #[arg(long, value_name = "OUT")]
        json: Option<PathBuf>,
    },

    /// Give every widget a CSS name built from its id, rewriting the file
    Name {
        /// Path to the Glade file
        file: PathBuf,

        /// Lower-case the generated names
        #[arg(long)]
        lower_case: bool,

        /// Replace names that already exist
        #[arg(long, conflicts_with = "clear")]
        force: bool,

        /// Remove existing names and add none
        #[arg(long)]
        clear: bool,

        /// Extra class to leave untouched (repeatable)
        #[arg(long = "skip-class", value_name = "CLASS")]
        skip_classes: Vec<String>,

        /// File listing classes to leave untouched, one per line
        #[arg(long, value_name = "FILE")]
        filters: Option<PathBuf>,
    },

    /// Print a cached document
    Show {
        /// Path to the JSON cache file
        cache: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse {
            file,
            skip_empty_id,
            skip_lowercase_first,
            json,
        } => {
            let options = ParseOptions {
                skip_empty_id,
                skip_lowercase_first,
                ..ParseOptions::default()
            };
            parse_layout(&file, options, json.as_deref())?
        }
        Commands::Name {
            file,
            lower_case,
            force,
            clear,
            skip_classes,
            filters,
        } => {
            let mut naming = NamingOptions {
                enabled: true,
                lower_case,
                force,
                clear,
                ..NamingOptions::default()
            };
            if let Some(filters) = filters {
                let path = expand(&filters)?;
                naming.skip_classes = load_class_filters(&path)?;
            }
            naming.skip_classes.extend(skip_classes);

            let options = ParseOptions {
                naming,
                ..ParseOptions::default()
            };
            name_layout(&file, options)?
        }
        Commands::Show { cache } => show_cache(&cache)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    if TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_err()
    {
        eprintln!("Could not initialize logging");
    }
}

/// Expand tilde in path
fn expand(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Parse a layout and print its objects
fn parse_layout(file: &Path, options: ParseOptions, json: Option<&Path>) -> anyhow::Result<()> {
    let path = expand(file)?;

    println!("{} Parsing layout: {}", "→".cyan(), path.display());

    let layout = LayoutFile::new(path)?;
    let mut document = layout.load(&LayoutParser::new(options))?.document;

    print_document(&document);

    if let Some(json) = json {
        let cache = LayoutCache::new(expand(json)?);
        cache
            .write(&mut document)
            .with_context(|| format!("Failed to write cache {}", cache.path().display()))?;
        println!("{} Cached to {}", "✓".green(), cache.path().display());
    }

    Ok(())
}

/// Run the naming pass and report what changed
fn name_layout(file: &Path, options: ParseOptions) -> anyhow::Result<()> {
    let path = expand(file)?;
    let layout = LayoutFile::new(path)?;
    let loaded = layout.load(&LayoutParser::new(options))?;

    let unnamed = loaded
        .document
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnnameableObject)
        .count();

    match loaded.backup {
        Some(backup) => {
            println!(
                "{} {} rewritten",
                "✓".green().bold(),
                layout.path().display().to_string().bold()
            );
            println!("  {} {}", "Backup:".dimmed(), backup.display());
        }
        None => println!("{} Nothing to change", "✓".green()),
    }

    let named = loaded
        .document
        .objects
        .iter()
        .filter(|o| o.already_named)
        .count();
    println!(
        "  {} of {} objects named",
        named.to_string().cyan(),
        loaded.document.objects_count
    );

    if unnamed > 0 {
        println!(
            "{}",
            format!("⚠ {} object(s) could not be named", unnamed).yellow()
        );
    }

    Ok(())
}

/// Print a cached document
fn show_cache(cache: &Path) -> anyhow::Result<()> {
    let cache = LayoutCache::new(expand(cache)?);
    let document = cache.read()?;

    if !document.updated_on.is_empty() {
        println!("{} {}", "Cached on:".dimmed(), document.updated_on);
    }
    print_document(&document);

    Ok(())
}

fn print_document(document: &Document) {
    println!(
        "{}",
        format!("Objects from: {} (requires {})\n", document.filename, document.requires).bold()
    );

    for object in &document.objects {
        let id = if object.id.is_empty() {
            "(no id)".dimmed()
        } else {
            object.id.cyan().bold()
        };
        println!("{} {}", id, object.class.green());

        for property in &object.properties {
            let marker = if property.translatable { "*" } else { " " };
            println!("  {}{} = {}", marker.yellow(), property.name, property.value);
        }
        for signal in &object.signals {
            println!("  {} {} → {}", "⚡".magenta(), signal.name, signal.handler);
        }
        for packing in &object.packing {
            println!("  {} {} = {}", "▣".dimmed(), packing.name, packing.value);
        }
    }

    if !document.comments.is_empty() {
        println!("\n{} {} comment(s)", "•".dimmed(), document.comments.len());
    }

    println!(
        "\n{} Total: {} objects",
        "✓".green(),
        document.objects_count
    );

    let warnings = document.diagnostics.len();
    if warnings > 0 {
        println!(
            "{}",
            format!("⚠ {} line(s) skipped or flagged, see warnings above", warnings).yellow()
        );
    }
}
