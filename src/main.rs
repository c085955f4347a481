// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Tutka - Injection Context Analysis CLI
 * Standalone front-end for the context analysis engine
 *
 * Commands:
 * - analyze: classify input text and suggest payloads
 * - contexts: list the loaded context definitions
 * - payloads: show the payload catalog for one context
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};

use tutka_engine::catalog::KnowledgeBaseLoader;
use tutka_engine::engine::AnalysisEngine;
use tutka_engine::types::AnalyzeOptions;

/// Tutka - Injection Context Analysis Engine
#[derive(Parser)]
#[command(name = "tutka")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "2.0.0")]
#[command(about = "Classifies text into injection contexts and ranks candidate payloads.", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - only show results
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Rule-set document path (JSON/YAML/TOML); built-in data when omitted
    #[arg(long, global = true, requires = "payloads_file")]
    rules_file: Option<PathBuf>,

    /// Payload catalog document path (JSON/YAML/TOML)
    #[arg(long, global = true, requires = "rules_file")]
    payloads_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze input text for injection contexts
    Analyze {
        /// Text to analyze
        text: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Minimum analyzable input length
        #[arg(long, default_value = "3")]
        min_input_length: usize,

        /// Contexts contributing payload suggestions
        #[arg(long, default_value = "2")]
        max_suggestion_contexts: usize,

        /// Payloads taken per contributing context
        #[arg(long, default_value = "3")]
        payloads_per_context: usize,

        /// Hard cap on the suggestion list
        #[arg(long, default_value = "5")]
        max_suggestions: usize,
    },

    /// List loaded context definitions
    Contexts,

    /// Show the payload catalog for one context
    Payloads {
        /// Context identifier
        context: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let engine = build_engine(&cli)?;

    match cli.command {
        Commands::Analyze {
            text,
            format,
            min_input_length,
            max_suggestion_contexts,
            payloads_per_context,
            max_suggestions,
        } => {
            let options = AnalyzeOptions {
                min_input_length,
                max_suggestion_contexts,
                payloads_per_context,
                max_suggestions,
            };
            let result = engine.analyze(&text, &options);

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => {
                    if result.contexts.is_empty() {
                        println!("No injection contexts detected.");
                    } else {
                        println!("Detected contexts:");
                        for context in &result.contexts {
                            println!(
                                "  {} [{}] {:.1}% - {}",
                                context.id,
                                context.severity.as_str().to_uppercase(),
                                context.confidence * 100.0,
                                context.description
                            );
                        }
                        println!(
                            "Overall: {} ({:.1}%)",
                            result.overall_severity.as_str().to_uppercase(),
                            result.overall_confidence * 100.0
                        );
                        if !result.suggestions.is_empty() {
                            println!("Payload suggestions:");
                            for payload in &result.suggestions {
                                println!("  {}", payload);
                            }
                        }
                    }
                }
            }
        }

        Commands::Contexts => {
            let kb = engine.knowledge_base();
            println!(
                "{} contexts (knowledge base version {}):",
                kb.context_count(),
                kb.version()
            );
            for definition in kb.contexts() {
                println!(
                    "  {:<20} [{}] {}",
                    definition.id,
                    definition.severity.as_str().to_uppercase(),
                    definition.title
                );
            }
        }

        Commands::Payloads { context } => {
            let kb = engine.knowledge_base();
            match kb.payloads_for(&context) {
                Some(payloads) => {
                    println!("{} payloads for '{}':", payloads.len(), context);
                    for payload in payloads {
                        println!("  {}", payload);
                    }
                }
                None => {
                    anyhow::bail!("Unknown context '{}'. Run 'tutka contexts' to list identifiers.", context);
                }
            }
        }
    }

    Ok(())
}

fn build_engine(cli: &Cli) -> Result<AnalysisEngine> {
    match (&cli.rules_file, &cli.payloads_file) {
        (Some(rules), Some(payloads)) => {
            let kb = KnowledgeBaseLoader::new(rules, payloads).load()?;
            info!("[CLI] Using external knowledge base from {:?}", rules);
            Ok(AnalysisEngine::new(kb))
        }
        _ => Ok(AnalysisEngine::with_builtin()?),
    }
}
