//! Tessera CLI - design-document linter

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{colors, fix, focus, layout, serve};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(
    about = "Find unbound colors and responsive-layout problems in design documents",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the lint configuration file
    #[arg(long, global = true, default_value = "tessera.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List nodes with solid fills or strokes not bound to a variable
    Colors {
        /// Path to document file (.json or .toml)
        document: String,

        /// Skip hidden nodes and their subtrees
        #[arg(long)]
        exclude_hidden: bool,

        /// Only search the current selection
        #[arg(long)]
        selected_only: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check the selection for responsive-layout issues
    Layout {
        /// Path to document file
        document: String,

        /// Skip hidden nodes and their subtrees
        #[arg(long)]
        exclude_hidden: bool,

        /// Rule set (full or reduced); overrides the config file
        #[arg(long)]
        rules: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Clone flagged nodes next to the originals and fix the clones
    Fix {
        /// Path to document file
        document: String,

        /// Skip hidden nodes and their subtrees
        #[arg(long)]
        exclude_hidden: bool,

        /// Rule set (full or reduced); overrides the config file
        #[arg(long)]
        rules: Option<String>,

        /// Preview fixes without applying
        #[arg(long)]
        dry_run: bool,

        /// Show diff of changes
        #[arg(long)]
        output_diff: bool,
    },

    /// Fix one issue on one node in place
    FixIssue {
        /// Path to document file
        document: String,

        /// Id of the node to fix
        node_id: String,

        /// Issue tag (e.g. NO_AUTO_LAYOUT, GROUP_NOT_FRAME)
        issue_type: String,
    },

    /// Select a node and bring it into view
    Focus {
        /// Path to document file
        document: String,

        /// Id of the node to focus
        node_id: String,
    },

    /// Run a JSON-lines session over stdin/stdout
    Serve {
        /// Path to document file
        document: String,

        /// Write the document back when the session ends
        #[arg(long)]
        save: bool,
    },
}

fn setup_logging(log_level: &Option<String>) {
    let level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries results and session responses
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.as_str().to_lowercase()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match cli.command {
        Commands::Colors {
            document,
            exclude_hidden,
            selected_only,
            format,
        } => colors::run(colors::ColorsArgs {
            document,
            config: cli.config,
            exclude_hidden,
            selected_only,
            format,
        }),
        Commands::Layout {
            document,
            exclude_hidden,
            rules,
            format,
        } => layout::run(layout::LayoutArgs {
            document,
            config: cli.config,
            exclude_hidden,
            rules,
            format,
        }),
        Commands::Fix {
            document,
            exclude_hidden,
            rules,
            dry_run,
            output_diff,
        } => fix::run(fix::FixArgs {
            document,
            config: cli.config,
            exclude_hidden,
            rules,
            dry_run,
            output_diff,
        }),
        Commands::FixIssue {
            document,
            node_id,
            issue_type,
        } => fix::run_issue(fix::FixIssueArgs {
            document,
            config: cli.config,
            node_id,
            issue_type,
        }),
        Commands::Focus { document, node_id } => focus::run(&document, &cli.config, &node_id),
        Commands::Serve { document, save } => serve::run(&document, &cli.config, save),
    }
}
