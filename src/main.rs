//! swagger-diff: structural diff tool for Swagger 2.0 API specifications
//!
//! Compares two versions of an API document and renders a changelog that
//! separates contract-breaking changes from cosmetic ones.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use swagger_diff::{
    cli,
    config::{
        discover_config_file, generate_example_config, generate_json_schema, load_or_default,
        user_config_dir, AppConfig, DiffConfigBuilder, Validatable,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported Specifications:",
        "\n  Swagger / OpenAPI 2.0 (JSON, YAML)",
        "\n\nOutput Formats:",
        "\n  markdown, html, json, summary"
    )
}

#[derive(Parser)]
#[command(name = "swagger-diff")]
#[command(version, long_version = build_long_version())]
#[command(about = "Structural diff for Swagger 2.0 API specifications", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or no --fail-on-* flag given)
    1  Changes detected (--fail-on-change)
    2  Contract-breaking change detected (--fail-on-contract-change)
    3  Error occurred

EXAMPLES:
    # Markdown changelog on stdout
    swagger-diff diff v1/swagger.yaml v2/swagger.yaml

    # CI/CD gate on breaking changes
    swagger-diff diff old.json new.json -o summary --fail-on-contract-change

    # HTML changelog including vendor extensions
    swagger-diff diff old.json new.json --with-extensions -o html -O changes.html")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline specification
    old: PathBuf,

    /// Path to the new specification
    new: PathBuf,

    /// Output format (falls back to the config file, then markdown)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Compare vendor extensions (x-* keys)
    #[arg(long)]
    with_extensions: bool,

    /// Plain Markdown without emphasis markers
    #[arg(long)]
    basic: bool,

    /// Exit with code 2 if a contract-breaking change is detected
    #[arg(long)]
    fail_on_contract_change: bool,

    /// Exit with code 1 if any change is detected
    #[arg(long)]
    fail_on_change: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two Swagger specifications
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .swagger-diff.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay clean
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Dispatch to command handlers, returning the process exit code.
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .with_extensions(args.with_extensions)
                .output_format(args.output.unwrap_or_default())
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .plain_markdown(args.basic)
                .fail_on_contract_change(args.fail_on_contract_change)
                .fail_on_change(args.fail_on_change)
                .quiet(cli.quiet)
                .build();
            let (app_config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }

            let config = DiffConfigBuilder::from_app_config(&app_config)
                .old_path(args.old)
                .new_path(args.new)
                .build()?;

            let errors = config.validate();
            if let Some(first) = errors.first() {
                for error in &errors[1..] {
                    tracing::error!("{error}");
                }
                anyhow::bail!("Invalid configuration: {first}");
            }

            cli::run_diff(config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "swagger-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    let (config, loaded_from) = load_or_default(cli.config.as_deref());
                    if let Some(path) = &loaded_from {
                        eprintln!("# Loaded from: {}", path.display());
                    } else {
                        eprintln!("# No config file found; showing defaults");
                    }
                    let yaml =
                        serde_yaml::to_string(&config).context("failed to serialize config")?;
                    print!("{yaml}");
                }
                ConfigAction::Path => {
                    let search_paths = [
                        std::env::current_dir().ok(),
                        user_config_dir(),
                        dirs::home_dir(),
                    ];
                    eprintln!("Config file search paths (in order):");
                    for path in search_paths.into_iter().flatten() {
                        eprintln!("  {}", path.display());
                    }
                    eprintln!();
                    eprintln!("Recognized file names:");
                    for name in &[
                        ".swagger-diff.yaml",
                        ".swagger-diff.yml",
                        "swagger-diff.yaml",
                        "swagger-diff.yml",
                    ] {
                        eprintln!("  {name}");
                    }
                    eprintln!();
                    match discover_config_file(cli.config.as_deref()) {
                        Some(path) => eprintln!("Active config file: {}", path.display()),
                        None => eprintln!("No config file found."),
                    }
                }
                ConfigAction::Init => {
                    let target = std::env::current_dir()
                        .context("cannot determine current directory")?
                        .join(".swagger-diff.yaml");
                    if target.exists() {
                        anyhow::bail!(
                            "{} already exists. Remove it first to re-initialize.",
                            target.display()
                        );
                    }
                    std::fs::write(&target, generate_example_config())
                        .with_context(|| format!("failed to write {}", target.display()))?;
                    eprintln!("Created {}", target.display());
                }
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}
