use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::info;

use swagdoc_core::config::{self, CONFIG_FILE_NAME, SwagdocConfig};
use swagdoc_core::model::Swagger;
use swagdoc_core::{GenerateOptions, build_spec, generate};
use swagdoc_syn::RustSourceFrontend;

#[derive(Parser)]
#[command(
    name = "swagdoc",
    about = "Swagger 2.0 documents from annotated Rust handlers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the values in `.swagdoc.yaml`.
#[derive(clap::Args)]
struct SourceArgs {
    /// Project root directory
    #[arg(short, long)]
    project: Option<String>,

    /// Entry file with the global annotations, relative to the project
    #[arg(short, long)]
    entry: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate swagger.json or swagger.yaml
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory, relative to the project
        #[arg(short, long)]
        output: Option<String>,

        /// Output format: json or yaml
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print a summary of the assembled document without writing files
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Summary format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swagdoc configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            output,
            format,
        } => cmd_generate(source, output, format),

        Commands::Inspect { source, format } => cmd_inspect(source, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagdoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SwagdocConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Config file values with command-line overrides applied.
fn merged_config(source: SourceArgs) -> Result<SwagdocConfig> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(project) = source.project {
        cfg.project = project;
    }
    if let Some(entry) = source.entry {
        cfg.entry = entry;
    }
    Ok(cfg)
}

fn frontend_for(options: &GenerateOptions) -> RustSourceFrontend {
    RustSourceFrontend::new(options.search_roots())
}

fn cmd_generate(source: SourceArgs, output: Option<String>, format: Option<String>) -> Result<()> {
    let mut cfg = merged_config(source)?;
    if let Some(output) = output {
        cfg.output = output;
    }
    if let Some(format) = format {
        cfg.format = format;
    }

    let options = GenerateOptions::from_config(&cfg)?;
    let path = generate(&options, &mut frontend_for(&options))
        .with_context(|| format!("failed to document {}", options.entry_path().display()))?;

    eprintln!("  wrote {}", path.display());
    Ok(())
}

fn cmd_inspect(source: SourceArgs, format: InspectFormat) -> Result<()> {
    let cfg = merged_config(source)?;
    let options = GenerateOptions::from_config(&cfg)?;
    let spec = build_spec(&options, &mut frontend_for(&options))
        .with_context(|| format!("failed to document {}", options.entry_path().display()))?;
    info!(
        "{} paths, {} definitions",
        spec.paths.len(),
        spec.definitions.len()
    );

    let summary = build_inspect_summary(&spec);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &Swagger) -> serde_json::Value {
    let operations: Vec<serde_json::Value> = spec
        .paths
        .iter()
        .flat_map(|(path, item)| {
            item.operations().map(move |(method, op)| {
                serde_json::json!({
                    "id": op.operation_id,
                    "method": method.as_str(),
                    "path": path,
                    "tags": op.tags,
                    "responses": op.responses.keys().collect::<Vec<_>>(),
                })
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
            "host": spec.host,
            "basePath": spec.base_path,
        },
        "operations": operations,
        "definitions": spec.definitions.keys().collect::<Vec<_>>(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
