use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use milsym_append::MilitaryFeatureAppender;
use milsym_core::config::{AppConfig, LogFormat, LoggingConfig};
use milsym_core::{MilsymError, RunError};
use milsym_router::{load_rule_table, FieldAliases};
use milsym_sidc::{SidcReport, SymbolComposer, SymbolLibrary, YamlSymbolSource};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Military feature append: route SIDC-tagged features into military
/// feature classes and assign their representation rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "MILSYM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append military features from an input feature class to an output workspace
    Append {
        /// Input workspace file, optionally with `#FeatureClass`
        input: String,

        /// Output workspace file
        output: PathBuf,

        /// Input field holding the SIDC (defaults to append.sidc_field)
        sidc_field: Option<String>,
    },

    /// Recalculate representation rule ids of a military feature class
    CalcRepRules {
        /// Workspace file with `#FeatureClass`
        class: String,

        /// SIDC field used when the class has no `sic` field
        #[arg(default_value = "sidc")]
        sidc_field: String,
    },

    /// Decode SIDCs and print what is known about them
    Decode {
        /// Codes to decode
        #[arg(required = true)]
        sidcs: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let code = err
            .downcast_ref::<MilsymError>()
            .map_or(RunError::OTHER, MilsymError::exit_code);
        error!(code, error = %err, "Run failed");
        eprintln!("Error code {}: {}", code, RunError::meaning(code));
        eprintln!("{:#}", err);
        process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Append {
            input,
            output,
            sidc_field,
        } => {
            let sidc_field = sidc_field.unwrap_or_else(|| config.append.sidc_field.clone());
            info!(input = %input, output = %output.display(), sidc_field = %sidc_field, "Starting append");

            let appender = build_appender(&config)?;
            let summary = appender
                .process_workspaces(&input, &output, &sidc_field)
                .with_context(|| format!("Append from {} failed", input))?;

            info!(
                features = summary.features_written(),
                rules = summary.processed.len(),
                skipped = summary.skipped.len(),
                "Append complete"
            );
            print_yaml(&summary)
        }
        Command::CalcRepRules { class, sidc_field } => {
            info!(class = %class, sidc_field = %sidc_field, "Calculating representation rules");

            let appender = build_appender(&config)?;
            let summary = appender
                .calculate_rep_rules_in_workspace(&class, &sidc_field)
                .with_context(|| format!("Calculating representation rules on {} failed", class))?;
            print_yaml(&summary)
        }
        Command::Decode { sidcs } => {
            let composer = SymbolComposer::new(load_library(&config)?);
            let reports: Vec<SidcReport> = sidcs
                .iter()
                .map(|code| SidcReport::new(&composer, code))
                .collect();
            print_yaml(&reports)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_config_builder(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        logging.parse_level()?
    };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.file_line)
        .with_line_number(logging.file_line);

    let init = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = init {
        eprintln!("Failed to initialize logging: {}", e);
    }

    Ok(())
}

fn load_library(config: &AppConfig) -> Result<SymbolLibrary> {
    let sources: Vec<YamlSymbolSource> = config
        .data
        .symbol_library
        .iter()
        .map(|path| YamlSymbolSource::new(path.clone()))
        .collect();
    let refs: Vec<&YamlSymbolSource> = sources.iter().collect();

    let library = SymbolLibrary::load(&refs)
        .map_err(|e| MilsymError::from(RunError::config_load(e.to_string())))?;
    info!(symbols = library.len(), "Symbol library ready");
    Ok(library)
}

fn build_appender(config: &AppConfig) -> Result<MilitaryFeatureAppender> {
    let rules = load_rule_table(&config.data.rules_file)
        .map_err(|e| MilsymError::from(RunError::config_load(e.to_string())))?;
    let aliases = FieldAliases::load_or_builtin(config.data.field_mapping_file.as_deref())
        .map_err(|e| MilsymError::from(RunError::config_load(e.to_string())))?;
    let composer = SymbolComposer::new(load_library(config)?);

    info!(
        rules = rules.len(),
        aliases = aliases.len(),
        "Loaded dependent data files"
    );

    Ok(MilitaryFeatureAppender::new(rules, aliases, composer).with_backfill(config.append.backfill))
}

fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(value).context("Failed to serialize output")?;
    print!("{}", yaml);
    Ok(())
}
