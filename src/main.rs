use std::collections::HashSet;
use std::fs;
use std::path::Path;

use clap::Parser;
use indexmap::IndexMap;

use antipattern_guard::cli::{
    AnalyzeArgs, Cli, ColorChoice, Commands, ConfigAction, ConfigArgs, ListArgs,
};
use antipattern_guard::config::{
    CONFIG_VERSION, Config, ConfigLoader, FileConfigLoader, ThresholdValue,
};
use antipattern_guard::detector::DetectorRegistry;
use antipattern_guard::logging::init_logging;
use antipattern_guard::model::{AntiPattern, Project};
use antipattern_guard::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, format_catalog,
};
use antipattern_guard::queries::{DirectoryQueries, EmbeddedQueries};
use antipattern_guard::rows::{MemoryRowSource, ProjectSnapshot};
use antipattern_guard::runner::{DetectionRunner, ProjectReport};
use antipattern_guard::{AntipatternGuardError, EXIT_CONFIG_ERROR, EXIT_DETECTED, EXIT_SUCCESS};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::List(args) => run_list(args, &cli),
        Commands::Analyze(args) => run_analyze(args, &cli),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}

fn run_list(args: &ListArgs, cli: &Cli) -> i32 {
    match run_list_impl(args, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_list_impl(args: &ListArgs, cli: &Cli) -> antipattern_guard::Result<String> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let registry = build_registry(&config)?;
    let anti_patterns: Vec<&AntiPattern> = registry.anti_patterns().collect();
    format_catalog(&anti_patterns, args.format)
}

fn run_analyze(args: &AnalyzeArgs, cli: &Cli) -> i32 {
    match run_analyze_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_analyze_impl(args: &AnalyzeArgs, cli: &Cli) -> antipattern_guard::Result<i32> {
    // 1. Load configuration and apply threshold overrides
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let mut registry = build_registry(&config)?;

    // 2. Resolve SQL resources (CLI directory wins over config)
    let query_dir = args
        .queries
        .as_deref()
        .or(config.queries.directory.as_deref());
    load_queries(&mut registry, query_dir)?;

    // 3. Load project snapshots
    let (projects, rows) = load_snapshots(&args.snapshots)?;

    // 4. Run detectors
    let runner = DetectionRunner::new(&registry).with_only(&args.only)?;
    let reports = runner.run_all(&projects, &rows);

    // 5. Format and write output
    let color_mode = color_choice_to_mode(cli.color);
    let output = format_output(args.format, &reports, color_mode, cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    // 6. Determine exit code
    let flagged = reports
        .iter()
        .any(|report| report.has_detections() || report.has_failures());
    Ok(if flagged { EXIT_DETECTED } else { EXIT_SUCCESS })
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> antipattern_guard::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn build_registry(config: &Config) -> antipattern_guard::Result<DetectorRegistry> {
    let mut registry = DetectorRegistry::with_builtin();
    registry.apply_config(config)?;
    Ok(registry)
}

fn load_queries(
    registry: &mut DetectorRegistry,
    query_dir: Option<&Path>,
) -> antipattern_guard::Result<()> {
    match query_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "loading queries from directory");
            registry.load_queries(&DirectoryQueries::new(dir))
        }
        None => registry.load_queries(&EmbeddedQueries),
    }
}

fn load_snapshots(
    paths: &[std::path::PathBuf],
) -> antipattern_guard::Result<(Vec<Project>, MemoryRowSource)> {
    let mut projects = Vec::with_capacity(paths.len());
    let mut seen = HashSet::new();
    let mut rows = MemoryRowSource::new();

    for path in paths {
        let snapshot = ProjectSnapshot::load(path)?;
        if !seen.insert(snapshot.project.id) {
            return Err(AntipatternGuardError::Config(format!(
                "Project {} appears in more than one snapshot ({})",
                snapshot.project.id,
                path.display()
            )));
        }
        tracing::debug!(
            path = %path.display(),
            project = %snapshot.project.name,
            result_sets = snapshot.result_sets.len(),
            "snapshot loaded"
        );
        projects.push(snapshot.project.clone());
        rows.insert(snapshot);
    }

    Ok((projects, rows))
}

fn format_output(
    format: OutputFormat,
    reports: &[ProjectReport],
    color_mode: ColorMode,
    verbose: u8,
) -> antipattern_guard::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(reports),
        OutputFormat::Json => JsonFormatter.format(reports),
    }
}

fn write_output(
    output_path: Option<&Path>,
    content: &str,
    quiet: bool,
) -> antipattern_guard::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config } => run_config_show(config.as_deref(), cli.no_config),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Configuration error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_validate_impl(config_path: &Path) -> antipattern_guard::Result<()> {
    // 1. Check if file exists
    if !config_path.exists() {
        return Err(AntipatternGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    // 2. Parse TOML and check the schema version
    let config = FileConfigLoader::new().load_from_path(config_path)?;

    // 3. Every override must name a known anti-pattern, key, and kind
    let mut registry = build_registry(&config)?;

    // 4. A custom query directory must provide every resource
    if let Some(dir) = config.queries.directory.as_deref() {
        load_queries(&mut registry, Some(dir))?;
    }

    Ok(())
}

fn run_config_show(config_path: Option<&Path>, no_config: bool) -> i32 {
    match run_config_show_impl(config_path, no_config) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_show_impl(
    config_path: Option<&Path>,
    no_config: bool,
) -> antipattern_guard::Result<String> {
    let config = load_config(config_path, no_config)?;
    let registry = build_registry(&config)?;
    let effective = effective_config(&config, &registry);

    toml::to_string_pretty(&effective).map_err(|e| AntipatternGuardError::Config(e.to_string()))
}

/// Every threshold of every registered anti-pattern, with overrides applied.
fn effective_config(config: &Config, registry: &DetectorRegistry) -> Config {
    let anti_patterns = registry
        .anti_patterns()
        .map(|anti_pattern| {
            let values: IndexMap<String, ThresholdValue> = anti_pattern
                .configurations()
                .values()
                .map(|configuration| {
                    (
                        configuration.key().to_string(),
                        ThresholdValue::from(configuration.value()),
                    )
                })
                .collect();
            (anti_pattern.name().to_string(), values)
        })
        .collect();

    Config {
        version: Some(CONFIG_VERSION.to_string()),
        queries: config.queries.clone(),
        anti_patterns,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
