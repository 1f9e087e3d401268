use super::*;

#[test]
fn cli_list_defaults() {
    let cli = Cli::parse_from(["antipattern-guard", "list"]);
    match cli.command {
        Commands::List(args) => {
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.config.is_none());
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn cli_list_json() {
    let cli = Cli::parse_from(["antipattern-guard", "list", "--format", "json"]);
    match cli.command {
        Commands::List(args) => assert_eq!(args.format, OutputFormat::Json),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn cli_analyze_requires_snapshot() {
    let result = Cli::try_parse_from(["antipattern-guard", "analyze"]);
    assert!(result.is_err());
}

#[test]
fn cli_analyze_with_snapshots() {
    let cli = Cli::parse_from(["antipattern-guard", "analyze", "a.json", "b.json"]);
    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(
                args.snapshots,
                vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
            );
            assert!(args.only.is_empty());
            assert!(args.queries.is_none());
            assert!(args.output.is_none());
        }
        _ => panic!("Expected Analyze command"),
    }
}

#[test]
fn cli_analyze_only_is_comma_separated() {
    let cli = Cli::parse_from([
        "antipattern-guard",
        "analyze",
        "p.json",
        "--only",
        "TooLongSprint,NinetyNinetyRule",
    ]);
    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(
                args.only,
                vec!["TooLongSprint".to_string(), "NinetyNinetyRule".to_string()]
            );
        }
        _ => panic!("Expected Analyze command"),
    }
}

#[test]
fn cli_analyze_all_options() {
    let cli = Cli::parse_from([
        "antipattern-guard",
        "analyze",
        "p.json",
        "-c",
        "custom.toml",
        "--queries",
        "sql",
        "-f",
        "json",
        "-o",
        "report.json",
    ]);
    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
            assert_eq!(args.queries, Some(PathBuf::from("sql")));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.output, Some(PathBuf::from("report.json")));
        }
        _ => panic!("Expected Analyze command"),
    }
}

#[test]
fn cli_analyze_rejects_unknown_format() {
    let result = Cli::try_parse_from(["antipattern-guard", "analyze", "p.json", "-f", "xml"]);
    assert!(result.is_err());
}

#[test]
fn cli_config_validate_default_path() {
    let cli = Cli::parse_from(["antipattern-guard", "config", "validate"]);
    match cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Validate { config },
        }) => assert_eq!(config, PathBuf::from(".antipattern-guard.toml")),
        _ => panic!("Expected Config Validate command"),
    }
}

#[test]
fn cli_config_validate_custom_path() {
    let cli = Cli::parse_from(["antipattern-guard", "config", "validate", "--config", "other.toml"]);
    match cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Validate { config },
        }) => assert_eq!(config, PathBuf::from("other.toml")),
        _ => panic!("Expected Config Validate command"),
    }
}

#[test]
fn cli_config_show() {
    let cli = Cli::parse_from(["antipattern-guard", "config", "show", "-c", "x.toml"]);
    match cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Show { config },
        }) => assert_eq!(config, Some(PathBuf::from("x.toml"))),
        _ => panic!("Expected Config Show command"),
    }
}

#[test]
fn cli_global_flags() {
    let cli = Cli::parse_from([
        "antipattern-guard",
        "list",
        "-vv",
        "--quiet",
        "--color",
        "never",
        "--no-config",
    ]);
    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
    assert!(matches!(cli.color, ColorChoice::Never));
    assert!(cli.no_config);
}
