use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Catches short flag conflicts and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_migrate_flags() {
    let cli = Cli::try_parse_from(["tm", "migrate", "--to", "3", "--dry-run"]).unwrap();
    match cli.command {
        Commands::Migrate(args) => {
            assert_eq!(args.target, Some(3));
            assert!(args.dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_rollback_accepts_uninitialized_target() {
    let cli = Cli::try_parse_from(["tm", "rollback", "--to", "-1"]).unwrap();
    match cli.command {
        Commands::Rollback(args) => assert_eq!(args.target, Some(-1)),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_defaults_without_target() {
    let cli = Cli::try_parse_from(["tm", "update"]).unwrap();
    assert_eq!(cli.global.project_dir, ".");
    assert!(!cli.global.verbose);
    match cli.command {
        Commands::Update(args) => assert_eq!(args.target, None),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tm", "status", "--verbose", "-p", "proj", "--target", "prod", "-o", "json",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "proj");
    assert_eq!(cli.global.target.as_deref(), Some("prod"));
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, OutputFormat::Json),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_validate_and_new_positional_version() {
    let cli = Cli::try_parse_from(["tm", "validate", "2", "--check-sql"]).unwrap();
    match cli.command {
        Commands::Validate(args) => {
            assert_eq!(args.version, Some(2));
            assert!(args.check_sql);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from(["tm", "new"]).unwrap();
    assert!(matches!(cli.command, Commands::New(NewArgs { version: None })));
}

#[test]
fn test_negative_version_rejected_for_new() {
    assert!(Cli::try_parse_from(["tm", "new", "-3"]).is_err());
}
