use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_fetch_flags() {
    let cli = Cli::try_parse_from(["tm", "fetch", "--yes", "--dir", "db/migrations"]).unwrap();
    match cli.command {
        Commands::Fetch(args) => {
            assert!(args.yes);
            assert_eq!(args.dir.as_deref(), Some("db/migrations"));
        }
        other => panic!("expected fetch, got {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tm",
        "history",
        "-o",
        "json",
        "--target",
        "prod",
        "-p",
        "/srv/app",
    ])
    .unwrap();
    assert_eq!(cli.global.target.as_deref(), Some("prod"));
    assert_eq!(cli.global.project_dir, "/srv/app");
    match cli.command {
        Commands::History(args) => assert_eq!(args.output, HistoryOutput::Json),
        other => panic!("expected history, got {other:?}"),
    }
}

#[test]
fn test_init_requires_name() {
    assert!(Cli::try_parse_from(["tm", "init"]).is_err());
}
