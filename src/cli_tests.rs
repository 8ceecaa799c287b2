use clap::Parser;

use super::*;

#[test]
fn sync_defaults() {
    let cli = Cli::try_parse_from(["anki-stats", "sync"]).unwrap();
    assert!(!cli.quiet);
    assert_eq!(cli.verbose, 0);
    assert!(!cli.no_config);

    let Commands::Sync(args) = &cli.command else {
        panic!("expected sync subcommand");
    };
    assert!(args.db.is_none());
    assert!(args.repo.is_none());
    assert!(!args.no_commit);
    assert!(!args.push);
    assert!(!args.force);
}

#[test]
fn sync_flags_parse() {
    let cli = Cli::try_parse_from([
        "anki-stats",
        "sync",
        "--db",
        "/tmp/collection.anki2",
        "--repo",
        "/tmp/repo",
        "--no-commit",
        "--push",
        "--force",
        "--quiet",
    ])
    .unwrap();

    assert!(cli.quiet);
    let Commands::Sync(args) = &cli.command else {
        panic!("expected sync subcommand");
    };
    assert_eq!(args.db.as_deref().unwrap().to_str(), Some("/tmp/collection.anki2"));
    assert_eq!(args.repo.as_deref().unwrap().to_str(), Some("/tmp/repo"));
    assert!(args.no_commit);
    assert!(args.push);
    assert!(args.force);
}

#[test]
fn short_db_flag() {
    let cli = Cli::try_parse_from(["anki-stats", "export", "-d", "x.anki2"]).unwrap();
    let Commands::Export(args) = &cli.command else {
        panic!("expected export subcommand");
    };
    assert_eq!(args.db.as_deref().unwrap().to_str(), Some("x.anki2"));
}

#[test]
fn verbose_is_counted() {
    let cli = Cli::try_parse_from(["anki-stats", "-vv", "render"]).unwrap();
    assert_eq!(cli.verbose, 2);
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["anki-stats"]).is_err());
}
