//! Unit tests for CLI commands

use crate::cli::{run, Cli, Commands};
use clap::Parser;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/problems.json");

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["skeleton-java", "serve"]).unwrap();

    match cli.command {
        Commands::Serve {
            source,
            host,
            port,
            refresh_secs,
            watch,
        } => {
            assert_eq!(source.problems_url, "http://localhost:8080");
            assert!(source.problems_file.is_none());
            assert_eq!(host, "0.0.0.0");
            assert_eq!(port, 8081);
            assert_eq!(refresh_secs, 0);
            assert!(!watch);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_with_flags() {
    let cli = Cli::try_parse_from([
        "skeleton-java",
        "serve",
        "--problems-url",
        "http://store:9000",
        "--port",
        "9001",
        "--refresh-secs",
        "30",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve {
            source,
            port,
            refresh_secs,
            ..
        } => {
            assert_eq!(source.problems_url, "http://store:9000");
            assert_eq!(port, 9001);
            assert_eq!(refresh_secs, 30);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_watch_requires_problems_file() {
    assert!(Cli::try_parse_from(["skeleton-java", "serve", "--watch"]).is_err());

    let cli = Cli::try_parse_from([
        "skeleton-java",
        "serve",
        "--problems-file",
        "problems.json",
        "--watch",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Serve { watch: true, .. }));
}

#[test]
fn test_render_requires_id() {
    assert!(Cli::try_parse_from(["skeleton-java", "render"]).is_err());

    let cli = Cli::try_parse_from(["skeleton-java", "render", "--id", "fib"]).unwrap();
    match cli.command {
        Commands::Render { id, .. } => assert_eq!(id, "fib"),
        _ => panic!("Expected Render command"),
    }
}

#[test]
fn test_invalid_port_rejected() {
    assert!(Cli::try_parse_from(["skeleton-java", "serve", "--port", "70000"]).is_err());
}

#[test]
fn test_render_from_file() {
    let cli = Cli::try_parse_from([
        "skeleton-java",
        "render",
        "--problems-file",
        FIXTURE,
        "--id",
        "2-sum",
    ])
    .unwrap();
    assert!(run(cli).is_ok());
}

#[test]
fn test_render_unknown_problem_fails() {
    let cli = Cli::try_parse_from([
        "skeleton-java",
        "render",
        "--problems-file",
        FIXTURE,
        "--id",
        "nope",
    ])
    .unwrap();
    let err = run(cli).unwrap_err();
    assert_eq!(err.to_string(), "problem nope not found");
}

#[test]
fn test_list_from_missing_file_fails() {
    let cli = Cli::try_parse_from([
        "skeleton-java",
        "list",
        "--problems-file",
        "/no/such/problems.json",
    ])
    .unwrap();
    let err = run(cli).unwrap_err();
    assert!(err.to_string().contains("cannot load problems from /no/such/problems.json"));
}

#[test]
fn test_problems_file_conflicts_with_url() {
    let result = Cli::try_parse_from([
        "skeleton-java",
        "list",
        "--problems-url",
        "http://store:9000",
        "--problems-file",
        "problems.json",
    ]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from(["skeleton-java", "list", "--problems-file", "problems.json"])
        .unwrap();
    match cli.command {
        Commands::List { source } => {
            assert_eq!(source.problems_file.as_deref(), Some(std::path::Path::new("problems.json")));
        }
        _ => panic!("Expected List command"),
    }
}
