use anyhow::Result;
use clap::Parser;
use pyship::cli::{Cli, Commands, LogLevel};

#[test]
fn test_bare_invocation_runs_the_pipeline_with_defaults() -> Result<()> {
    let args = Cli::parse_from(["pyship"]);

    assert!(args.command.is_none(), "bare invocation uses the flattened release args");
    assert_eq!(args.release.file, "release.yaml");
    assert_eq!(args.release.dir, ".");
    assert_eq!(args.release.log_level, LogLevel::Info);
    assert!(!args.release.dry_run);
    assert!(!args.release.yes);

    Ok(())
}

#[test]
fn test_bare_invocation_accepts_flags() -> Result<()> {
    let args = Cli::parse_from(["pyship", "--dir", "pkg", "--dry-run", "--yes"]);

    assert!(args.command.is_none());
    assert_eq!(args.release.dir, "pkg");
    assert!(args.release.dry_run);
    assert!(args.release.yes);

    Ok(())
}

#[test]
fn test_parse_release_command_with_flags() -> Result<()> {
    let args = Cli::parse_from([
        "pyship",
        "release",
        "--file",
        "test.yaml",
        "--log-level",
        "debug",
        "--dry-run",
    ]);

    match args.command {
        Some(Commands::Release(opts)) => {
            assert_eq!(opts.file, "test.yaml");
            assert_eq!(opts.log_level, LogLevel::Debug);
            assert!(opts.dry_run);
            assert!(!opts.yes);
        }
        _ => panic!("Expected Release command"),
    }

    Ok(())
}

#[test]
fn test_parse_validate_command() -> Result<()> {
    let args = Cli::parse_from(["pyship", "validate", "--file", "test.yaml"]);

    match args.command {
        Some(Commands::Validate(opts)) => {
            assert_eq!(opts.file, "test.yaml");
        }
        _ => panic!("Expected Validate command"),
    }

    Ok(())
}
