use pyship::executor::{CommandExecutor, CommandSpec, RealCommandExecutor};

#[test]
fn dry_run_skips_command_lookup() {
    let executor = RealCommandExecutor { dry_run: true };
    let spec = CommandSpec::new("definitely-not-a-command", Vec::new());

    let result = executor
        .execute(&spec)
        .expect("dry run should not require command to exist");
    assert!(result.status.is_none(), "dry run result should not have an exit status");
    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
}

#[test]
fn non_dry_run_fails_for_nonexistent_command() {
    let executor = RealCommandExecutor { dry_run: false };
    let spec = CommandSpec::new("this-command-should-not-exist", Vec::new());

    let result = executor.execute(&spec);

    assert!(result.is_err());
    if let Err(e) = result {
        let msg = e.to_string();
        assert!(
            msg.contains("not found in PATH"),
            "Expected 'not found in PATH' in error, got: {}",
            msg
        );
        // Verify it's a CommandNotFound variant
        let typed = e.downcast_ref::<pyship::PyshipError>();
        assert!(typed.is_some(), "Expected PyshipError, got: {:#}", e);
        assert!(
            matches!(typed.unwrap(), pyship::PyshipError::CommandNotFound { .. }),
            "Expected CommandNotFound variant, got: {:?}",
            typed.unwrap()
        );
    }
}

#[test]
fn captures_stdout_of_executed_command() {
    let executor = RealCommandExecutor { dry_run: false };
    let spec = CommandSpec::new("echo", vec!["hello".to_string()]);

    let result = executor.execute(&spec).expect("echo should execute");
    assert!(result.success());
    assert_eq!(result.stdout.trim(), "hello");
}
