//! Shared test infrastructure: a recording mock executor, scripted
//! confirmation providers, and project fixtures.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Mutex;

use anyhow::Result;
use camino::Utf8PathBuf;
use pyship::config::ReleaseProfile;
use pyship::confirm::ConfirmationProvider;
use pyship::executor::{CommandExecutor, CommandSpec, ExecutionResult};

type Hook = Box<dyn Fn(&CommandSpec) + Send + Sync>;

/// Records executed commands in order, optionally failing on specific calls.
pub struct MockExecutor {
    calls: Mutex<Vec<Vec<String>>>,
    /// If set, the Nth call (0-indexed) will return an error.
    fail_on_call: Option<usize>,
    /// If set, the Nth call (0-indexed) will report this non-zero exit code.
    nonzero_on_call: Option<(usize, i32)>,
    /// Captured stdout returned for every successful call.
    stdout: String,
    /// Invoked for every successful call, e.g. to simulate build output
    /// appearing under the dist directory.
    hook: Option<Hook>,
}

#[allow(dead_code)]
impl MockExecutor {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
            nonzero_on_call: None,
            stdout: String::new(),
            hook: None,
        }
    }

    pub fn failing_on(call_index: usize) -> Self {
        Self {
            fail_on_call: Some(call_index),
            ..Self::new()
        }
    }

    pub fn exiting_nonzero_on(call_index: usize, code: i32) -> Self {
        Self {
            nonzero_on_call: Some((call_index, code)),
            ..Self::new()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_hook(mut self, hook: impl Fn(&CommandSpec) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        let mut args = vec![spec.command.clone()];
        args.extend(spec.args.iter().cloned());
        calls.push(args);
        drop(calls);

        if self.fail_on_call == Some(index) {
            anyhow::bail!("simulated failure on call {}", index);
        }
        if let Some((fail_index, code)) = self.nonzero_on_call {
            if fail_index == index {
                return Ok(ExecutionResult {
                    status: Some(ExitStatus::from_raw(code << 8)),
                    stdout: String::new(),
                    stderr: "simulated tool failure".to_string(),
                });
            }
        }

        if let Some(ref hook) = self.hook {
            hook(spec);
        }

        Ok(ExecutionResult {
            status: Some(ExitStatus::from_raw(0)),
            stdout: self.stdout.clone(),
            stderr: String::new(),
        })
    }
}

/// Confirmation provider that always gives the same scripted answer and
/// records every prompt it was asked.
pub struct ScriptedConfirmation {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedConfirmation {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl ConfirmationProvider for ScriptedConfirmation {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer)
    }
}

/// Test helper to create a ReleaseProfile with minimal required fields.
#[allow(dead_code)]
pub fn create_profile(package: impl Into<String>) -> ReleaseProfile {
    ReleaseProfile {
        package: package.into(),
        module: None,
        python: "python3".to_string(),
        dist_dir: Utf8PathBuf::from("dist"),
        repository_url: None,
    }
}

/// Creates a Python project skeleton (just a pyproject.toml) in the given
/// temp directory and returns its UTF-8 path.
#[allow(dead_code)]
pub fn init_project(dir: &std::path::Path) -> Utf8PathBuf {
    let dir = Utf8PathBuf::from_path_buf(dir.to_path_buf()).expect("path should be valid UTF-8");
    std::fs::write(dir.join("pyproject.toml"), "[project]\nname = \"demo\"\n")
        .expect("failed to write pyproject.toml");
    dir
}
