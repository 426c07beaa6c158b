//! Release profile loading and validation.
//!
//! A release profile is a small YAML file (`release.yaml` by default)
//! describing the package to release. Only the distribution name is
//! required; everything else has sensible defaults:
//!
//! ```yaml
//! package: my-package
//! module: my_package            # optional, derived from `package`
//! python: python3               # optional
//! dist_dir: dist                # optional
//! repository_url: https://test.pypi.org/legacy/   # optional
//! ```

use std::fs::File;
use std::io::BufReader;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::error::PyshipError;

/// Files that mark a directory as a Python project root.
///
/// The pipeline refuses to run unless one of these exists in the
/// project directory.
pub const PROJECT_DESCRIPTORS: &[&str] = &["pyproject.toml", "setup.py", "setup.cfg"];

/// Dotted Python identifier, e.g. `my_pkg` or `my_pkg.sub`.
///
/// The module name is interpolated into a `python -c` snippet during
/// import verification, so anything outside this shape is rejected.
static MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("hardcoded regex must compile")
});

fn default_python() -> String {
    "python3".to_string()
}

fn default_dist_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("dist")
}

/// Declarative description of one release.
#[derive(Debug, Deserialize)]
pub struct ReleaseProfile {
    /// Distribution name as published on the package index (e.g., "my-package")
    pub package: String,
    /// Import name of the top-level module; defaults to `package` with
    /// dashes mapped to underscores
    #[serde(default)]
    pub module: Option<String>,
    /// Python interpreter used to drive build, twine, and pip (defaults to "python3")
    #[serde(default = "default_python")]
    pub python: String,
    /// Directory where distributable artifacts are produced (defaults to "dist")
    #[serde(default = "default_dist_dir")]
    pub dist_dir: Utf8PathBuf,
    /// Custom package index upload endpoint; omitted means the tool default
    #[serde(default)]
    pub repository_url: Option<String>,
}

impl ReleaseProfile {
    /// Returns the import name used during import verification.
    pub fn import_module(&self) -> String {
        self.module
            .clone()
            .unwrap_or_else(|| self.package.replace('-', "_"))
    }

    /// Validates the profile.
    pub fn validate(&self) -> Result<(), PyshipError> {
        if self.package.trim().is_empty() {
            return Err(PyshipError::Validation("package name must not be empty".to_string()));
        }
        if self.python.trim().is_empty() {
            return Err(PyshipError::Validation(
                "python interpreter must not be empty".to_string(),
            ));
        }

        let module = self.import_module();
        if !MODULE_RE.is_match(&module) {
            return Err(PyshipError::Validation(format!(
                "module '{}' is not a valid Python import name",
                module
            )));
        }

        if self.dist_dir.as_str().is_empty() {
            return Err(PyshipError::Validation("dist_dir must not be empty".to_string()));
        }
        if self.dist_dir.is_absolute() {
            return Err(PyshipError::Validation(format!(
                "dist_dir '{}' must be relative to the project directory",
                self.dist_dir
            )));
        }
        if self
            .dist_dir
            .components()
            .any(|c| c == camino::Utf8Component::ParentDir)
        {
            return Err(PyshipError::Validation(format!(
                "dist_dir '{}' contains '..' components, \
                which is not allowed for security reasons",
                self.dist_dir
            )));
        }

        if let Some(ref repository_url) = self.repository_url {
            let url = Url::parse(repository_url).map_err(|e| {
                PyshipError::Validation(format!(
                    "repository_url '{}' is not a valid URL: {}",
                    repository_url, e
                ))
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(PyshipError::Validation(format!(
                    "repository_url '{}' must use http or https",
                    repository_url
                )));
            }
        }

        Ok(())
    }
}

/// Loads a release profile from a YAML file.
pub fn load_profile(path: &Utf8Path) -> Result<ReleaseProfile> {
    let file = File::open(path).with_context(|| format!("failed to load file: {}", path))?;
    let reader = BufReader::new(file);
    let profile: ReleaseProfile = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse yaml: {}", path))?;
    Ok(profile)
}

/// Locates the project descriptor in the given directory.
///
/// Returns the first match in [`PROJECT_DESCRIPTORS`] order, or a
/// `Precondition` error when none exists. The pipeline calls this before
/// running any step.
pub fn find_project_descriptor(dir: &Utf8Path) -> Result<Utf8PathBuf, PyshipError> {
    for descriptor in PROJECT_DESCRIPTORS {
        let candidate = dir.join(descriptor);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(PyshipError::Precondition(format!(
        "no project descriptor ({}) found in {}",
        PROJECT_DESCRIPTORS.join(", "),
        dir
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_profile() -> ReleaseProfile {
        ReleaseProfile {
            package: "my-package".to_string(),
            module: None,
            python: default_python(),
            dist_dir: default_dist_dir(),
            repository_url: None,
        }
    }

    #[test]
    fn test_import_module_derived_from_package() {
        let profile = minimal_profile();
        assert_eq!(profile.import_module(), "my_package");
    }

    #[test]
    fn test_import_module_explicit_override() {
        let mut profile = minimal_profile();
        profile.module = Some("my_pkg.core".to_string());
        assert_eq!(profile.import_module(), "my_pkg.core");
    }

    #[test]
    fn test_validate_rejects_invalid_module() {
        let mut profile = minimal_profile();
        profile.module = Some("my pkg; import os".to_string());
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, PyshipError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_parent_dir_in_dist_dir() {
        let mut profile = minimal_profile();
        profile.dist_dir = Utf8PathBuf::from("../dist");
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains(".."), "unexpected error: {}", err);
    }

    #[test]
    fn test_validate_rejects_non_http_repository_url() {
        let mut profile = minimal_profile();
        profile.repository_url = Some("ftp://example.com/legacy/".to_string());
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, PyshipError::Validation(_)));
    }

    #[test]
    fn test_validate_accepts_minimal_profile() {
        assert!(minimal_profile().validate().is_ok());
    }
}
