//! docker-compose binary discovery and version checks

use super::executor::CommandRunner;
use crate::command::Invocation;
use crate::error::{ComposeCtlError, Result};
use crate::settings::Settings;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Name of the compose executable
pub const COMPOSE_BINARY: &str = "docker-compose";

/// Locate the docker-compose binary.
///
/// An explicit `binary` setting wins; otherwise `PATH` is searched, then the
/// configured fallback directories.
pub fn find_binary(settings: &Settings) -> Result<PathBuf> {
    if let Some(ref binary) = settings.binary {
        match which::which(binary) {
            Ok(path) => return Ok(path),
            Err(e) => tracing::warn!(
                binary = %binary.display(),
                error = %e,
                "Configured binary not usable, searching PATH"
            ),
        }
    }

    if let Ok(path) = which::which(COMPOSE_BINARY) {
        return Ok(path);
    }

    find_in(&settings.fallback_dirs, COMPOSE_BINARY).ok_or(ComposeCtlError::BinaryNotFound)
}

/// Look up the executable `name` in `dirs` only
pub fn find_in(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    if dirs.is_empty() {
        return None;
    }

    let paths = std::env::join_paths(dirs).ok()?;
    let cwd = std::env::current_dir().ok()?;
    which::which_in(name, Some(paths), cwd).ok()
}

/// Extract the first `major.minor.patch` token from version output
pub fn parse_version(output: &str) -> Option<String> {
    let re = Regex::new(r"\d+\.\d+\.\d+").ok()?;
    re.find(output).map(|m| m.as_str().to_string())
}

/// Whether `version` satisfies the expected prefix, compared by component
pub fn version_matches(version: &str, expected: &str) -> bool {
    let found: Vec<&str> = version.split('.').collect();
    let wanted: Vec<&str> = expected.trim().split('.').collect();
    wanted.len() <= found.len() && wanted.iter().zip(&found).all(|(w, f)| w == f)
}

/// Query the binary's version and compare it with the configured pin.
///
/// Does nothing when no version is expected. A mismatch, or output without a
/// version, is logged; with `strict_version` it is an error.
pub fn verify_version(
    runner: &dyn CommandRunner,
    binary: &Path,
    settings: &Settings,
) -> Result<Option<String>> {
    let Some(ref expected) = settings.expected_version else {
        return Ok(None);
    };

    let query = Invocation {
        program: binary.to_path_buf(),
        args: vec!["version".to_string(), "--short".to_string()],
        working_dir: None,
    };
    let result = runner.run(&query)?;
    let found = parse_version(&result.stdout).unwrap_or_else(|| result.stdout.trim().to_string());

    if version_matches(&found, expected) {
        tracing::debug!(version = %found, "docker-compose version verified");
        return Ok(Some(found));
    }

    if settings.strict_version {
        return Err(ComposeCtlError::VersionMismatch {
            expected: expected.clone(),
            found,
        });
    }

    tracing::warn!(
        expected = %expected,
        found = %found,
        "docker-compose version differs from the expected one, output classification may be wrong"
    );
    Ok(Some(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::executor::ExecutionResult;
    use tempfile::tempdir;

    struct VersionRunner(&'static str);

    impl CommandRunner for VersionRunner {
        fn run(&self, invocation: &Invocation) -> Result<ExecutionResult> {
            assert_eq!(invocation.args, vec!["version", "--short"]);
            Ok(ExecutionResult {
                rc: 0,
                stdout: self.0.to_string(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("1.29.2\n").as_deref(), Some("1.29.2"));
        assert_eq!(
            parse_version("docker-compose version 1.25.0, build 0a186604").as_deref(),
            Some("1.25.0")
        );
        assert_eq!(parse_version("unknown"), None);
    }

    #[test]
    fn test_version_matches() {
        assert!(version_matches("1.29.2", "1.29"));
        assert!(version_matches("1.29.2", "1"));
        assert!(version_matches("1.29.2", "1.29.2"));
        assert!(!version_matches("1.2.0", "1.29"));
        assert!(!version_matches("2.20.1", "1"));
        assert!(!version_matches("1.29", "1.29.2"));
    }

    #[test]
    fn test_verify_version_skipped_without_pin() {
        let settings = Settings::default();
        let found = verify_version(&VersionRunner("9.9.9"), Path::new("docker-compose"), &settings);
        assert!(found.unwrap().is_none());
    }

    #[test]
    fn test_verify_version_mismatch() {
        let mut settings = Settings {
            expected_version: Some("1.29".to_string()),
            ..Settings::default()
        };

        let found = verify_version(&VersionRunner("2.20.1\n"), Path::new("dc"), &settings).unwrap();
        assert_eq!(found.as_deref(), Some("2.20.1"));

        settings.strict_version = true;
        let result = verify_version(&VersionRunner("2.20.1\n"), Path::new("dc"), &settings);
        assert!(matches!(result, Err(ComposeCtlError::VersionMismatch { .. })));

        let found = verify_version(&VersionRunner("1.29.2\n"), Path::new("dc"), &settings).unwrap();
        assert_eq!(found.as_deref(), Some("1.29.2"));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_in_requires_executable() {
        use std::os::unix::fs::PermissionsExt;

        let plain = tempdir().unwrap();
        let exec = tempdir().unwrap();

        std::fs::write(plain.path().join(COMPOSE_BINARY), "").unwrap();
        let bin = exec.path().join(COMPOSE_BINARY);
        std::fs::write(&bin, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let dirs = vec![plain.path().to_path_buf(), exec.path().to_path_buf()];
        assert_eq!(find_in(&dirs, COMPOSE_BINARY), Some(bin.clone()));
        assert_eq!(find_in(&dirs[..1], COMPOSE_BINARY), None);
        assert_eq!(find_in(&[], COMPOSE_BINARY), None);

        let settings = Settings {
            binary: Some(bin.clone()),
            ..Settings::default()
        };
        assert_eq!(find_binary(&settings).unwrap(), bin);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_binary_searches_fallback_dirs() {
        use std::os::unix::fs::PermissionsExt;

        let fallback = tempdir().unwrap();
        let bin = fallback.path().join(COMPOSE_BINARY);
        std::fs::write(&bin, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        // An unusable explicit binary falls through to the search
        let settings = Settings {
            binary: Some(fallback.path().join("missing")),
            fallback_dirs: vec![fallback.path().to_path_buf()],
            ..Settings::default()
        };

        let found = find_binary(&settings).unwrap();
        assert!(found == bin || found.file_name() == bin.file_name());
    }
}
