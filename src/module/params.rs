//! Module parameters

use crate::command::Action;
use crate::compose::{ComposeConfig, ComposeParser};
use crate::error::{ComposeCtlError, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Parameters as handed over by the caller.
///
/// Key names and defaults follow the argument spec configuration
/// management playbooks already use for this module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleParams {
    /// Absolute path to the compose file
    pub location: PathBuf,
    /// Services to act on, empty for all
    #[serde(default, deserialize_with = "string_or_list")]
    pub services: Vec<String>,
    /// Action to run
    #[serde(default)]
    pub command: Action,
    /// Do not add `depends_on` services to the selection
    #[serde(default, rename = "ignoredependencys", alias = "ignore_dependencies")]
    pub ignore_dependencies: bool,
    /// Pass `-v` to `down`
    #[serde(
        default = "default_remove_volumes",
        rename = "removevolumes",
        alias = "remove_volumes"
    )]
    pub remove_volumes: bool,
}

fn default_remove_volumes() -> bool {
    true
}

/// Accept either a YAML/JSON list or a comma separated string
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        String(String),
        List(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        StringOrList::List(list) => list,
    })
}

impl ModuleParams {
    /// Parameters for `action` on the compose file at `location`, with defaults
    pub fn new(location: impl Into<PathBuf>, action: Action) -> Self {
        Self {
            location: location.into(),
            services: Vec::new(),
            command: action,
            ignore_dependencies: false,
            remove_volumes: true,
        }
    }

    /// Load parameters from a JSON arguments file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ComposeCtlError::InvalidArguments(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ComposeCtlError::InvalidArguments(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Check the parameters and load the compose file.
    ///
    /// Nothing is executed; every failure here is a configuration error.
    /// Combinations of action and services are checked when the command
    /// is assembled.
    pub fn validate(self) -> Result<ValidatedParams> {
        if !self.location.is_file() {
            return Err(ComposeCtlError::InvalidLocation(
                self.location.display().to_string(),
            ));
        }

        let compose = ComposeParser::parse_file(&self.location)?;

        let working_dir = self
            .location
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(ValidatedParams {
            location: self.location,
            working_dir,
            compose,
            services: self.services,
            action: self.command,
            ignore_dependencies: self.ignore_dependencies,
            remove_volumes: self.remove_volumes,
        })
    }
}

/// Parameters that passed validation, with the compose file loaded
#[derive(Debug, Clone)]
pub struct ValidatedParams {
    /// Compose file path
    pub location: PathBuf,
    /// Directory containing the compose file
    pub working_dir: PathBuf,
    /// Parsed compose file
    pub compose: ComposeConfig,
    /// Explicitly requested services
    pub services: Vec<String>,
    /// Action to run
    pub action: Action,
    /// Skip dependency expansion
    pub ignore_dependencies: bool,
    /// Remove volumes on `down`
    pub remove_volumes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let params: ModuleParams =
            serde_json::from_str(r#"{"location": "/opt/app/docker-compose.yml"}"#).unwrap();

        assert_eq!(params, ModuleParams::new("/opt/app/docker-compose.yml", Action::Up));
        assert!(params.remove_volumes);
        assert!(!params.ignore_dependencies);
    }

    #[test]
    fn test_module_key_names() {
        let params: ModuleParams = serde_json::from_str(
            r#"{
                "location": "/opt/app/docker-compose.yml",
                "services": ["web", "db"],
                "command": "pull",
                "ignoredependencys": true,
                "removevolumes": false
            }"#,
        )
        .unwrap();

        assert_eq!(params.services, vec!["web", "db"]);
        assert_eq!(params.command, Action::Pull);
        assert!(params.ignore_dependencies);
        assert!(!params.remove_volumes);
    }

    #[test]
    fn test_aliases_and_comma_list() {
        let params: ModuleParams = serde_json::from_str(
            r#"{
                "location": "/opt/app/docker-compose.yml",
                "services": "web, db,",
                "ignore_dependencies": true,
                "remove_volumes": false
            }"#,
        )
        .unwrap();

        assert_eq!(params.services, vec!["web", "db"]);
        assert!(params.ignore_dependencies);
        assert!(!params.remove_volumes);
    }

    #[test]
    fn test_missing_location_rejected() {
        assert!(serde_json::from_str::<ModuleParams>(r#"{"command": "up"}"#).is_err());
        assert!(serde_json::from_str::<ModuleParams>(
            r#"{"location": "/x", "command": "restart"}"#
        )
        .is_err());
    }

    #[test]
    fn test_validate_location() {
        let temp = tempdir().unwrap();

        let err = ModuleParams::new(temp.path().join("missing.yml"), Action::Up)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ComposeCtlError::InvalidLocation(_)));

        let err = ModuleParams::new(temp.path(), Action::Up)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ComposeCtlError::InvalidLocation(_)));
    }

    #[test]
    fn test_from_file_unknown_command() {
        let temp = tempdir().unwrap();
        let args = temp.path().join("args.json");
        std::fs::write(
            &args,
            r#"{"location": "/opt/app/docker-compose.yml", "command": "restart"}"#,
        )
        .unwrap();

        let err = ModuleParams::from_file(&args).unwrap_err();
        assert!(matches!(err, ComposeCtlError::InvalidArguments(_)));
        assert!(err.is_configuration());
        assert!(err.to_string().contains("restart"));
    }

    #[test]
    fn test_from_file_unreadable() {
        let temp = tempdir().unwrap();

        let err = ModuleParams::from_file(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ComposeCtlError::InvalidArguments(_)));

        let args = temp.path().join("args.json");
        std::fs::write(&args, "{not json").unwrap();
        let err = ModuleParams::from_file(&args).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_file() {
        let temp = tempdir().unwrap();
        let args = temp.path().join("args.json");
        std::fs::write(
            &args,
            r#"{"location": "/opt/app/docker-compose.yml", "command": "stop", "services": ["web"]}"#,
        )
        .unwrap();

        let params = ModuleParams::from_file(&args).unwrap();
        assert_eq!(params.command, Action::Stop);
        assert_eq!(params.services, vec!["web"]);
    }

    #[test]
    fn test_validate_bad_yaml() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("docker-compose.yml");
        std::fs::write(&file, "services: [web\n").unwrap();

        let err = ModuleParams::new(&file, Action::Up).validate().unwrap_err();
        assert!(matches!(err, ComposeCtlError::ComposeParse(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validate_loads_compose() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("docker-compose.yml");
        std::fs::write(&file, "services:\n  web:\n    image: nginx\n").unwrap();

        let validated = ModuleParams::new(&file, Action::Start).validate().unwrap();
        assert_eq!(validated.working_dir, temp.path());
        assert!(validated.compose.services.contains_key("web"));
        assert_eq!(validated.action, Action::Start);
    }
}
