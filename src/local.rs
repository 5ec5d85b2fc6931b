//! Local app configuration discovery
//!
//! The local app definition lives in an `app.json` file. Unless a path is
//! given explicitly, it is found by walking up the directory hierarchy from
//! the working directory, so commands work from anywhere inside a project.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::app::App;

/// Well-known file name of the local app definition.
pub const CONFIG_NAME: &str = "app.json";

#[derive(Debug, Error)]
pub enum LocalError {
    #[error("app config not found (looked for {CONFIG_NAME} up from the working directory)")]
    NotFound,
    #[error("specified app config does not exist: {}", .0.display())]
    MissingPath(PathBuf),
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Locate the local app config, honoring an explicit override path.
pub fn find_app_config(start: &Path, explicit: Option<&Path>) -> Result<PathBuf, LocalError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(LocalError::MissingPath(path.to_path_buf()));
    }

    let mut dir = start;
    loop {
        let candidate = dir.join(CONFIG_NAME);
        if candidate.is_file() {
            debug!("found app config at {}", candidate.display());
            return Ok(candidate);
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => return Err(LocalError::NotFound),
        }
    }
}

/// Load and parse an app snapshot from a JSON export file.
pub fn load_app(path: &Path) -> Result<App, LocalError> {
    let data = fs::read_to_string(path).map_err(|source| LocalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    App::from_json(&data).map_err(|source| LocalError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Locate and load the local app definition in one step.
pub fn get_app(start: &Path, explicit: Option<&Path>) -> Result<App, LocalError> {
    let path = find_app_config(start, explicit)?;
    load_app(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_config_in_ancestor_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("project").join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        let config = tmp.path().join("project").join(CONFIG_NAME);
        fs::write(&config, r#"{"name": "demo"}"#).unwrap();

        let found = find_app_config(&nested, None).unwrap();
        assert_eq!(found, config);
    }

    #[test]
    fn test_explicit_path_wins_over_search() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_NAME), r#"{"name": "ambient"}"#).unwrap();
        let other = tmp.path().join("other.json");
        fs::write(&other, r#"{"name": "explicit"}"#).unwrap();

        let app = get_app(tmp.path(), Some(&other)).unwrap();
        assert_eq!(app.name, "explicit");
    }

    #[test]
    fn test_missing_explicit_path_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.json");
        assert!(matches!(
            find_app_config(tmp.path(), Some(&missing)),
            Err(LocalError::MissingPath(_))
        ));
    }

    #[test]
    fn test_not_found_when_no_ancestor_has_config() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            find_app_config(tmp.path(), None),
            Err(LocalError::NotFound)
        ));
    }

    #[test]
    fn test_parse_failure_is_surfaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_NAME);
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_app(&path),
            Err(LocalError::Parse { .. })
        ));
    }
}
