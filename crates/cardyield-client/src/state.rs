use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "CARDYIELD_HOME";
const HOME_DIR_NAME: &str = ".cardyield";
const CATALOG_FILE_NAME: &str = "catalog.json";

pub fn resolve_cardyield_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV_VAR) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(HOME_DIR_NAME)
            } else {
                return Err(ClientError::home_unresolved(
                    "no home directory is available for this user",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn catalog_path(home: &Path) -> PathBuf {
    home.join(CATALOG_FILE_NAME)
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::home_unresolved(&error.to_string()))
}
