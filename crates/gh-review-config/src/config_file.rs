use std::path::{Path, PathBuf};

use crate::paths;

/// Load config file content from CWD first, then the config directory
///
/// Searches for:
/// 1. `.gh-review.toml` in the current working directory
/// 2. `config.toml` in the platform config directory (`~/.config/gh-review/` on Linux)
///
/// Returns the path and file content if found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    candidate_paths()
        .into_iter()
        .find_map(|path| read_config_file(&path).map(|content| (path, content)))
}

/// Read a single config file, logging where it came from
pub fn read_config_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(e) => {
            log::trace!("No config at {}: {}", path.display(), e);
            None
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    [paths::local_config_path(), paths::app_config_path()]
        .into_iter()
        .filter_map(Result::ok)
        .collect()
}
